use crate::config::settings::AppConfig;
use crate::infrastructure::queue::rabbitmq::RabbitMqService;
use crate::infrastructure::storage::s3::StorageService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: StorageService,
    pub queue: RabbitMqService,
}

impl AppState {
    pub fn new(config: AppConfig, storage: StorageService, queue: RabbitMqService) -> Self {
        Self {
            config,
            storage,
            queue,
        }
    }
}
