use dotenvy::dotenv;
use tracing::info;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod modules;
mod routes;
mod state;
mod workers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting image-relay...");

    let config = config::settings::AppConfig::new()?;

    let storage = infrastructure::storage::s3::StorageService::new(
        &config.s3_endpoint,
        &config.s3_region,
        &config.s3_access_key,
        &config.s3_secret_key,
    )
    .await;

    let queue = infrastructure::queue::rabbitmq::RabbitMqService::new(&config.amqp_url).await?;

    let state = state::AppState::new(config.clone(), storage, queue);

    tokio::spawn(workers::thumbnail_worker::start_thumbnail_worker(
        state.clone(),
    ));

    let app = app::create_app(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
