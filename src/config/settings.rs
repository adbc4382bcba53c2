use serde::Deserialize;
use thiserror::Error;

use crate::config::env::{self, EnvKey};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub amqp_url: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    pub s3_access_key: String,
    pub s3_secret_key: String,
    pub destination_bucket: String,
    pub thumbnail_queue: String,
    pub thumbnail_width: u32,
    pub jpeg_quality: u8,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            amqp_url: require(EnvKey::AmqpUrl)?,
            s3_endpoint: require(EnvKey::S3Endpoint)?,
            s3_region: env::get_or(EnvKey::S3Region, "auto"),
            s3_access_key: require(EnvKey::S3AccessKey)?,
            s3_secret_key: require(EnvKey::S3SecretKey)?,
            destination_bucket: env::get_or(EnvKey::DestinationBucket, "resized-images"),
            thumbnail_queue: env::get_or(EnvKey::ThumbnailQueue, "thumbnail_jobs"),
            thumbnail_width: env::get_parsed(EnvKey::ThumbnailWidth, 100),
            jpeg_quality: env::get_parsed(EnvKey::JpegQuality, 85),
        })
    }
}

// The store credentials and endpoint are checked here, once, at boot. A
// process that comes up without them never accepts a single job.
fn require(key: EnvKey) -> Result<String, ConfigError> {
    let name = key.as_str();
    env::get(key).map_err(|_| ConfigError::MissingVar(name))
}
