use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    AmqpUrl,
    S3Endpoint,
    S3Region,
    S3AccessKey,
    S3SecretKey,
    DestinationBucket,
    ThumbnailQueue,
    ThumbnailWidth,
    JpegQuality,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::AmqpUrl => "AMQP_URL",
            EnvKey::S3Endpoint => "S3_ENDPOINT",
            EnvKey::S3Region => "S3_REGION",
            EnvKey::S3AccessKey => "AWS_ACCESS_KEY_ID",
            EnvKey::S3SecretKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::DestinationBucket => "DESTINATION_BUCKET",
            EnvKey::ThumbnailQueue => "THUMBNAIL_QUEUE",
            EnvKey::ThumbnailWidth => "THUMBNAIL_WIDTH",
            EnvKey::JpegQuality => "JPEG_QUALITY",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
