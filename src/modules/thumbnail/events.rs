use serde::{Deserialize, Serialize};
use validator::Validate;

/// Message consumed from the thumbnail queue.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ThumbnailJob {
    #[validate(length(min = 1))]
    pub bucket: String,
    #[validate(length(min = 1))]
    pub key: String,
}
