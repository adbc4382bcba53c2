use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProcessImageRequest {
    #[validate(length(min = 1, message = "bucket must not be empty"))]
    pub bucket: String,
    #[validate(length(min = 1, message = "key must not be empty"))]
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_fail_validation() {
        let req = ProcessImageRequest {
            bucket: "photos".to_string(),
            key: String::new(),
        };
        assert!(req.validate().is_err());

        let req = ProcessImageRequest {
            bucket: String::new(),
            key: "cat.jpg".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn populated_fields_pass_validation() {
        let req = ProcessImageRequest {
            bucket: "photos".to_string(),
            key: "cat.jpg".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
