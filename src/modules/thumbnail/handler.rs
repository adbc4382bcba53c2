use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;
use tracing::{error, info};
use validator::Validate;

use crate::common::response::{ApiError, ErrorBody, ProcessSuccess};
use crate::state::AppState;

use super::dto::ProcessImageRequest;
use super::pipeline::{Job, ThumbnailPipeline};

#[utoipa::path(
    post,
    path = "/process-image",
    request_body = ProcessImageRequest,
    responses(
        (status = 200, description = "Image processed", body = ProcessSuccess),
        (status = 400, description = "Unparseable body or missing fields", body = ErrorBody),
        (status = 500, description = "Processing failed", body = ErrorBody)
    ),
    tag = "Thumbnails"
)]
pub async fn process_image(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<ProcessImageRequest>, ApiError>,
) -> impl IntoResponse {
    // Bad input never reaches the object store.
    if let Err(e) = req.validate() {
        return ApiError::bad_request("ValidationError", e.to_string()).into_response();
    }

    info!("🖼️ Processing image request for {}/{}", req.bucket, req.key);

    let pipeline = ThumbnailPipeline::new(state.config.thumbnail_width, state.config.jpeg_quality);
    let job = Job::new(&req.bucket, &req.key, &state.config.destination_bucket);

    match pipeline.run(&state.storage, &job).await {
        Ok(stored) => {
            info!("✅ Stored thumbnail at {}/{}", stored.bucket, stored.key);
            ProcessSuccess::new(format!("Successfully processed {}", req.key)).into_response()
        }
        Err(e) => {
            error!("❌ Failed to process {}: {}", req.key, e);
            ApiError::internal(e.kind.category(), e.to_string()).into_response()
        }
    }
}
