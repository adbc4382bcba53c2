use axum::Router;
use axum::routing::post;

use crate::state::AppState;

pub mod codec;
pub mod dto;
pub mod error;
pub mod events;
pub mod handler;
pub mod pipeline;
pub mod resize;

pub fn router() -> Router<AppState> {
    Router::new().route("/process-image", post(handler::process_image))
}
