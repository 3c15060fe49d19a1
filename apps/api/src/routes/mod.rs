pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::analysis::handlers::{handle_analyze, handle_render};
use crate::intake::handlers::handle_extract;
use crate::state::AppState;

/// JSON/multipart body ceiling: 11 MB — 1 MB of headroom over the 10 MB
/// file limit so an almost-full upload still fits in its envelope.
const BODY_LIMIT_BYTES: usize = 11 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Everything that is not an API route falls through to the widget.
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/extract", post(handle_extract))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/render", post(handle_render))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
