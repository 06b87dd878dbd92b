//! API routes.

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::health::{health, ready};
use crate::handlers::videos::{approve_video, create_video, get_video_status};
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let video_routes = Router::new()
        // Start a create pipeline
        .route("/videos", post(create_video))
        // Poll job progress
        .route("/videos/:job_id/status", get(get_video_status))
        // Approve & publish
        .route("/videos/:job_id/approve", post(approve_video));

    // Rendered artifacts, served by the filename derived in the pipeline
    let media = ServeDir::new(&state.config.output_dir);

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .nest("/api", video_routes)
        .nest_service("/media", media)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
