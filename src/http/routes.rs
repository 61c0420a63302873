use super::handlers;
use super::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Uploaded recordings can be several minutes of audio.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Recording pipeline
        .route("/upload-recording", post(handlers::upload_recording))
        .route("/analyze-response", post(handlers::analyze_response))
        // Artifact access
        .route("/download-audio/:filename", get(handlers::download_audio))
        .route(
            "/download-transcript/:filename",
            get(handlers::download_transcript),
        )
        .route("/list-recordings", get(handlers::list_recordings))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        // The browser frontend is served from a different origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
