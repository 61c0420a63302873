//! HTTP API server for the interview-coach frontend
//!
//! This module provides the REST API around the pipeline:
//! - POST /upload-recording - Upload an answer recording, get its transcript
//! - POST /analyze-response - Get structured coaching feedback for a transcript
//! - GET /download-audio/:filename - Download a recording
//! - GET /download-transcript/:filename - Download a transcript file
//! - GET /list-recordings - List recorded turns with artifact existence flags
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
