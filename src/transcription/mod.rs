//! Speech-to-text backend
//!
//! The pipeline talks to transcription through the `Transcriber` trait;
//! `AssemblyAiTranscriber` is the production implementation.

mod assemblyai;

use async_trait::async_trait;

use crate::error::PipelineError;

pub use assemblyai::AssemblyAiTranscriber;

/// A completed transcription: plain text plus SRT-formatted subtitles.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub text: String,
    pub subtitles: String,
}

/// Speech-to-text port. A backend that reports failure surfaces it as
/// `PipelineError::Upstream` carrying the backend's own diagnostic text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<Transcript, PipelineError>;
}
