use thiserror::Error;

/// Failure taxonomy for the recording-to-feedback pipeline.
///
/// The HTTP layer maps each variant to a status code; nothing below the
/// handlers knows about HTTP.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required request field is missing or malformed. No side effects
    /// have been attempted when this is returned.
    #[error("{0}")]
    Validation(String),

    /// A remote backend (transcription or completion) reported failure.
    /// Carries the upstream diagnostic text verbatim. Artifacts written
    /// before the failing step are kept.
    #[error("{0}")]
    Upstream(String),

    /// A requested file does not exist or its name was rejected by
    /// sanitization.
    #[error("File not found: {0}")]
    NotFound(String),

    /// Unexpected infrastructure failure (I/O, serialization, transport).
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PipelineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}
