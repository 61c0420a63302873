pub mod completion;
pub mod config;
pub mod error;
pub mod feedback;
pub mod http;
pub mod pipeline;
pub mod storage;
pub mod transcription;

pub use completion::{CompletionBackend, OpenRouterClient};
pub use config::Config;
pub use error::PipelineError;
pub use feedback::{parse_feedback, render_prompt, FeedbackRecord};
pub use http::{create_router, AppState};
pub use pipeline::{AnalysisOutcome, FeedbackArtifact, Pipeline, TurnMetadata, UploadOutcome};
pub use storage::{ArtifactKind, ArtifactStore, TimestampKey};
pub use transcription::{AssemblyAiTranscriber, Transcriber, Transcript};
