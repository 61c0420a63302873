//! Recording-to-feedback pipeline orchestration
//!
//! Two entry points mirror the two client requests: `upload_recording`
//! persists the audio and its transcript artifacts under a fresh timestamp
//! key, and `analyze_response` turns a transcript into structured coaching
//! feedback, persisting it under the same key when the client supplies one.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::completion::CompletionBackend;
use crate::error::PipelineError;
use crate::feedback::{parse_feedback, render_prompt, FeedbackRecord};
use crate::storage::{ArtifactKind, ArtifactStore, TimestampKey, DEFAULT_EXTENSION};
use crate::transcription::Transcriber;

/// Audio extensions accepted on upload.
pub const ALLOWED_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg", "wma", "webm"];

/// Per-turn metadata persisted alongside the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnMetadata {
    pub question: String,
    pub timestamp: TimestampKey,
    pub audio_file: String,
    pub transcript_file: String,
}

/// Feedback artifact persisted per turn: the raw model reply plus the
/// parsed record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackArtifact {
    pub question: String,
    pub transcript: String,
    pub raw_feedback: String,
    pub parsed_feedback: FeedbackRecord,
    pub timestamp: TimestampKey,
}

/// Everything a successful upload hands back to the client: filenames and
/// absolute paths of the persisted artifacts plus the transcript text.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub audio_file: String,
    pub transcript_file: String,
    pub srt_file: String,
    pub transcript_text: String,
    pub audio_path: PathBuf,
    pub transcript_path: PathBuf,
    pub srt_path: PathBuf,
    pub timestamp: TimestampKey,
    pub question: String,
}

/// Result of analyzing a transcript.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub feedback: FeedbackRecord,
    pub raw_feedback: String,
}

/// Sequences the artifact store and the two remote backends.
pub struct Pipeline {
    store: Arc<ArtifactStore>,
    transcriber: Arc<dyn Transcriber>,
    completion: Arc<dyn CompletionBackend>,
}

impl Pipeline {
    pub fn new(
        store: Arc<ArtifactStore>,
        transcriber: Arc<dyn Transcriber>,
        completion: Arc<dyn CompletionBackend>,
    ) -> Self {
        Self {
            store,
            transcriber,
            completion,
        }
    }

    /// Persist an uploaded recording and transcribe it.
    ///
    /// The audio artifact is written before transcription is attempted; if
    /// the backend reports failure the audio is kept and no transcript
    /// artifacts are written.
    pub async fn upload_recording(
        &self,
        file_name: &str,
        question: &str,
        audio: &[u8],
    ) -> Result<UploadOutcome, PipelineError> {
        if file_name.is_empty() {
            return Err(PipelineError::validation("No file selected"));
        }
        if audio.is_empty() {
            return Err(PipelineError::validation("No audio file provided"));
        }

        let extension = match file_name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => DEFAULT_EXTENSION.to_string(),
        };
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(PipelineError::validation(format!(
                "Unsupported audio format: .{}",
                extension
            )));
        }

        let key = TimestampKey::generate();
        info!("Upload accepted for turn {} ({} bytes)", key, audio.len());

        let audio_path = self.store.write_recording(&key, &extension, audio)?;

        info!("Starting transcription for turn {}", key);
        let transcript = match self.transcriber.transcribe(audio).await {
            Ok(t) => t,
            Err(e) => {
                // The audio artifact stays; the turn simply has no
                // transcript.
                error!("Transcription failed for turn {}: {}", key, e);
                return Err(e);
            }
        };

        let transcript_path =
            self.store
                .write(ArtifactKind::TranscriptText, &key, transcript.text.as_bytes())?;
        let srt_path = self.store.write(
            ArtifactKind::TranscriptSubtitles,
            &key,
            transcript.subtitles.as_bytes(),
        )?;

        let audio_file = ArtifactStore::recording_file_name(&key, &extension);
        let transcript_file = ArtifactStore::file_name(ArtifactKind::TranscriptText, &key);
        let srt_file = ArtifactStore::file_name(ArtifactKind::TranscriptSubtitles, &key);

        let metadata = TurnMetadata {
            question: question.to_string(),
            timestamp: key.clone(),
            audio_file: audio_file.clone(),
            transcript_file: transcript_file.clone(),
        };
        let metadata_json =
            serde_json::to_vec_pretty(&metadata).context("Failed to serialize turn metadata")?;
        self.store
            .write(ArtifactKind::TurnMetadata, &key, &metadata_json)?;

        info!("Turn {} transcribed and persisted", key);

        Ok(UploadOutcome {
            audio_file,
            transcript_file,
            srt_file,
            transcript_text: transcript.text,
            audio_path,
            transcript_path,
            srt_path,
            timestamp: key,
            question: question.to_string(),
        })
    }

    /// Analyze a transcript against its question and return structured
    /// feedback. A feedback artifact is persisted only when the client
    /// supplies the turn's timestamp key.
    pub async fn analyze_response(
        &self,
        question: &str,
        transcript: &str,
        key: Option<TimestampKey>,
    ) -> Result<AnalysisOutcome, PipelineError> {
        if question.is_empty() || transcript.is_empty() {
            return Err(PipelineError::validation(
                "Question and transcript are required",
            ));
        }

        info!("Analyzing response for question: {}", question);

        let prompt = render_prompt(question, transcript);
        let raw_feedback = self.completion.complete(&prompt).await?;

        let feedback = parse_feedback(&raw_feedback);

        if let Some(key) = key {
            let artifact = FeedbackArtifact {
                question: question.to_string(),
                transcript: transcript.to_string(),
                raw_feedback: raw_feedback.clone(),
                parsed_feedback: feedback.clone(),
                timestamp: key.clone(),
            };
            let json = serde_json::to_vec_pretty(&artifact)
                .context("Failed to serialize feedback artifact")?;
            self.store.write(ArtifactKind::Feedback, &key, &json)?;
            info!("Feedback persisted for turn {}", key);
        }

        Ok(AnalysisOutcome {
            feedback,
            raw_feedback,
        })
    }
}
