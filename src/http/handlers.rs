use super::state::AppState;
use crate::error::PipelineError;
use crate::feedback::FeedbackRecord;
use crate::pipeline::UploadOutcome;
use crate::storage::{ArtifactKind, ArtifactStore, TimestampKey};
use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub audio_file: String,
    pub transcript_file: String,
    pub srt_file: String,
    pub transcript_text: String,
    pub audio_path: String,
    pub transcript_path: String,
    pub srt_path: String,
    pub timestamp: TimestampKey,
    pub question: String,
}

impl From<UploadOutcome> for UploadResponse {
    fn from(outcome: UploadOutcome) -> Self {
        Self {
            success: true,
            message: "Recording uploaded and transcribed successfully".to_string(),
            audio_file: outcome.audio_file,
            transcript_file: outcome.transcript_file,
            srt_file: outcome.srt_file,
            transcript_text: outcome.transcript_text,
            audio_path: outcome.audio_path.display().to_string(),
            transcript_path: outcome.transcript_path.display().to_string(),
            srt_path: outcome.srt_path.display().to_string(),
            timestamp: outcome.timestamp,
            question: outcome.question,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub question: Option<String>,
    pub transcript: Option<String>,
    /// Timestamp key of the turn being analyzed; feedback is persisted only
    /// when present.
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub feedback: FeedbackRecord,
    pub raw_feedback: String,
}

#[derive(Debug, Serialize)]
pub struct RecordingListEntry {
    pub audio_file: String,
    pub txt_file: Option<String>,
    pub srt_file: Option<String>,
    pub feedback_file: Option<String>,
    pub timestamp: TimestampKey,
}

#[derive(Debug, Serialize)]
pub struct RecordingsResponse {
    pub recordings: Vec<RecordingListEntry>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub recordings_folder: String,
    pub transcripts_folder: String,
    pub feedback_folder: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Error mapping
// ============================================================================

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn pipeline_error_response(err: PipelineError) -> Response {
    let status = match &err {
        PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
        PipelineError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PipelineError::NotFound(_) => StatusCode::NOT_FOUND,
        PipelineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {}", err);
    }

    error_response(status, err.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /upload-recording
/// Receive an answer recording (multipart form), persist it and transcribe it
pub async fn upload_recording(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let mut audio: Option<(String, Vec<u8>)> = None;
    let mut question = "Unknown question".to_string();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Malformed multipart body: {}", e),
                )
            }
        };

        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "audio" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(bytes) => audio = Some((file_name, bytes.to_vec())),
                    Err(e) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("Failed to read audio field: {}", e),
                        )
                    }
                }
            }
            "question" => {
                if let Ok(text) = field.text().await {
                    question = text;
                }
            }
            _ => {}
        }
    }

    let Some((file_name, bytes)) = audio else {
        return error_response(StatusCode::BAD_REQUEST, "No audio file provided");
    };

    match state
        .pipeline
        .upload_recording(&file_name, &question, &bytes)
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(UploadResponse::from(outcome))).into_response(),
        Err(e) => pipeline_error_response(e),
    }
}

/// POST /analyze-response
/// Produce structured coaching feedback for a question/transcript pair
pub async fn analyze_response(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let question = req.question.unwrap_or_default();
    let transcript = req.transcript.unwrap_or_default();
    let key = req.timestamp.map(TimestampKey::from_raw);

    match state
        .pipeline
        .analyze_response(&question, &transcript, key)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                success: true,
                feedback: outcome.feedback,
                raw_feedback: outcome.raw_feedback,
            }),
        )
            .into_response(),
        Err(e) => pipeline_error_response(e),
    }
}

/// GET /download-audio/:filename
/// Download a recording as an attachment
pub async fn download_audio(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    serve_download(&state, ArtifactKind::Recording, &filename).await
}

/// GET /download-transcript/:filename
/// Download a transcript (txt/srt/metadata) as an attachment
pub async fn download_transcript(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    serve_download(&state, ArtifactKind::TranscriptText, &filename).await
}

async fn serve_download(state: &AppState, kind: ArtifactKind, filename: &str) -> Response {
    let path = match state.store.resolve_download(kind, filename) {
        Ok(path) => path,
        Err(e) => return pipeline_error_response(e),
    };

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        // Deleted between resolution and read
        Err(_) => return pipeline_error_response(PipelineError::not_found(filename)),
    };

    let attachment_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    (
        [
            (
                header::CONTENT_TYPE,
                "application/octet-stream".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", attachment_name),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// GET /list-recordings
/// Enumerate recorded turns and report which artifacts exist for each
pub async fn list_recordings(State(state): State<AppState>) -> Response {
    let entries = match state.store.list_recordings() {
        Ok(entries) => entries,
        Err(e) => return pipeline_error_response(PipelineError::Internal(e)),
    };

    let recordings: Vec<RecordingListEntry> = entries
        .into_iter()
        .map(|entry| {
            let key = &entry.key;
            let probe = |kind| {
                state
                    .store
                    .exists(kind, key)
                    .then(|| ArtifactStore::file_name(kind, key))
            };

            RecordingListEntry {
                audio_file: entry.file_name,
                txt_file: probe(ArtifactKind::TranscriptText),
                srt_file: probe(ArtifactKind::TranscriptSubtitles),
                feedback_file: probe(ArtifactKind::Feedback),
                timestamp: entry.key,
            }
        })
        .collect();

    let count = recordings.len();

    (
        StatusCode::OK,
        Json(RecordingsResponse { recordings, count }),
    )
        .into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "running".to_string(),
            recordings_folder: state
                .store
                .root_for(ArtifactKind::Recording)
                .display()
                .to_string(),
            transcripts_folder: state
                .store
                .root_for(ArtifactKind::TranscriptText)
                .display()
                .to_string(),
            feedback_folder: state
                .store
                .root_for(ArtifactKind::Feedback)
                .display()
                .to_string(),
        }),
    )
        .into_response()
}
