use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use super::{Transcriber, Transcript};
use crate::config::TranscriptionConfig;
use crate::error::PipelineError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Debug, Serialize)]
struct SubmitRequest {
    audio_url: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptJob {
    id: String,
    status: String,
    text: Option<String>,
    error: Option<String>,
}

/// AssemblyAI v2 REST client: upload the audio, submit a transcript job,
/// poll until it settles, then fetch the SRT export.
pub struct AssemblyAiTranscriber {
    client: Client,
    base_url: String,
    api_key: String,
    poll_interval: Duration,
}

impl AssemblyAiTranscriber {
    pub fn new(config: &TranscriptionConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    async fn upload_audio(&self, audio: &[u8]) -> Result<String, PipelineError> {
        let response = self
            .client
            .post(format!("{}/v2/upload", self.base_url))
            .header("authorization", &self.api_key)
            .body(audio.to_vec())
            .send()
            .await
            .context("Transcription upload request failed")?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::upstream(format!(
                "Transcription failed: audio upload rejected: {}",
                body
            )));
        }

        let upload: UploadResponse = response
            .json()
            .await
            .context("Failed to parse upload response")?;

        Ok(upload.upload_url)
    }

    async fn submit_job(&self, audio_url: String) -> Result<TranscriptJob, PipelineError> {
        let response = self
            .client
            .post(format!("{}/v2/transcript", self.base_url))
            .header("authorization", &self.api_key)
            .json(&SubmitRequest { audio_url })
            .send()
            .await
            .context("Transcript submit request failed")?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::upstream(format!(
                "Transcription failed: job submission rejected: {}",
                body
            )));
        }

        Ok(response
            .json()
            .await
            .context("Failed to parse transcript job")?)
    }

    /// Poll the job until it leaves the queued/processing states. No
    /// timeout: a hung backend hangs this request only.
    async fn wait_for_job(&self, id: &str) -> Result<TranscriptJob, PipelineError> {
        loop {
            let job: TranscriptJob = self
                .client
                .get(format!("{}/v2/transcript/{}", self.base_url, id))
                .header("authorization", &self.api_key)
                .send()
                .await
                .context("Transcript poll request failed")?
                .json()
                .await
                .context("Failed to parse transcript job")?;

            match job.status.as_str() {
                "queued" | "processing" => {
                    tokio::time::sleep(self.poll_interval).await;
                }
                _ => return Ok(job),
            }
        }
    }

    async fn fetch_subtitles(&self, id: &str) -> Result<String, PipelineError> {
        let response = self
            .client
            .get(format!("{}/v2/transcript/{}/srt", self.base_url, id))
            .header("authorization", &self.api_key)
            .send()
            .await
            .context("Subtitle export request failed")?;

        if !response.status().is_success() {
            // The transcript itself completed; a failed SRT export should
            // not discard it.
            warn!("Subtitle export failed with status {}", response.status());
            return Ok(String::new());
        }

        Ok(response
            .text()
            .await
            .context("Failed to read subtitle export")?)
    }
}

#[async_trait]
impl Transcriber for AssemblyAiTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Result<Transcript, PipelineError> {
        info!("Uploading {} bytes of audio for transcription", audio.len());
        let audio_url = self.upload_audio(audio).await?;

        let job = self.submit_job(audio_url).await?;
        info!("Transcript job {} submitted", job.id);

        let job = self.wait_for_job(&job.id).await?;

        if job.status != "completed" {
            let detail = job.error.unwrap_or_else(|| job.status.clone());
            return Err(PipelineError::upstream(format!(
                "Transcription failed: {}",
                detail
            )));
        }

        info!("Transcript job {} completed", job.id);
        let subtitles = self.fetch_subtitles(&job.id).await?;

        Ok(Transcript {
            text: job.text.unwrap_or_default(),
            subtitles,
        })
    }
}
