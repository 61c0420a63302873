use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub transcription: TranscriptionConfig,
    pub completion: CompletionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Root directories for the three artifact kinds. Created at startup if
/// absent.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub recordings_dir: String,
    pub transcripts_dir: String,
    pub feedback_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionConfig {
    pub base_url: String,
    pub api_key: String,
    /// Delay between transcript status polls, in milliseconds
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Sent as HTTP-Referer (OpenRouter attribution)
    pub referer: String,
    /// Sent as X-Title (OpenRouter attribution)
    pub app_title: String,
}

impl Config {
    /// Load configuration from a file, with INTERVIEW_COACH__* environment
    /// variables layered on top (e.g. INTERVIEW_COACH__COMPLETION__API_KEY).
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("INTERVIEW_COACH").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
