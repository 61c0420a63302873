use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::key::TimestampKey;
use crate::config::StorageConfig;
use crate::error::PipelineError;

/// Extension assumed for a recording when the client filename carries none.
pub const DEFAULT_EXTENSION: &str = "webm";

/// The artifact kinds that make up one interview turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Uploaded audio (`recording_{key}.{ext}`)
    Recording,
    /// Plain-text transcript (`transcript_{key}.txt`)
    TranscriptText,
    /// SRT subtitles (`transcript_{key}.srt`)
    TranscriptSubtitles,
    /// Question + filename metadata for the turn (`metadata_{key}.json`)
    TurnMetadata,
    /// Raw + parsed coaching feedback (`feedback_{key}.json`)
    Feedback,
}

impl ArtifactKind {
    fn prefix(self) -> &'static str {
        match self {
            ArtifactKind::Recording => "recording",
            ArtifactKind::TranscriptText | ArtifactKind::TranscriptSubtitles => "transcript",
            ArtifactKind::TurnMetadata => "metadata",
            ArtifactKind::Feedback => "feedback",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Recording => DEFAULT_EXTENSION,
            ArtifactKind::TranscriptText => "txt",
            ArtifactKind::TranscriptSubtitles => "srt",
            ArtifactKind::TurnMetadata | ArtifactKind::Feedback => "json",
        }
    }
}

/// A recording found on disk, with the key recovered from its filename.
#[derive(Debug, Clone)]
pub struct RecordingEntry {
    pub file_name: String,
    pub key: TimestampKey,
}

/// Maps (artifact kind, key) pairs to files under three sibling root
/// directories. The store is the exclusive owner of these paths; artifacts
/// are write-once per key, with same-key writes overwriting (no atomic
/// rename, best-effort persistence).
pub struct ArtifactStore {
    recordings_dir: PathBuf,
    transcripts_dir: PathBuf,
    feedback_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store, creating the root directories if absent. Roots are
    /// canonicalized so every reported artifact path is absolute.
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let store = Self {
            recordings_dir: prepare_root(&config.recordings_dir)?,
            transcripts_dir: prepare_root(&config.transcripts_dir)?,
            feedback_dir: prepare_root(&config.feedback_dir)?,
        };

        info!(
            "Artifact store ready: recordings={:?}, transcripts={:?}, feedback={:?}",
            store.recordings_dir, store.transcripts_dir, store.feedback_dir
        );

        Ok(store)
    }

    /// Root directory an artifact kind lives under.
    pub fn root_for(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Recording => &self.recordings_dir,
            ArtifactKind::TranscriptText
            | ArtifactKind::TranscriptSubtitles
            | ArtifactKind::TurnMetadata => &self.transcripts_dir,
            ArtifactKind::Feedback => &self.feedback_dir,
        }
    }

    /// Templated filename for an artifact: `{prefix}_{key}.{ext}`.
    pub fn file_name(kind: ArtifactKind, key: &TimestampKey) -> String {
        format!("{}_{}.{}", kind.prefix(), key, kind.extension())
    }

    /// Recording filename preserving the upload's original extension.
    pub fn recording_file_name(key: &TimestampKey, extension: &str) -> String {
        format!("recording_{}.{}", key, extension)
    }

    /// Deterministic path for an artifact. Pure string templating; the file
    /// need not exist.
    pub fn path_for(&self, kind: ArtifactKind, key: &TimestampKey) -> PathBuf {
        self.root_for(kind).join(Self::file_name(kind, key))
    }

    /// Write an artifact, overwriting any existing file at that path.
    pub fn write(&self, kind: ArtifactKind, key: &TimestampKey, contents: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(kind, key);
        self.write_at(path, contents)
    }

    /// Write the audio artifact with the upload's original extension.
    pub fn write_recording(
        &self,
        key: &TimestampKey,
        extension: &str,
        contents: &[u8],
    ) -> Result<PathBuf> {
        let path = self
            .recordings_dir
            .join(Self::recording_file_name(key, extension));
        self.write_at(path, contents)
    }

    fn write_at(&self, path: PathBuf, contents: &[u8]) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write artifact: {:?}", path))?;

        info!("Artifact saved: {:?} ({} bytes)", path, contents.len());

        Ok(path)
    }

    /// Whether the artifact for (kind, key) exists on disk.
    pub fn exists(&self, kind: ArtifactKind, key: &TimestampKey) -> bool {
        self.path_for(kind, key).is_file()
    }

    /// Enumerate recordings. The recordings directory is the source of truth
    /// for which turns exist; transcript and feedback artifacts are probed
    /// by key via `exists`, never enumerated.
    pub fn list_recordings(&self) -> Result<Vec<RecordingEntry>> {
        let mut entries = Vec::new();

        let dir = fs::read_dir(&self.recordings_dir)
            .with_context(|| format!("Failed to read directory: {:?}", self.recordings_dir))?;

        for entry in dir {
            let entry = entry.context("Failed to read directory entry")?;
            if !entry.path().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();

            // Recover the key by stripping the known prefix and extension.
            let stem = file_name
                .strip_prefix("recording_")
                .unwrap_or(file_name.as_str());
            let key_part = stem.rsplit_once('.').map(|(k, _)| k).unwrap_or(stem);

            entries.push(RecordingEntry {
                key: TimestampKey::from_raw(key_part),
                file_name,
            });
        }

        // Keys are sortable; present oldest first.
        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));

        Ok(entries)
    }

    /// Resolve a client-supplied filename inside a kind's root for download.
    /// The name is sanitized to its last path component before resolution and
    /// never escapes the root; absent or rejected names are NotFound.
    pub fn resolve_download(
        &self,
        kind: ArtifactKind,
        client_name: &str,
    ) -> Result<PathBuf, PipelineError> {
        let safe = sanitize_file_name(client_name)
            .ok_or_else(|| PipelineError::not_found(client_name))?;

        let path = self.root_for(kind).join(&safe);
        if path.is_file() {
            Ok(path)
        } else {
            Err(PipelineError::not_found(safe))
        }
    }
}

fn prepare_root(dir: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create artifact directory: {}", dir))?;
    fs::canonicalize(dir).with_context(|| format!("Failed to resolve artifact directory: {}", dir))
}

/// Reduce a client-supplied filename to a safe basename: the last path
/// component, restricted to ASCII alphanumerics plus `._-`, with leading and
/// trailing dots stripped. Returns None when nothing safe remains.
fn sanitize_file_name(name: &str) -> Option<String> {
    let normalized = name.replace('\\', "/");
    let candidate = normalized.rsplit('/').next().unwrap_or("");

    let cleaned: String = candidate
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
