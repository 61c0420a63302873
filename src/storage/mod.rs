//! Flat-file artifact storage
//!
//! All artifacts of one interview turn (audio, transcript text, subtitles,
//! turn metadata, feedback) are correlated by a shared second-resolution
//! timestamp key encoded in the filename. The `ArtifactStore` is the only
//! component that touches the filesystem.

mod key;
mod store;

pub use key::TimestampKey;
pub use store::{ArtifactKind, ArtifactStore, RecordingEntry, DEFAULT_EXTENSION};
