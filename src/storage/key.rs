use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Second-resolution timestamp key correlating all artifacts of one
/// interview turn (`YYYYMMDD_HHMMSS`).
///
/// Uniqueness holds only at >= 1-second request spacing; two uploads landing
/// within the same second share a key and overwrite each other's artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampKey(String);

impl TimestampKey {
    /// Generate a key from the current wall-clock time.
    pub fn generate() -> Self {
        Self(Local::now().format("%Y%m%d_%H%M%S").to_string())
    }

    /// Wrap a key received from a client (e.g. the `timestamp` field of an
    /// analyze request). No format validation is performed; the key only
    /// ever becomes part of a templated filename.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimestampKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_format() {
        let key = TimestampKey::generate();
        let s = key.as_str();

        // YYYYMMDD_HHMMSS
        assert_eq!(s.len(), 15);
        assert_eq!(&s[8..9], "_");
        assert!(s[..8].chars().all(|c| c.is_ascii_digit()));
        assert!(s[9..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_from_raw_round_trip() {
        let key = TimestampKey::from_raw("20250107_143000");
        assert_eq!(key.as_str(), "20250107_143000");
        assert_eq!(key.to_string(), "20250107_143000");
    }

    #[test]
    fn test_serde_transparent() {
        let key = TimestampKey::from_raw("20250107_143000");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"20250107_143000\"");

        let back: TimestampKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
