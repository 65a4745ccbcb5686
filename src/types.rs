use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Server-allocated identifier for a profile record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub i64);

impl ProfileId {
    /// Create from a server-allocated id
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for one upload batch, used in logs and spans
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchId(pub String);

impl BatchId {
    /// Generate a new random batch ID
    pub fn new() -> Self {
        Self(format!("batch_{}", Uuid::new_v4().simple()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle to a user-selected image, immutable once captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub path: PathBuf,
}

impl AssetRef {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Filename hint derived from the path, if it has one
    pub fn file_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Lowercased extension, if the path has one
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

/// A resolved, ready-to-upload payload
#[derive(Debug, Clone)]
pub struct AssetPayload {
    pub bytes: Bytes,
    pub filename: String,
    pub content_type: String,
}

impl AssetPayload {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Terminal result for one submitted asset. Exactly one is produced per
/// asset, never zero, never more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Succeeded { location: String },
    Failed { reason: String },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Consolidated report for one batch, ordered by submission index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<UploadOutcome>,
}

impl BatchResult {
    /// Result of an empty batch: nothing submitted, nothing to report
    pub fn empty() -> Self {
        Self {
            succeeded: 0,
            failed: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// Terminal event for one registration: the new profile plus its batch report
#[derive(Debug, Clone)]
pub struct RegistrationReport {
    pub profile_id: ProfileId,
    pub batch: BatchResult,
}

/// Observable phase of a registration in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationPhase {
    Idle,
    CreatingProfile,
    UploadingPhotos,
    Failed,
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_ref_exposes_filename_and_extension() {
        let asset = AssetRef::new("/tmp/photos/Mimi_01.JPG");
        assert_eq!(asset.file_name().as_deref(), Some("Mimi_01.JPG"));
        assert_eq!(asset.extension().as_deref(), Some("jpg"));

        let bare = AssetRef::new("/tmp/photos/");
        assert_eq!(bare.extension(), None);
    }

    #[test]
    fn batch_ids_are_distinct() {
        assert_ne!(BatchId::new(), BatchId::new());
        assert!(BatchId::new().as_str().starts_with("batch_"));
    }
}
