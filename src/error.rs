use thiserror::Error;

/// Result type for profile registration and upload operations
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors that can occur while registering a profile or uploading its photos
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Profile creation failed: {message}")]
    ProfileCreation { message: String },

    #[error("Profile not found: {id}")]
    ProfileNotFound { id: i64 },

    #[error("Unreadable source: {reason}")]
    Resolution { reason: String },

    #[error("Upload transport error: {reason}")]
    Transport { reason: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
}

impl UploadError {
    /// Create a profile creation error
    pub fn profile_creation<S: Into<String>>(message: S) -> Self {
        Self::ProfileCreation {
            message: message.into(),
        }
    }

    /// Create a profile not found error
    pub fn profile_not_found(id: i64) -> Self {
        Self::ProfileNotFound { id }
    }

    /// Create an asset resolution error
    pub fn resolution<S: Into<String>>(reason: S) -> Self {
        Self::Resolution {
            reason: reason.into(),
        }
    }

    /// Create an upload transport error
    pub fn transport<S: Into<String>>(reason: S) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }
}
