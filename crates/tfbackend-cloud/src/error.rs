//! Control-plane error types

use thiserror::Error;

/// Control-plane errors
///
/// `AlreadyExists` is the conflict class: the only failure the bucket
/// creation step offers to resolve interactively.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Control-plane client not found: {0}")]
    ClientNotFound(String),

    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("Resource already exists: {0}")]
    AlreadyExists(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Whether the failure means the target name is already taken
    pub fn is_conflict(&self) -> bool {
        matches!(self, CloudError::AlreadyExists(_))
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
