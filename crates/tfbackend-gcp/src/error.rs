//! Google Cloud provider error types

use thiserror::Error;

const NO_ACTIVE_ACCOUNT: &str = "You do not currently have an active account selected";

#[derive(Error, Debug)]
pub enum GcpError {
    #[error(
        "gcloud not found. Please install the Google Cloud SDK: https://cloud.google.com/sdk/docs/install"
    )]
    GcloudNotFound,

    #[error("gcloud command failed: gcloud {command}\n{stderr}{}", auth_hint(.stderr))]
    CommandFailed { command: String, stderr: String },

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GcpError {
    /// stderr of a failed command, empty for other variants
    pub fn stderr(&self) -> &str {
        match self {
            GcpError::CommandFailed { stderr, .. } => stderr,
            _ => "",
        }
    }
}

fn auth_hint(stderr: &str) -> &'static str {
    if stderr.contains(NO_ACTIVE_ACCOUNT) {
        "\nHint: run `gcloud auth login` and try again"
    } else {
        ""
    }
}

/// Whether stderr of a failed create reports a resource we can act on
///
/// A bare 409 is not enough: GCS also answers 409 when the bucket name is
/// held by another account, and that bucket can be neither deleted nor
/// renamed from here.
pub fn is_conflict_message(stderr: &str) -> bool {
    let lower = stderr.to_lowercase();
    lower.contains("already exists") || lower.contains("you already own it")
}

impl From<GcpError> for tfbackend_cloud::CloudError {
    fn from(err: GcpError) -> Self {
        use tfbackend_cloud::CloudError;

        match err {
            GcpError::GcloudNotFound => CloudError::ClientNotFound(err.to_string()),
            GcpError::JsonError(e) => CloudError::Json(e),
            GcpError::IoError(e) => CloudError::Io(e),
            GcpError::CommandFailed { ref stderr, .. } => {
                let message = err.to_string();
                let lower = stderr.to_lowercase();
                if is_conflict_message(stderr) {
                    CloudError::AlreadyExists(message)
                } else if stderr.contains(NO_ACTIVE_ACCOUNT) {
                    CloudError::NotAuthenticated(message)
                } else if lower.contains("not found") || lower.contains("httperror 404") {
                    CloudError::NotFound(message)
                } else if lower.contains("permission") || lower.contains("httperror 403") {
                    CloudError::PermissionDenied(message)
                } else {
                    CloudError::CommandFailed(message)
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GcpError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tfbackend_cloud::CloudError;

    fn failed(stderr: &str) -> GcpError {
        GcpError::CommandFailed {
            command: "storage buckets create gs://demo".to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[test]
    fn test_conflict_messages() {
        assert!(is_conflict_message(
            "ERROR: (gcloud.storage.buckets.create) HTTPError 409: Your previous request to create the named bucket succeeded and you already own it."
        ));
        assert!(is_conflict_message(
            "ERROR: The requested bucket name already exists"
        ));
        assert!(!is_conflict_message(
            "ERROR: (gcloud.storage.buckets.create) HTTPError 403: permission denied"
        ));
    }

    #[test]
    fn test_classify_conflict() {
        let err: CloudError = failed("HTTPError 409: bucket already exists").into();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_name_owned_elsewhere_is_not_a_conflict() {
        let stderr = "ERROR: (gcloud.storage.buckets.create) HTTPError 409: The requested bucket \
                      name is not available. The bucket namespace is shared by all users of the \
                      system. Please select a different name and try again.";
        assert!(!is_conflict_message(stderr));

        let err: CloudError = failed(stderr).into();
        assert!(!err.is_conflict());
        assert!(matches!(err, CloudError::CommandFailed(_)));
    }

    #[test]
    fn test_classify_other_failures() {
        let err: CloudError = failed("HTTPError 403: caller does not have permission").into();
        assert!(matches!(err, CloudError::PermissionDenied(_)));

        let err: CloudError = failed("HTTPError 404: bucket not found").into();
        assert!(matches!(err, CloudError::NotFound(_)));

        let err: CloudError = failed("invalid location").into();
        assert!(matches!(err, CloudError::CommandFailed(_)));

        let err: CloudError = GcpError::GcloudNotFound.into();
        assert!(matches!(err, CloudError::ClientNotFound(_)));
    }

    #[test]
    fn test_auth_hint() {
        let err = failed(
            "ERROR: (gcloud.projects.list) You do not currently have an active account selected.",
        );
        assert!(err.to_string().contains("gcloud auth login"));

        let cloud: CloudError = err.into();
        assert!(matches!(cloud, CloudError::NotAuthenticated(_)));

        assert!(!failed("boom").to_string().contains("Hint"));
    }
}
