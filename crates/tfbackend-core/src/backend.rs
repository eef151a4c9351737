//! Terraform backend configuration document

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `backend "gcs"` block for a state bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub bucket: String,
    pub prefix: String,
}

impl BackendConfig {
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            r#"terraform {{
  backend "gcs" {{
    bucket  = "{}"
    prefix  = "{}"
  }}
}}
"#,
            self.bucket, self.prefix
        )
    }

    /// Write the rendered block, replacing any existing file
    pub fn write_to(&self, path: &Path) -> Result<(), BackendError> {
        std::fs::write(path, self.render()).map_err(|source| BackendError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Wrote backend configuration");
        Ok(())
    }
}
