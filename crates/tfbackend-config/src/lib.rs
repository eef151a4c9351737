pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file directly
pub const CONFIG_ENV: &str = "TFBACKEND_CONFIG";

pub const DEFAULT_LOCATION: &str = "europe-west4";
pub const DEFAULT_BUCKET_SUFFIX: &str = "-tfstate";
pub const DEFAULT_BACKEND_FILE: &str = "backend.tf";
pub const DEFAULT_STATE_PREFIX: &str = "terraform/state";

/// Effective settings for a bootstrap run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Location offered when the operator leaves the prompt empty
    pub default_location: String,
    /// Appended to the project id to suggest a bucket name
    pub bucket_suffix: String,
    /// Where the backend configuration is written
    pub backend_file: PathBuf,
    /// State path prefix inside the bucket
    pub state_prefix: String,
    /// gcloud executable
    pub gcloud_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            bucket_suffix: DEFAULT_BUCKET_SUFFIX.to_string(),
            backend_file: PathBuf::from(DEFAULT_BACKEND_FILE),
            state_prefix: DEFAULT_STATE_PREFIX.to_string(),
            gcloud_path: PathBuf::from("gcloud"),
        }
    }
}

impl Settings {
    /// Parse settings from a YAML file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_location.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "default_location",
                message: "must not be empty".to_string(),
            });
        }
        if self.state_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "state_prefix",
                message: "must not be empty".to_string(),
            });
        }
        if self.backend_file.as_os_str().is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "backend_file",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Suggested bucket name for a project
    pub fn suggested_bucket(&self, project_id: &str) -> String {
        format!("{}{}", project_id, self.bucket_suffix)
    }
}

/// tfbackend's global config directory (`~/.config/tfbackend`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tfbackend"))
}

/// Locate the settings file
///
/// Search order:
/// 1. Environment variable TFBACKEND_CONFIG (must exist when set)
/// 2. Current directory: tfbackend.yaml, .tfbackend.yaml
/// 3. ~/.config/tfbackend/config.yaml
///
/// Returns `Ok(None)` when no file is found; defaults apply then.
pub fn find_config_file() -> Result<Option<PathBuf>> {
    if let Ok(config_path) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(config_path);
        if !path.exists() {
            return Err(ConfigError::ConfigFileMissing(path));
        }
        return Ok(Some(path));
    }

    let current_dir = std::env::current_dir()?;
    for filename in ["tfbackend.yaml", ".tfbackend.yaml"] {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    if let Some(dir) = config_dir() {
        let global_config = dir.join("config.yaml");
        if global_config.exists() {
            return Ok(Some(global_config));
        }
    }

    Ok(None)
}

/// Load settings from the discovered file, or defaults
pub fn load() -> Result<(Settings, Option<PathBuf>)> {
    match find_config_file()? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading settings");
            let settings = Settings::from_file(&path)?;
            Ok((settings, Some(path)))
        }
        None => {
            tracing::debug!("No settings file found, using defaults");
            Ok((Settings::default(), None))
        }
    }
}
