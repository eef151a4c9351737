//! gcloud CLI wrapper
//!
//! Wraps the gcloud CLI commands the bootstrap workflow needs. Every call
//! blocks until gcloud exits; success is taken from the exit status.

use crate::error::{GcpError, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// gcloud CLI wrapper
pub struct Gcloud {
    binary: PathBuf,
}

impl Default for Gcloud {
    fn default() -> Self {
        Self::new("gcloud")
    }
}

impl Gcloud {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Check if gcloud can be executed
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Run a gcloud command and return stdout
    fn run_command(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        tracing::debug!("Running: gcloud {}", command);

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GcpError::GcloudNotFound,
                _ => GcpError::IoError(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(status = ?output.status.code(), "gcloud {} failed", command);
            return Err(GcpError::CommandFailed { command, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run a gcloud command attached to the operator's terminal
    fn run_interactive(&self, args: &[&str]) -> Result<()> {
        let command = args.join(" ");
        tracing::debug!("Running (interactive): gcloud {}", command);

        let status = Command::new(&self.binary)
            .args(args)
            .status()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GcpError::GcloudNotFound,
                _ => GcpError::IoError(e),
            })?;

        if !status.success() {
            return Err(GcpError::CommandFailed {
                command,
                stderr: format!("exited with {}", status),
            });
        }
        Ok(())
    }

    fn run_json<T: serde::de::DeserializeOwned + Default>(&self, args: &[&str]) -> Result<T> {
        let output = self.run_command(args)?;
        if output.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&output)?)
    }

    // ========== Configuration ==========

    /// Read the configured project (`None` when unset)
    pub fn get_project(&self) -> Result<Option<String>> {
        let output = self.run_command(&["config", "get-value", "project"])?;
        Ok(parse_config_value(&output))
    }

    pub fn set_project(&self, project_id: &str) -> Result<()> {
        self.run_command(&["config", "set", "project", project_id])?;
        Ok(())
    }

    // ========== Authentication ==========

    /// List active credentialed accounts
    pub fn active_accounts(&self) -> Result<Vec<AuthAccount>> {
        self.run_json(&["auth", "list", "--filter=status:ACTIVE", "--format=json"])
    }

    pub fn login(&self) -> Result<()> {
        self.run_interactive(&["auth", "login"])
    }

    // ========== Projects ==========

    pub fn list_projects(&self) -> Result<Vec<ProjectEntry>> {
        self.run_json(&["projects", "list", "--format=json"])
    }

    pub fn create_project(&self, project_id: &str, name: &str) -> Result<()> {
        let name_arg = format!("--name={}", name);
        self.run_command(&["projects", "create", project_id, &name_arg])?;
        Ok(())
    }

    // ========== Billing ==========

    pub fn list_billing_accounts(&self) -> Result<Vec<BillingAccountEntry>> {
        self.run_json(&["beta", "billing", "accounts", "list", "--format=json"])
    }

    pub fn link_billing(&self, project_id: &str, account_id: &str) -> Result<()> {
        let account_arg = format!("--billing-account={}", account_id);
        self.run_command(&["beta", "billing", "projects", "link", project_id, &account_arg])?;
        Ok(())
    }

    pub fn describe_billing(&self, project_id: &str) -> Result<ProjectBillingInfo> {
        self.run_json(&[
            "beta",
            "billing",
            "projects",
            "describe",
            project_id,
            "--format=json",
        ])
    }

    // ========== Storage ==========

    pub fn list_buckets(&self, project_id: &str) -> Result<Vec<BucketEntry>> {
        let project_arg = format!("--project={}", project_id);
        self.run_json(&["storage", "buckets", "list", &project_arg, "--format=json"])
    }

    pub fn create_bucket(
        &self,
        name: &str,
        project_id: &str,
        location: &str,
        uniform_access: bool,
    ) -> Result<()> {
        let url = bucket_url(name);
        let project_arg = format!("--project={}", project_id);
        let location_arg = format!("--location={}", location);

        let mut args = vec![
            "storage",
            "buckets",
            "create",
            url.as_str(),
            project_arg.as_str(),
            location_arg.as_str(),
        ];
        if uniform_access {
            args.push("--uniform-bucket-level-access");
        }

        self.run_command(&args)?;
        Ok(())
    }

    pub fn delete_bucket(&self, name: &str) -> Result<()> {
        let url = bucket_url(name);
        self.run_command(&["storage", "buckets", "delete", &url, "--quiet"])?;
        Ok(())
    }

    pub fn move_bucket(&self, from: &str, to: &str) -> Result<()> {
        let from_url = bucket_url(from);
        let to_url = bucket_url(to);
        self.run_command(&["storage", "mv", &from_url, &to_url])?;
        Ok(())
    }

    pub fn enable_versioning(&self, name: &str, project_id: &str) -> Result<()> {
        let url = bucket_url(name);
        let project_arg = format!("--project={}", project_id);
        self.run_command(&["storage", "buckets", "update", &url, "--versioning", &project_arg])?;
        Ok(())
    }
}

/// `gs://` URL for a bucket name
pub fn bucket_url(name: &str) -> String {
    format!("gs://{}", name.trim_start_matches("gs://"))
}

/// Interpret `gcloud config get-value` output
fn parse_config_value(output: &str) -> Option<String> {
    let value = output.trim();
    if value.is_empty() || value == "(unset)" {
        None
    } else {
        Some(value.to_string())
    }
}

/// Credentialed account from `gcloud auth list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthAccount {
    pub account: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Project entry from `gcloud projects list`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub project_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lifecycle_state: Option<String>,
}

/// Billing account entry from `gcloud beta billing accounts list`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAccountEntry {
    /// Resource name (`billingAccounts/XXXXXX-XXXXXX-XXXXXX`)
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub open: bool,
}

impl BillingAccountEntry {
    /// Account id without the `billingAccounts/` prefix
    pub fn account_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Billing info from `gcloud beta billing projects describe`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBillingInfo {
    #[serde(default)]
    pub billing_enabled: bool,
    #[serde(default)]
    pub billing_account_name: Option<String>,
}

/// Bucket entry from `gcloud storage buckets list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketEntry {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}
