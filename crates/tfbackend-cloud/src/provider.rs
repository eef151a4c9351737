//! Control-plane trait definition

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Control-plane abstraction trait
///
/// Every call blocks until the provider answers. Implementations must keep
/// the conflict class (`CloudError::AlreadyExists`) distinguishable from
/// every other failure of `create_bucket`.
pub trait ControlPlane {
    /// Returns the provider name (e.g., "gcp")
    fn name(&self) -> &str;

    /// Whether the provider's client binary can be executed at all
    fn is_installed(&self) -> bool;

    /// Current active project, `None` when unset
    fn active_project(&self) -> Result<Option<String>>;

    /// Switch the process-wide active project
    fn set_active_project(&self, project_id: &str) -> Result<()>;

    /// Check whether an identity is authenticated
    fn check_auth(&self) -> Result<AuthStatus>;

    /// Run the provider's interactive login flow
    fn login(&self) -> Result<()>;

    fn list_projects(&self) -> Result<Vec<ProjectInfo>>;

    fn create_project(&self, project_id: &str, display_name: &str) -> Result<()>;

    fn list_billing_accounts(&self) -> Result<Vec<BillingAccount>>;

    fn link_billing(&self, project_id: &str, account_id: &str) -> Result<()>;

    fn describe_billing(&self, project_id: &str) -> Result<BillingInfo>;

    fn list_buckets(&self, project_id: &str) -> Result<Vec<BucketInfo>>;

    /// Create a bucket; a taken name fails with `CloudError::AlreadyExists`
    fn create_bucket(&self, spec: &BucketSpec) -> Result<()>;

    /// Delete a bucket and its contents (irreversible)
    fn delete_bucket(&self, name: &str) -> Result<()>;

    /// Move a bucket to a new name
    fn move_bucket(&self, from: &str, to: &str) -> Result<()>;

    /// Turn on object versioning for a bucket
    fn enable_versioning(&self, name: &str, project_id: &str) -> Result<()>;
}

/// Authentication status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether authentication is valid
    pub authenticated: bool,

    /// Active account if available
    pub account: Option<String>,

    /// Error message if not authenticated
    pub error: Option<String>,
}

impl AuthStatus {
    pub fn ok(account: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account: Some(account.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            account: None,
            error: Some(error.into()),
        }
    }
}

/// Project visible to the authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_id: String,
    pub name: String,
}

impl ProjectInfo {
    pub fn new(project_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
        }
    }
}

/// Billing account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAccount {
    /// Bare account id (e.g. `0123AB-4567CD-89EF01`)
    pub id: String,
    pub display_name: String,
    pub open: bool,
}

/// Billing status of a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingInfo {
    pub enabled: bool,
    pub account_id: Option<String>,
}

/// Existing bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    pub name: String,
    pub location: Option<String>,
}

/// Parameters for bucket creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSpec {
    pub name: String,
    pub project_id: String,
    pub location: String,
    pub uniform_access: bool,
}

impl BucketSpec {
    /// Bucket spec with uniform bucket-level access enabled
    pub fn uniform(
        name: impl Into<String>,
        project_id: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            project_id: project_id.into(),
            location: location.into(),
            uniform_access: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_status() {
        let ok = AuthStatus::ok("ops@example.com");
        assert!(ok.authenticated);
        assert_eq!(ok.account.as_deref(), Some("ops@example.com"));

        let failed = AuthStatus::failed("no credentialed accounts");
        assert!(!failed.authenticated);
        assert!(failed.account.is_none());
    }

    #[test]
    fn test_bucket_spec_uniform() {
        let spec = BucketSpec::uniform("demo-tfstate", "demo", "europe-west4");
        assert!(spec.uniform_access);
        assert_eq!(spec.project_id, "demo");
    }
}
