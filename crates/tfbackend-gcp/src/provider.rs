//! Google Cloud control-plane implementation

use crate::gcloud::Gcloud;
use tfbackend_cloud::{
    AuthStatus, BillingAccount, BillingInfo, BucketInfo, BucketSpec, ControlPlane, ProjectInfo,
};

/// Google Cloud control plane backed by the gcloud CLI
#[derive(Default)]
pub struct GcpControlPlane {
    gcloud: Gcloud,
}

impl GcpControlPlane {
    pub fn new(gcloud: Gcloud) -> Self {
        Self { gcloud }
    }

    pub fn gcloud(&self) -> &Gcloud {
        &self.gcloud
    }
}

impl ControlPlane for GcpControlPlane {
    fn name(&self) -> &str {
        "gcp"
    }

    fn is_installed(&self) -> bool {
        self.gcloud.is_available()
    }

    fn active_project(&self) -> tfbackend_cloud::Result<Option<String>> {
        Ok(self.gcloud.get_project()?)
    }

    fn set_active_project(&self, project_id: &str) -> tfbackend_cloud::Result<()> {
        Ok(self.gcloud.set_project(project_id)?)
    }

    fn check_auth(&self) -> tfbackend_cloud::Result<AuthStatus> {
        let accounts = match self.gcloud.active_accounts() {
            Ok(accounts) => accounts,
            Err(e) => return Ok(AuthStatus::failed(e.to_string())),
        };

        match accounts.into_iter().next() {
            Some(account) => Ok(AuthStatus::ok(account.account)),
            None => Ok(AuthStatus::failed("No active credentialed account")),
        }
    }

    fn login(&self) -> tfbackend_cloud::Result<()> {
        Ok(self.gcloud.login()?)
    }

    fn list_projects(&self) -> tfbackend_cloud::Result<Vec<ProjectInfo>> {
        let projects = self.gcloud.list_projects()?;
        Ok(projects
            .into_iter()
            .map(|p| {
                let name = p.name.unwrap_or_else(|| p.project_id.clone());
                ProjectInfo::new(p.project_id, name)
            })
            .collect())
    }

    fn create_project(&self, project_id: &str, display_name: &str) -> tfbackend_cloud::Result<()> {
        tracing::info!("Creating project: {}", project_id);
        Ok(self.gcloud.create_project(project_id, display_name)?)
    }

    fn list_billing_accounts(&self) -> tfbackend_cloud::Result<Vec<BillingAccount>> {
        let accounts = self.gcloud.list_billing_accounts()?;
        Ok(accounts
            .into_iter()
            .map(|a| BillingAccount {
                id: a.account_id().to_string(),
                display_name: a.display_name.clone().unwrap_or_default(),
                open: a.open,
            })
            .collect())
    }

    fn link_billing(&self, project_id: &str, account_id: &str) -> tfbackend_cloud::Result<()> {
        tracing::info!("Linking billing account {} to {}", account_id, project_id);
        Ok(self.gcloud.link_billing(project_id, account_id)?)
    }

    fn describe_billing(&self, project_id: &str) -> tfbackend_cloud::Result<BillingInfo> {
        let info = self.gcloud.describe_billing(project_id)?;
        Ok(BillingInfo {
            enabled: info.billing_enabled,
            account_id: info
                .billing_account_name
                .filter(|name| !name.is_empty())
                .map(|name| name.rsplit('/').next().unwrap_or(&name).to_string()),
        })
    }

    fn list_buckets(&self, project_id: &str) -> tfbackend_cloud::Result<Vec<BucketInfo>> {
        let buckets = self.gcloud.list_buckets(project_id)?;
        Ok(buckets
            .into_iter()
            .map(|b| BucketInfo {
                name: b.name,
                location: b.location,
            })
            .collect())
    }

    fn create_bucket(&self, spec: &BucketSpec) -> tfbackend_cloud::Result<()> {
        tracing::info!("Creating bucket: gs://{}", spec.name);
        Ok(self.gcloud.create_bucket(
            &spec.name,
            &spec.project_id,
            &spec.location,
            spec.uniform_access,
        )?)
    }

    fn delete_bucket(&self, name: &str) -> tfbackend_cloud::Result<()> {
        tracing::warn!("Deleting bucket: gs://{}", name);
        Ok(self.gcloud.delete_bucket(name)?)
    }

    fn move_bucket(&self, from: &str, to: &str) -> tfbackend_cloud::Result<()> {
        tracing::info!("Moving bucket gs://{} to gs://{}", from, to);
        Ok(self.gcloud.move_bucket(from, to)?)
    }

    fn enable_versioning(&self, name: &str, project_id: &str) -> tfbackend_cloud::Result<()> {
        Ok(self.gcloud.enable_versioning(name, project_id)?)
    }
}
