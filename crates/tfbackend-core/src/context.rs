//! Provisioning context threaded through every state

use std::sync::{Arc, Mutex, PoisonError};
use tfbackend_cloud::ControlPlane;

/// The project that was active before the run, restorable exactly once
///
/// Clones share the slot, so an interrupt handler on another thread and
/// the normal cleanup path race for a single restore.
#[derive(Debug, Clone, Default)]
pub struct OriginalProject(Arc<Mutex<Option<String>>>);

impl OriginalProject {
    /// Blank names count as no project
    pub fn new(project: Option<String>) -> Self {
        Self(Arc::new(Mutex::new(project.filter(|p| !p.trim().is_empty()))))
    }

    /// The project still waiting to be restored
    pub fn pending(&self) -> Option<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Hand the project to `restore` unless it was already taken
    ///
    /// The slot stays locked while `restore` runs, so a concurrent caller
    /// waits for it and then finds nothing left to do.
    pub fn restore_with<R>(&self, restore: impl FnOnce(&str) -> R) -> Option<R> {
        let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        let project = slot.take()?;
        Some(restore(&project))
    }
}

/// Accumulated selections of one workflow run
///
/// `original` is captured once at construction and only consumed by
/// cleanup. The other fields are filled in as the workflow advances.
#[derive(Debug, Clone, Default)]
pub struct ProvisionContext {
    original: OriginalProject,
    project_id: Option<String>,
    bucket_name: Option<String>,
    location: Option<String>,
}

impl ProvisionContext {
    pub fn new(original_project: Option<String>) -> Self {
        Self {
            original: OriginalProject::new(original_project),
            ..Self::default()
        }
    }

    /// Capture the control plane's active project as the value to restore
    pub fn capture(control_plane: &dyn ControlPlane) -> Self {
        let original = match control_plane.active_project() {
            Ok(project) => project,
            Err(e) => {
                tracing::debug!("Could not read active project: {}", e);
                None
            }
        };
        tracing::debug!(original = ?original, "Captured active project");
        Self::new(original)
    }

    /// The captured project, if it has not been restored yet
    pub fn original_project(&self) -> Option<String> {
        self.original.pending()
    }

    /// Shared handle for restoring the captured project from elsewhere
    pub fn original(&self) -> &OriginalProject {
        &self.original
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn bucket_name(&self) -> Option<&str> {
        self.bucket_name.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub(crate) fn select_project(&mut self, project_id: impl Into<String>) {
        self.project_id = Some(project_id.into());
    }

    pub(crate) fn set_bucket(&mut self, name: impl Into<String>, location: impl Into<String>) {
        self.bucket_name = Some(name.into());
        self.location = Some(location.into());
    }

    /// Drop everything chosen after the capture, keeping the original project
    pub(crate) fn discard_selection(&mut self) {
        self.project_id = None;
        self.bucket_name = None;
        self.location = None;
    }
}
