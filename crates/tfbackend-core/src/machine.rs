//! State machine driver

use crate::context::ProvisionContext;
use crate::prompt::{Prompter, Tone};
use crate::state::ProvisionState;
use crate::states;
use tfbackend_cloud::ControlPlane;
use tfbackend_config::Settings;

/// Outcome of one workflow run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// States in the order they were entered, ending with `Terminal`
    pub visited: Vec<ProvisionState>,
}

impl RunReport {
    /// Whether the run passed through `Success`
    pub fn succeeded(&self) -> bool {
        self.visited.contains(&ProvisionState::Success)
    }

    /// Number of times a state was entered
    pub fn count(&self, state: ProvisionState) -> usize {
        self.visited.iter().filter(|s| **s == state).count()
    }
}

/// Drives the provisioning workflow
pub struct Provisioner<'a> {
    pub(crate) control_plane: &'a dyn ControlPlane,
    pub(crate) prompter: &'a mut dyn Prompter,
    pub(crate) settings: Settings,
}

impl<'a> Provisioner<'a> {
    pub fn new(
        control_plane: &'a dyn ControlPlane,
        prompter: &'a mut dyn Prompter,
        settings: Settings,
    ) -> Self {
        Self {
            control_plane,
            prompter,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the workflow from `initial` and restore the active project afterwards
    ///
    /// Cleanup runs exactly once, also when a handler panics.
    pub fn execute(&mut self, initial: ProvisionState, ctx: &mut ProvisionContext) -> RunReport {
        let scope = CleanupScope {
            provisioner: self,
            ctx,
        };
        scope.run(initial)
    }

    /// Run states until one yields `Terminal`
    pub fn run(&mut self, initial: ProvisionState, ctx: &mut ProvisionContext) -> RunReport {
        let mut report = RunReport::default();
        let mut current = initial;

        while !current.is_terminal() {
            report.visited.push(current);
            let next = self.handle(current, ctx);

            if !next.is_terminal() {
                tracing::info!(from = %current, to = %next, "Transition");
                self.prompter
                    .notify(Tone::Step, &format!("--> Transitioning to {}", next));
            } else {
                tracing::info!(from = %current, "Workflow finished");
            }
            current = next;
        }

        report.visited.push(ProvisionState::Terminal);
        report
    }

    fn handle(&mut self, state: ProvisionState, ctx: &mut ProvisionContext) -> ProvisionState {
        match state {
            ProvisionState::CheckPrerequisites => states::prerequisites::handle(self),
            ProvisionState::SelectProject => states::project::select(self, ctx),
            ProvisionState::CreateProject => states::project::create(self, ctx),
            ProvisionState::LinkBilling => states::billing::link(self, ctx),
            ProvisionState::CheckBilling => states::billing::check(self, ctx),
            ProvisionState::GetBucketDetails => states::bucket::details(self, ctx),
            ProvisionState::CreateBucket => states::bucket::create(self, ctx),
            ProvisionState::Success => states::success::handle(self, ctx),
            ProvisionState::Terminal => ProvisionState::Terminal,
        }
    }

    /// Restore the active project captured in `ctx`
    ///
    /// Failures are reported but never escalated. Once the project has been
    /// handed out, here or by an interrupt handler, later calls do nothing.
    pub fn cleanup(&mut self, ctx: &ProvisionContext) {
        let control_plane = self.control_plane;
        let restored = ctx.original().restore_with(|original| {
            (original.to_string(), control_plane.set_active_project(original))
        });
        let Some((original, result)) = restored else {
            tracing::debug!("No original project to restore");
            return;
        };

        match result {
            Ok(()) => {
                tracing::info!(project = %original, "Restored active project");
                self.prompter.notify(
                    Tone::Info,
                    &format!(
                        "Restored original gcloud project configuration to '{}'.",
                        original
                    ),
                );
            }
            Err(e) => {
                tracing::warn!(project = %original, "Failed to restore active project: {}", e);
                self.prompter.notify(
                    Tone::Warning,
                    &format!(
                        "Could not restore the original gcloud project '{}': {}",
                        original, e
                    ),
                );
            }
        }
    }
}

/// Runs cleanup when dropped, whatever way the run ends
struct CleanupScope<'s, 'a> {
    provisioner: &'s mut Provisioner<'a>,
    ctx: &'s mut ProvisionContext,
}

impl CleanupScope<'_, '_> {
    fn run(mut self, initial: ProvisionState) -> RunReport {
        self.provisioner.run(initial, self.ctx)
    }
}

impl Drop for CleanupScope<'_, '_> {
    fn drop(&mut self) {
        self.provisioner.cleanup(self.ctx);
    }
}
