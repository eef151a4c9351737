//! LinkBilling and CheckBilling
//!
//! The two states form a loop: CheckBilling offers LinkBilling when billing
//! is off, and LinkBilling always hands back to CheckBilling for a fresh
//! describe instead of assuming the link took effect.

use crate::context::ProvisionContext;
use crate::machine::Provisioner;
use crate::prompt::Tone;
use crate::state::ProvisionState;

pub(crate) fn link(p: &mut Provisioner<'_>, ctx: &mut ProvisionContext) -> ProvisionState {
    let Some(project_id) = ctx.project_id().map(str::to_owned) else {
        tracing::warn!("LinkBilling entered without a project");
        return ProvisionState::SelectProject;
    };

    p.prompter.notify(
        Tone::Heading,
        &format!("--- Linking Billing Account to '{}' ---", project_id),
    );

    let accounts = match p.control_plane.list_billing_accounts() {
        Ok(accounts) => accounts,
        Err(e) => {
            p.prompter.notify(
                Tone::Error,
                &format!("Failed to list billing accounts: {}", e),
            );
            return ProvisionState::SelectProject;
        }
    };

    let Some(account) = accounts.iter().find(|a| a.open).or(accounts.first()) else {
        p.prompter.notify(Tone::Error, "No billing accounts found.");
        return ProvisionState::SelectProject;
    };

    tracing::debug!(account = %account.id, "Using billing account");

    match p.control_plane.link_billing(&project_id, &account.id) {
        Ok(()) => {
            p.prompter.notify(
                Tone::Info,
                &format!(
                    "Linked billing account {} ({}).",
                    account.display_name, account.id
                ),
            );
            ProvisionState::CheckBilling
        }
        Err(e) => {
            p.prompter.notify(Tone::Error, &e.to_string());
            p.prompter
                .notify(Tone::Error, "Failed to link billing account.");
            ProvisionState::SelectProject
        }
    }
}

pub(crate) fn check(p: &mut Provisioner<'_>, ctx: &mut ProvisionContext) -> ProvisionState {
    let Some(project_id) = ctx.project_id().map(str::to_owned) else {
        tracing::warn!("CheckBilling entered without a project");
        return ProvisionState::SelectProject;
    };

    p.prompter.notify(
        Tone::Heading,
        &format!("--- Verifying Billing for '{}' ---", project_id),
    );

    let enabled = match p.control_plane.describe_billing(&project_id) {
        Ok(info) => info.enabled,
        Err(e) => {
            tracing::warn!("Failed to describe billing for {}: {}", project_id, e);
            false
        }
    };

    if enabled {
        p.prompter.notify(Tone::Success, "✔ Billing is active.");
        if let Err(e) = p.control_plane.set_active_project(&project_id) {
            p.prompter.notify(
                Tone::Warning,
                &format!("Could not set '{}' as the active project: {}", project_id, e),
            );
        }
        return ProvisionState::GetBucketDetails;
    }

    p.prompter
        .notify(Tone::Error, "Billing is not enabled for this project.");

    match p
        .prompter
        .confirm("Would you like to attempt to enable billing now?")
    {
        Ok(true) => ProvisionState::LinkBilling,
        Ok(false) => ProvisionState::SelectProject,
        Err(_) => ProvisionState::Terminal,
    }
}
