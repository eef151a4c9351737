//! CheckPrerequisites: client installed and operator authenticated

use crate::machine::Provisioner;
use crate::prompt::Tone;
use crate::state::ProvisionState;
use tfbackend_cloud::AuthStatus;

pub(crate) fn handle(p: &mut Provisioner<'_>) -> ProvisionState {
    p.prompter.notify(Tone::Heading, "--- Checking Prerequisites ---");

    if !p.control_plane.is_installed() {
        p.prompter.notify(
            Tone::Error,
            "Error: 'gcloud' CLI is not installed or not in your system's PATH.",
        );
        return ProvisionState::Terminal;
    }

    if !is_authenticated(p) {
        p.prompter
            .notify(Tone::Warning, "You are not logged into gcloud.");

        match p.prompter.confirm("Would you like to log in now?") {
            Ok(true) => {}
            Ok(false) | Err(_) => return ProvisionState::Terminal,
        }

        if let Err(e) = p.control_plane.login() {
            tracing::warn!("Login command failed: {}", e);
        }

        if !is_authenticated(p) {
            p.prompter
                .notify(Tone::Error, "Login failed or was cancelled. Exiting.");
            return ProvisionState::Terminal;
        }
    }

    p.prompter.notify(
        Tone::Success,
        "✔ gcloud is installed and you are authenticated.",
    );
    ProvisionState::SelectProject
}

fn is_authenticated(p: &Provisioner<'_>) -> bool {
    let status = p
        .control_plane
        .check_auth()
        .unwrap_or_else(|e| AuthStatus::failed(e.to_string()));

    if let Some(error) = &status.error {
        tracing::debug!("Not authenticated: {}", error);
    }
    status.authenticated
}
