//! Success: emit the backend configuration

use crate::backend::BackendConfig;
use crate::context::ProvisionContext;
use crate::machine::Provisioner;
use crate::prompt::Tone;
use crate::state::ProvisionState;

pub(crate) fn handle(p: &mut Provisioner<'_>, ctx: &mut ProvisionContext) -> ProvisionState {
    let Some(bucket_name) = ctx.bucket_name() else {
        tracing::warn!("Success entered without a bucket");
        return ProvisionState::Terminal;
    };

    let config = BackendConfig::new(bucket_name, p.settings.state_prefix.clone());
    let backend_file = p.settings.backend_file.clone();

    p.prompter
        .notify(Tone::Heading, "--- Terraform Configuration ---");
    p.prompter.notify(
        Tone::Info,
        "Your GCS backend is ready! Add the following block to your Terraform project:",
    );
    p.prompter.notify(Tone::Info, &config.render());

    let save = p.prompter.confirm(&format!(
        "Save this configuration to '{}'?",
        backend_file.display()
    ));
    if let Ok(true) = save {
        match config.write_to(&backend_file) {
            Ok(()) => p.prompter.notify(
                Tone::Success,
                &format!("✔ Saved to {}", backend_file.display()),
            ),
            Err(e) => p.prompter.notify(Tone::Error, &e.to_string()),
        }
    }

    p.prompter.notify(
        Tone::Success,
        "Setup complete! Run 'terraform init' in your project.",
    );
    ProvisionState::Terminal
}
