//! Ctrl-C handling
//!
//! Prompts read Ctrl-C as a cancelled answer and the run winds down through
//! normal cleanup. A SIGINT that arrives anywhere else, for example while a
//! gcloud command is running, is caught here: the original project is
//! restored and the process exits with [`INTERRUPTED_EXIT_CODE`].

use colored::Colorize;
use std::path::PathBuf;
use tfbackend_core::OriginalProject;
use tfbackend_gcp::Gcloud;

/// Exit status of a run stopped by SIGINT
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Subscribe to SIGINT and watch for it on a background thread
///
/// The subscription is in place when this returns.
pub fn install(original: OriginalProject, gcloud_path: PathBuf) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mut interrupt = {
        let _guard = runtime.enter();
        subscribe()?
    };

    std::thread::Builder::new()
        .name("sigint".into())
        .spawn(move || {
            if runtime.block_on(interrupt.recv()).is_none() {
                return;
            }
            tracing::warn!("Received SIGINT");
            restore(&original, &Gcloud::new(gcloud_path));
            std::process::exit(INTERRUPTED_EXIT_CODE);
        })?;

    tracing::debug!("SIGINT handler installed");
    Ok(())
}

#[cfg(unix)]
fn subscribe() -> std::io::Result<tokio::signal::unix::Signal> {
    tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
}

#[cfg(windows)]
fn subscribe() -> std::io::Result<tokio::signal::windows::CtrlC> {
    tokio::signal::windows::ctrl_c()
}

/// Re-apply the original project unless cleanup already did
fn restore(original: &OriginalProject, gcloud: &Gcloud) {
    eprintln!();
    eprintln!("{}", "Interrupted.".yellow().bold());

    let restored =
        original.restore_with(|project| (project.to_string(), gcloud.set_project(project)));
    match restored {
        Some((project, Ok(()))) => {
            tracing::info!(project = %project, "Restored active project");
            eprintln!(
                "Restored original gcloud project configuration to '{}'.",
                project
            );
        }
        Some((project, Err(e))) => {
            tracing::warn!(project = %project, "Failed to restore active project: {}", e);
            eprintln!(
                "{}",
                format!(
                    "Could not restore the original gcloud project '{}': {}",
                    project, e
                )
                .yellow()
            );
        }
        None => tracing::debug!("Original project already restored"),
    }
}
