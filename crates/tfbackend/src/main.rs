mod interrupt;
mod terminal;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use terminal::TerminalPrompter;
use tfbackend_config::Settings;
use tfbackend_core::{ProvisionContext, ProvisionState, Provisioner};
use tfbackend_gcp::{Gcloud, GcpControlPlane};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tfbackend")]
#[command(
    about = "Bootstrap a versioned GCS bucket for Terraform remote state",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: Overrides,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive setup (default)
    Init,
    /// Show the effective settings
    Config,
    /// Show version information
    Version,
}

/// Command-line overrides applied on top of the settings file
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Default bucket location offered at the prompt
    #[arg(long, global = true, env = "TFBACKEND_LOCATION")]
    location: Option<String>,

    /// Where the backend configuration is written
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// State path prefix inside the bucket
    #[arg(long, global = true)]
    prefix: Option<String>,

    /// Path to the gcloud executable
    #[arg(long, global = true)]
    gcloud: Option<PathBuf>,
}

impl Overrides {
    fn apply(&self, settings: &mut Settings) {
        if let Some(location) = &self.location {
            settings.default_location = location.clone();
        }
        if let Some(output) = &self.output {
            settings.backend_file = output.clone();
        }
        if let Some(prefix) = &self.prefix {
            settings.state_prefix = prefix.clone();
        }
        if let Some(gcloud) = &self.gcloud {
            settings.gcloud_path = gcloud.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Commands::Init) {
        Commands::Version => {
            println!("tfbackend {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Config => {
            let (settings, source) = load_settings(&cli.overrides)?;
            show_config(&settings, source.as_deref())
        }
        Commands::Init => {
            let (settings, _) = load_settings(&cli.overrides)?;
            run_init(settings)
        }
    }
}

/// Logs go to stderr; RUST_LOG wins over `-v`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(overrides: &Overrides) -> anyhow::Result<(Settings, Option<PathBuf>)> {
    let (mut settings, source) = tfbackend_config::load()?;
    overrides.apply(&mut settings);
    settings.validate()?;
    tracing::debug!(?settings, "Effective settings");
    Ok((settings, source))
}

fn show_config(settings: &Settings, source: Option<&Path>) -> anyhow::Result<()> {
    match source {
        Some(path) => println!("{} {}", "Config file:".bold(), path.display()),
        None => println!("{} (none, using defaults)", "Config file:".bold()),
    }
    print!("{}", serde_yaml::to_string(settings)?);
    Ok(())
}

fn run_init(settings: Settings) -> anyhow::Result<()> {
    println!("{}", "🚀 Terraform GCS backend setup".bold().cyan());

    let control_plane = GcpControlPlane::new(Gcloud::new(settings.gcloud_path.clone()));
    let mut prompter = TerminalPrompter::new();
    let mut ctx = ProvisionContext::capture(&control_plane);
    interrupt::install(ctx.original().clone(), settings.gcloud_path.clone())?;

    let report = {
        let mut provisioner = Provisioner::new(&control_plane, &mut prompter, settings);
        provisioner.execute(ProvisionState::CheckPrerequisites, &mut ctx)
    };
    tracing::debug!(visited = ?report.visited, "Run finished");

    if !report.succeeded() {
        std::process::exit(1);
    }
    Ok(())
}
