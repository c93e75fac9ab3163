//! Switchyard — fix-version reconciliation CLI.
//!
//! # Usage
//!
//! ```text
//! switchyard init
//! switchyard plan <EPIC-KEY> [--json]
//! switchyard apply <EPIC-KEY> [--dry-run] [--json]
//! switchyard manifest [--project <KEY> ...] [--json|--markdown]
//! switchyard comment <ISSUE-KEY> <TEXT>
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    apply::ApplyArgs, comment::CommentArgs, init::InitArgs, manifest::ManifestArgs, plan::PlanArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "switchyard",
    version,
    about = "Reconcile fix versions between epics and their stories, and render release manifests",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a starter config to ~/.switchyard/config.yaml.
    Init(InitArgs),

    /// List the corrective actions for an epic without applying them.
    Plan(PlanArgs),

    /// Compute and apply corrective actions for an epic.
    Apply(ApplyArgs),

    /// Render the release manifest for the configured projects.
    Manifest(ManifestArgs),

    /// Post a comment on an issue.
    Comment(CommentArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Plan(args) => args.run(),
        Commands::Apply(args) => args.run(),
        Commands::Manifest(args) => args.run(),
        Commands::Comment(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
