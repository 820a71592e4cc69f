//! stackup CLI.
//!
//! Creates or updates a CloudFormation stack and publishes versioned build
//! artifacts alongside it. Re-running the same deployment is safe: template
//! validation is read-only, artifact copies are overwrite-safe, and an
//! update with nothing to change collapses to a no-op.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stackup::commands::deploy::DeployCommand;
use stackup::commands::validate::ValidateCommand;

/// Create or update a CloudFormation stack and publish versioned artifacts.
#[derive(Parser)]
#[command(name = "stackup", version, about = "Deploy CloudFormation stacks with versioned artifacts")]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full deployment workflow.
    Deploy(DeployCommand),

    /// Validate templates without deploying.
    Validate(ValidateCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info,stackup=debug,stackup_cloud=debug")
    } else {
        EnvFilter::new("warn,stackup=info,stackup_cloud=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Deploy(cmd) => cmd.run().await,
        Commands::Validate(cmd) => cmd.run().await,
    }
}
