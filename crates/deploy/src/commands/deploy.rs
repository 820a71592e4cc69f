//! The `deploy` subcommand.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use stackup_cloud::{AwsCloudFormation, AwsObjectStore, StackDescription};

use crate::config::{ArtifactSpec, DeployConfig, DEFAULT_ARTIFACT, DEFAULT_BUCKET};
use crate::reconcile::Outcome;
use crate::workflow;

/// Create or update a stack and publish its build artifacts.
#[derive(Args)]
pub struct DeployCommand {
    /// Stack base name (the full name is `{environment}-{stack}`).
    #[arg(long, short = 's')]
    stack: String,

    /// Target environment.
    #[arg(long, short = 'e')]
    env: String,

    /// Version label, recorded as the AppVersion parameter and as the
    /// artifact version tag.
    #[arg(long)]
    app_version: String,

    /// Storage bucket holding templates and artifacts.
    #[arg(long, default_value = DEFAULT_BUCKET)]
    bucket: String,

    /// Directory containing the templates and `{environment}.json`.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Artifact to publish, as SOURCE:DEST:PREFIX; `{version}` in SOURCE is
    /// substituted with the version label. Repeatable. Defaults to the
    /// notifications artifact.
    #[arg(long = "artifact")]
    artifacts: Vec<String>,
}

impl DeployCommand {
    /// Run the full deployment workflow against AWS.
    pub async fn run(self) -> Result<()> {
        let config = self.into_config()?;

        let shared = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let backend = AwsCloudFormation::new(aws_sdk_cloudformation::Client::new(&shared));
        let store = AwsObjectStore::new(aws_sdk_s3::Client::new(&shared));

        match workflow::run(&backend, &store, &config).await? {
            Outcome::Created(description) => {
                println!("Stack {} created", description.name);
                print_stack(&description);
            }
            Outcome::Updated(description) => {
                println!("Stack {} updated", description.name);
                print_stack(&description);
            }
            Outcome::NoChanges => println!("No changes"),
        }
        Ok(())
    }

    fn into_config(self) -> Result<DeployConfig> {
        let DeployCommand {
            stack,
            env,
            app_version,
            bucket,
            dir,
            artifacts,
        } = self;
        let raw = if artifacts.is_empty() {
            vec![DEFAULT_ARTIFACT.to_string()]
        } else {
            artifacts
        };
        let artifacts = raw
            .iter()
            .map(|spec| ArtifactSpec::parse(spec, &app_version))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DeployConfig {
            stack_name: stack,
            environment: env,
            version: app_version,
            bucket,
            dir,
            artifacts,
        })
    }
}

fn print_stack(description: &StackDescription) {
    println!("  status: {}", description.status);
    for output in &description.outputs {
        println!("  {} = {}", output.key, output.value);
    }
}
