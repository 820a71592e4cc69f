//! The `validate` subcommand.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use stackup_cloud::AwsCloudFormation;

use crate::config::{template_path, MAIN_TEMPLATE, SUPPORT_TEMPLATES};
use crate::templates;

/// Validate every template without touching storage or the stack.
#[derive(Args)]
pub struct ValidateCommand {
    /// Directory containing the templates.
    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

impl ValidateCommand {
    pub async fn run(self) -> Result<()> {
        let shared = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let backend = AwsCloudFormation::new(aws_sdk_cloudformation::Client::new(&shared));

        for name in SUPPORT_TEMPLATES.iter().chain(std::iter::once(&MAIN_TEMPLATE)) {
            templates::load_template(&backend, &template_path(&self.dir, name), name).await?;
            println!("{name}.template OK");
        }
        Ok(())
    }
}
