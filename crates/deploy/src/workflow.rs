//! The end-to-end deployment workflow.
//!
//! Sequential: load and validate every template, upload the support set,
//! assemble parameters, publish artifacts, reconcile the stack. Each step
//! depends on the previous one; the workflow owns no persistent local state
//! and re-running it with identical inputs converges to a no-op.

use stackup_cloud::{ArtifactStore, StackBackend, StackParameter, StackSpec};
use tracing::info;

use crate::artifacts;
use crate::config::{DeployConfig, MAIN_TEMPLATE, SUPPORT_TEMPLATES};
use crate::error::DeployResult;
use crate::params::ParameterSet;
use crate::reconcile::{self, Outcome};
use crate::templates;

/// Run the full deployment.
pub async fn run(
    backend: &dyn StackBackend,
    store: &dyn ArtifactStore,
    config: &DeployConfig,
) -> DeployResult<Outcome> {
    let full_name = config.full_stack_name();
    info!(stack = %full_name, version = %config.version, "starting deployment");

    // Every template is loaded and validated before anything remote is
    // mutated, so a missing or rejected file aborts with the bucket and the
    // stack untouched.
    for name in SUPPORT_TEMPLATES {
        templates::load_template(backend, &config.template_path(name), name).await?;
    }
    let template_body =
        templates::load_template(backend, &config.template_path(MAIN_TEMPLATE), MAIN_TEMPLATE)
            .await?;

    for name in SUPPORT_TEMPLATES {
        store
            .upload_file(
                &config.bucket,
                &config.template_key(name),
                &config.template_path(name),
            )
            .await?;
    }

    let mut parameters = ParameterSet::load(&config.parameters_path())?;
    parameters.push(StackParameter::new("AppVersion", config.version.as_str()))?;

    artifacts::publish(
        store,
        &config.bucket,
        &config.version,
        &config.artifacts,
        &mut parameters,
    )
    .await?;

    let spec = StackSpec {
        name: full_name,
        template_body,
        parameters: parameters.into_inner(),
    };
    reconcile::reconcile(backend, &spec).await
}
