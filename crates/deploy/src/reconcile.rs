//! Stack reconciliation: create or update, then wait for steady state.

use stackup_cloud::{BackendError, StackBackend, StackDescription, StackSpec, StackStatus};
use tracing::info;

use crate::error::DeployResult;

/// Result of one reconciliation pass.
#[derive(Debug)]
pub enum Outcome {
    /// The stack did not exist and was created.
    Created(StackDescription),
    /// The stack existed and was updated.
    Updated(StackDescription),
    /// The stack existed and already matched the desired state.
    NoChanges,
}

/// Whether the named stack currently exists.
///
/// Delete-complete entries linger in the enumeration; they count as absent.
pub async fn stack_exists(backend: &dyn StackBackend, name: &str) -> Result<bool, BackendError> {
    let stacks = backend.list_stacks().await?;
    Ok(stacks
        .iter()
        .any(|stack| stack.name == name && stack.status != StackStatus::DeleteComplete))
}

/// Drive the stack to the desired template and parameters, blocking until
/// the backend reports a terminal state.
pub async fn reconcile(backend: &dyn StackBackend, spec: &StackSpec) -> DeployResult<Outcome> {
    if stack_exists(backend, &spec.name).await? {
        info!(stack = %spec.name, "updating stack");
        match backend.update_stack(spec).await {
            Ok(_) => {}
            Err(BackendError::NoChanges) => {
                info!(stack = %spec.name, "no changes to apply");
                return Ok(Outcome::NoChanges);
            }
            Err(err) => return Err(err.into()),
        }
        let description = backend.wait_for_steady_state(&spec.name).await?;
        Ok(Outcome::Updated(description))
    } else {
        info!(stack = %spec.name, "creating stack");
        backend.create_stack(spec).await?;
        let description = backend.wait_for_steady_state(&spec.name).await?;
        Ok(Outcome::Created(description))
    }
}
