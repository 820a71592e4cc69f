//! Template loading and validation.

use std::path::Path;

use stackup_cloud::{BackendError, StackBackend};
use tracing::debug;

use crate::error::{DeployError, DeployResult};

/// Read a template file from disk without touching the backend.
pub fn read_template(path: &Path) -> DeployResult<String> {
    match std::fs::read_to_string(path) {
        Ok(body) => Ok(body),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(DeployError::TemplateNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(err) => Err(DeployError::Read {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// Load a template and submit it for backend validation, returning the raw
/// body unchanged.
pub async fn load_template(
    backend: &dyn StackBackend,
    path: &Path,
    name: &str,
) -> DeployResult<String> {
    let body = read_template(path)?;
    debug!(template = name, bytes = body.len(), "validating template");
    backend.validate_template(&body).await.map_err(|err| match err {
        BackendError::Validation(reason) => DeployError::TemplateRejected {
            name: name.to_string(),
            reason,
        },
        other => DeployError::Backend(other),
    })?;
    Ok(body)
}
