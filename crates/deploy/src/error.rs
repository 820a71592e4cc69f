//! Error types for the deployment workflow.

use std::path::PathBuf;

use stackup_cloud::BackendError;
use thiserror::Error;

/// Result type alias for deployment operations.
pub type DeployResult<T> = Result<T, DeployError>;

/// Errors raised while assembling or submitting a deployment.
#[derive(Error, Debug)]
pub enum DeployError {
    /// Local template file is absent.
    #[error("template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    /// Backend rejected a template.
    #[error("template '{name}' rejected: {reason}")]
    TemplateRejected { name: String, reason: String },

    /// Per-environment parameter file is absent.
    #[error("parameter file not found: {path}")]
    ParametersNotFound { path: PathBuf },

    /// Parameter file is not a well-formed parameter list.
    #[error("malformed parameter file {path}: {source}")]
    ParameterParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A parameter key appeared more than once. Keys must be unique at
    /// submission time; nothing is overwritten.
    #[error("duplicate parameter key '{key}'")]
    DuplicateParameter { key: String },

    /// Malformed `--artifact` value.
    #[error("invalid artifact spec '{spec}', expected SOURCE:DEST:PREFIX")]
    InvalidArtifactSpec { spec: String },

    /// Local read failure other than a missing file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backend or storage failure.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
