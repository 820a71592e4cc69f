//! Backend traits and common types.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during backend operations.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Template rejected by the orchestration backend.
    #[error("template validation failed: {0}")]
    Validation(String),

    /// Local file, remote object, or stack does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Connectivity failure; the whole step may be retried.
    #[error("transient backend failure: {0}")]
    Transient(String),

    /// Update requested but the stack already matches the desired state.
    #[error("no changes are to be applied")]
    NoChanges,

    /// The stack settled in a terminal state other than the requested one.
    #[error("stack {name} settled in {status}")]
    OperationFailed {
        name: String,
        status: StackStatus,
    },

    /// Any other error response from the backend.
    #[error("backend error: {code}: {message}")]
    Api { code: String, message: String },
}

/// Stack lifecycle status as reported by the orchestration backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackStatus {
    /// Stack is being created.
    CreateInProgress,
    /// Creation finished successfully.
    CreateComplete,
    /// Creation failed before any rollback.
    CreateFailed,
    /// Stack is being updated.
    UpdateInProgress,
    /// Update finished successfully.
    UpdateComplete,
    /// Update failed before any rollback.
    UpdateFailed,
    /// A failed operation is being rolled back.
    RollbackInProgress,
    /// Rollback finished; the operation did not apply.
    RollbackComplete,
    /// Rollback itself failed.
    RollbackFailed,
    /// Stack is being deleted.
    DeleteInProgress,
    /// Stack has been deleted; equivalent to non-existent for existence
    /// checks.
    DeleteComplete,
    /// Deletion failed.
    DeleteFailed,
    /// Stack is awaiting change-set review.
    ReviewInProgress,
    /// Unrecognized status.
    Unknown,
}

impl StackStatus {
    /// Whether the backend will not transition this stack any further.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::CreateComplete
                | Self::CreateFailed
                | Self::UpdateComplete
                | Self::UpdateFailed
                | Self::RollbackComplete
                | Self::RollbackFailed
                | Self::DeleteComplete
                | Self::DeleteFailed
        )
    }

    /// Whether this is the steady state a create or update aims for.
    #[must_use]
    pub fn is_steady(self) -> bool {
        matches!(self, Self::CreateComplete | Self::UpdateComplete)
    }
}

impl std::fmt::Display for StackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateInProgress => write!(f, "create-in-progress"),
            Self::CreateComplete => write!(f, "create-complete"),
            Self::CreateFailed => write!(f, "create-failed"),
            Self::UpdateInProgress => write!(f, "update-in-progress"),
            Self::UpdateComplete => write!(f, "update-complete"),
            Self::UpdateFailed => write!(f, "update-failed"),
            Self::RollbackInProgress => write!(f, "rollback-in-progress"),
            Self::RollbackComplete => write!(f, "rollback-complete"),
            Self::RollbackFailed => write!(f, "rollback-failed"),
            Self::DeleteInProgress => write!(f, "delete-in-progress"),
            Self::DeleteComplete => write!(f, "delete-complete"),
            Self::DeleteFailed => write!(f, "delete-failed"),
            Self::ReviewInProgress => write!(f, "review-in-progress"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Summary row from stack enumeration.
#[derive(Debug, Clone)]
pub struct StackSummary {
    /// Stack name.
    pub name: String,
    /// Last known status.
    pub status: StackStatus,
}

/// Key/value parameter supplied to a stack operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackParameter {
    pub key: String,
    pub value: String,
}

impl StackParameter {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Inputs for a create or update submission.
#[derive(Debug, Clone)]
pub struct StackSpec {
    /// Full stack name.
    pub name: String,
    /// Root template body, submitted inline.
    pub template_body: String,
    /// Assembled parameter set; keys are unique.
    pub parameters: Vec<StackParameter>,
}

/// Stack state as reported by the backend.
#[derive(Debug, Clone)]
pub struct StackDescription {
    /// Backend identifier of the stack.
    pub id: String,
    /// Stack name.
    pub name: String,
    /// Current status.
    pub status: StackStatus,
    /// Reason accompanying a failure status, if any.
    pub status_reason: Option<String>,
    /// Declared stack outputs.
    pub outputs: Vec<StackOutput>,
}

/// One output declared by a stack.
#[derive(Debug, Clone)]
pub struct StackOutput {
    pub key: String,
    pub value: String,
}

/// Orchestration backend operations consumed by the deployment workflow.
#[async_trait]
pub trait StackBackend: Send + Sync {
    /// Submit a template body for validation. Read-only and idempotent on
    /// the backend.
    async fn validate_template(&self, body: &str) -> Result<(), BackendError>;

    /// Enumerate every stack known to the backend. The enumeration is
    /// exhaustive; implementations must follow pagination to the end.
    async fn list_stacks(&self) -> Result<Vec<StackSummary>, BackendError>;

    /// Create a stack, returning its backend identifier.
    async fn create_stack(&self, spec: &StackSpec) -> Result<String, BackendError>;

    /// Update a stack in place, returning its backend identifier. Fails with
    /// [`BackendError::NoChanges`] when the stack already matches `spec`.
    async fn update_stack(&self, spec: &StackSpec) -> Result<String, BackendError>;

    /// Fetch the current description of a stack.
    async fn describe_stack(&self, name: &str) -> Result<StackDescription, BackendError>;

    /// Block until the stack reaches steady state. Any other terminal status
    /// fails with [`BackendError::OperationFailed`].
    async fn wait_for_steady_state(&self, name: &str) -> Result<StackDescription, BackendError>;
}

/// Object storage operations consumed by the deployment workflow.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Upload a local file to `key` in `bucket`.
    async fn upload_file(&self, bucket: &str, key: &str, path: &Path)
        -> Result<(), BackendError>;

    /// Copy `source_key` to `dest_key` within `bucket`, replacing the
    /// destination's metadata with a single deployment-version tag.
    /// Replacement is total, not merged. Idempotent per destination key.
    async fn copy_object(
        &self,
        bucket: &str,
        source_key: &str,
        dest_key: &str,
        version_tag: &str,
    ) -> Result<(), BackendError>;

    /// Re-read the current version identifier of `key`. The copy response is
    /// not trusted to carry the latest version marker.
    async fn object_version(&self, bucket: &str, key: &str) -> Result<String, BackendError>;
}
