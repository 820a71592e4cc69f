//! Backend clients for the stackup deployment workflow.
//!
//! This crate defines the two external collaborators the workflow talks to:
//!
//! - [`StackBackend`] - the orchestration backend managing stack lifecycle
//!   (template validation, create/update, steady-state waiting)
//! - [`ArtifactStore`] - object storage holding templates and versioned
//!   build artifacts
//!
//! Both are object-safe async traits so callers can substitute in-memory
//! doubles in tests. The production implementations live under
//! [`providers::aws`] and drive CloudFormation and S3 through the official
//! SDK clients.

pub mod providers;

pub use providers::{
    ArtifactStore, AwsCloudFormation, AwsObjectStore, BackendError, StackBackend,
    StackDescription, StackOutput, StackParameter, StackSpec, StackStatus, StackSummary,
};
