//! Backend abstractions.
//!
//! This module defines the common traits and types for the orchestration
//! backend and object storage, plus the AWS implementations.

pub mod aws;
mod traits;

pub use traits::{
    ArtifactStore, BackendError, StackBackend, StackDescription, StackOutput, StackParameter,
    StackSpec, StackStatus, StackSummary,
};

// Re-export provider clients
pub use aws::{AwsCloudFormation, AwsObjectStore};
