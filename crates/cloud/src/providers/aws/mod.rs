//! AWS implementations of the backend traits.
//!
//! CloudFormation drives stack lifecycle; S3 holds templates and build
//! artifacts. Both clients are constructed from an already-configured SDK
//! client so credentials and endpoints stay a caller concern (the CLI uses
//! the default provider chain, tests use endpoint overrides).

mod cloudformation;
mod s3;

pub use cloudformation::AwsCloudFormation;
pub use s3::AwsObjectStore;
