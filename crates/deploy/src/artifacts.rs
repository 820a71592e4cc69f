//! Artifact publication.

use stackup_cloud::{ArtifactStore, StackParameter};
use tracing::info;

use crate::config::ArtifactSpec;
use crate::error::DeployResult;
use crate::params::ParameterSet;

/// Copy each artifact into its stable location, tag it with the deployment
/// version, and record the refreshed version identifier as a parameter.
pub async fn publish(
    store: &dyn ArtifactStore,
    bucket: &str,
    version: &str,
    specs: &[ArtifactSpec],
    parameters: &mut ParameterSet,
) -> DeployResult<()> {
    for spec in specs {
        store
            .copy_object(bucket, &spec.source_key, &spec.dest_key, version)
            .await?;
        // The copy response may lag behind the bucket's latest version
        // marker; re-read the object metadata instead.
        let object_version = store.object_version(bucket, &spec.dest_key).await?;
        info!(artifact = %spec.dest_key, version = %object_version, "artifact published");
        parameters.push(StackParameter::new(spec.parameter_key(), object_version))?;
    }
    Ok(())
}
