//! S3-backed template and artifact storage.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::MetadataDirective;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::providers::traits::{ArtifactStore, BackendError};

/// Metadata key recording which deployment produced an object.
const VERSION_METADATA_KEY: &str = "deployment-version";

/// S3 implementation of [`ArtifactStore`].
///
/// Version identifiers come from bucket versioning; the bucket must have it
/// enabled for [`ArtifactStore::object_version`] to succeed.
#[derive(Clone)]
pub struct AwsObjectStore {
    client: Client,
}

impl AwsObjectStore {
    /// Wrap an already-configured S3 client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArtifactStore for AwsObjectStore {
    async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
    ) -> Result<(), BackendError> {
        debug!(bucket, key, path = %path.display(), "uploading object");
        let body = ByteStream::from_path(path)
            .await
            .map_err(|err| BackendError::NotFound(format!("{}: {err}", path.display())))?;
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|err| storage_fault(&err))?;
        Ok(())
    }

    async fn copy_object(
        &self,
        bucket: &str,
        source_key: &str,
        dest_key: &str,
        version_tag: &str,
    ) -> Result<(), BackendError> {
        info!(bucket, source = source_key, dest = dest_key, version = version_tag, "copying artifact");
        self.client
            .copy_object()
            .bucket(bucket)
            .copy_source(format!("{bucket}/{source_key}"))
            .key(dest_key)
            .metadata_directive(MetadataDirective::Replace)
            .metadata(VERSION_METADATA_KEY, version_tag)
            .send()
            .await
            .map_err(|err| storage_fault(&err))?;
        Ok(())
    }

    async fn object_version(&self, bucket: &str, key: &str) -> Result<String, BackendError> {
        let head = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| match &err {
                SdkError::ServiceError(context) if context.err().is_not_found() => {
                    BackendError::NotFound(format!("object {bucket}/{key}"))
                }
                _ => storage_fault(&err),
            })?;
        head.version_id()
            .filter(|version| !version.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| BackendError::Api {
                code: "NoVersionId".to_string(),
                message: format!("bucket {bucket} reported no version for {key}; is versioning enabled?"),
            })
    }
}

/// Error mapping for storage calls.
fn storage_fault<E, R>(err: &SdkError<E, R>) -> BackendError
where
    E: ProvideErrorMetadata,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            BackendError::Transient(err.to_string())
        }
        _ => {
            let code = err.code().unwrap_or("Unknown");
            let message = err.message().unwrap_or("no message from backend");
            match code {
                "NoSuchKey" | "NoSuchBucket" | "NotFound" => {
                    BackendError::NotFound(message.to_string())
                }
                "RequestTimeout" | "SlowDown" => BackendError::Transient(message.to_string()),
                _ => BackendError::Api {
                    code: code.to_string(),
                    message: message.to_string(),
                },
            }
        }
    }
}
