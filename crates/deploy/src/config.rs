//! Deployment configuration and naming conventions.

use std::path::{Path, PathBuf};

use crate::error::{DeployError, DeployResult};

/// Default storage container for templates and artifacts.
pub const DEFAULT_BUCKET: &str = "stackup-templates";

/// Secondary templates uploaded alongside every deployment.
pub const SUPPORT_TEMPLATES: &[&str] = &["database", "service", "lambdas"];

/// Root template submitted inline with the stack operation.
pub const MAIN_TEMPLATE: &str = "main";

/// Artifact published when no explicit list is configured.
pub const DEFAULT_ARTIFACT: &str =
    "builds/notifications-{version}.jar:lambdas/notifications.jar:Notifications";

/// Path of a template by logical name.
#[must_use]
pub fn template_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.template"))
}

/// A build artifact to copy into its stable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Versioned source key of the build output.
    pub source_key: String,
    /// Stable destination key referenced by the templates.
    pub dest_key: String,
    /// Prefix of the parameter receiving the version identifier.
    pub parameter_prefix: String,
}

impl ArtifactSpec {
    /// Parse a `SOURCE:DEST:PREFIX` triple, substituting `{version}` in the
    /// source key with the deployment version.
    pub fn parse(raw: &str, version: &str) -> DeployResult<Self> {
        let mut parts = raw.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(source), Some(dest), Some(prefix))
                if !source.is_empty() && !dest.is_empty() && !prefix.is_empty() =>
            {
                Ok(Self {
                    source_key: source.replace("{version}", version),
                    dest_key: dest.to_string(),
                    parameter_prefix: prefix.to_string(),
                })
            }
            _ => Err(DeployError::InvalidArtifactSpec {
                spec: raw.to_string(),
            }),
        }
    }

    /// Name of the parameter receiving the refreshed version identifier.
    #[must_use]
    pub fn parameter_key(&self) -> String {
        format!("{}ArtifactVersion", self.parameter_prefix)
    }
}

/// Assembled inputs for one deployment run.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    /// Stack base name.
    pub stack_name: String,
    /// Target environment.
    pub environment: String,
    /// Deployment version label.
    pub version: String,
    /// Storage container for templates and artifacts.
    pub bucket: String,
    /// Directory holding templates and the parameter file.
    pub dir: PathBuf,
    /// Artifacts to publish.
    pub artifacts: Vec<ArtifactSpec>,
}

impl DeployConfig {
    /// Full stack name, `{environment}-{stack_name}`.
    #[must_use]
    pub fn full_stack_name(&self) -> String {
        format!("{}-{}", self.environment, self.stack_name)
    }

    /// Path of the per-environment parameter file.
    #[must_use]
    pub fn parameters_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.environment))
    }

    /// Path of a template by logical name.
    #[must_use]
    pub fn template_path(&self, name: &str) -> PathBuf {
        template_path(&self.dir, name)
    }

    /// Bucket key a secondary template is uploaded to.
    #[must_use]
    pub fn template_key(&self, name: &str) -> String {
        format!("{}/{}/{}.template", self.environment, self.stack_name, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DeployConfig {
        DeployConfig {
            stack_name: "api".to_string(),
            environment: "staging".to_string(),
            version: "1.2.3".to_string(),
            bucket: DEFAULT_BUCKET.to_string(),
            dir: PathBuf::from("/deploy"),
            artifacts: vec![],
        }
    }

    #[test]
    fn full_stack_name_joins_environment_and_base() {
        assert_eq!(config().full_stack_name(), "staging-api");
    }

    #[test]
    fn conventional_paths() {
        let config = config();
        assert_eq!(config.parameters_path(), PathBuf::from("/deploy/staging.json"));
        assert_eq!(
            config.template_path("database"),
            PathBuf::from("/deploy/database.template")
        );
        assert_eq!(config.template_key("database"), "staging/api/database.template");
    }

    #[test]
    fn artifact_spec_parses_and_substitutes_version() {
        let spec = ArtifactSpec::parse(DEFAULT_ARTIFACT, "1.2.3").unwrap();
        assert_eq!(spec.source_key, "builds/notifications-1.2.3.jar");
        assert_eq!(spec.dest_key, "lambdas/notifications.jar");
        assert_eq!(spec.parameter_key(), "NotificationsArtifactVersion");
    }

    #[test]
    fn artifact_spec_rejects_incomplete_triples() {
        assert!(ArtifactSpec::parse("only-source", "1.0").is_err());
        assert!(ArtifactSpec::parse("a:b", "1.0").is_err());
        assert!(ArtifactSpec::parse("a::Prefix", "1.0").is_err());
    }

    #[test]
    fn artifact_source_without_placeholder_is_kept_verbatim() {
        let spec = ArtifactSpec::parse("src.jar:dest.jar:App", "1.0").unwrap();
        assert_eq!(spec.source_key, "src.jar");
        assert_eq!(spec.parameter_key(), "AppArtifactVersion");
    }
}
