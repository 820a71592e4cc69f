//! Per-environment parameter sets.
//!
//! The parameter file is a JSON array of `ParameterKey`/`ParameterValue`
//! objects. Order is preserved, and computed entries only ever append; a
//! duplicate key anywhere is an invariant violation, not a last-write-wins.

use std::path::Path;

use serde::Deserialize;
use stackup_cloud::StackParameter;

use crate::error::{DeployError, DeployResult};

/// Wire format of one entry in `{environment}.json`.
#[derive(Debug, Deserialize)]
struct ParameterEntry {
    #[serde(rename = "ParameterKey")]
    key: String,
    #[serde(rename = "ParameterValue")]
    value: String,
}

/// Ordered parameter collection with unique keys.
#[derive(Debug, Default)]
pub struct ParameterSet {
    entries: Vec<StackParameter>,
}

impl ParameterSet {
    /// Load the parameter file for an environment.
    pub fn load(path: &Path) -> DeployResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(DeployError::ParametersNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(err) => {
                return Err(DeployError::Read {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        };
        Self::parse(&raw, path)
    }

    fn parse(raw: &str, path: &Path) -> DeployResult<Self> {
        let entries: Vec<ParameterEntry> =
            serde_json::from_str(raw).map_err(|source| DeployError::ParameterParse {
                path: path.to_path_buf(),
                source,
            })?;
        let mut set = Self::default();
        for entry in entries {
            set.push(StackParameter::new(entry.key, entry.value))?;
        }
        Ok(set)
    }

    /// Append an entry; existing keys are never overwritten.
    pub fn push(&mut self, parameter: StackParameter) -> DeployResult<()> {
        if self.entries.iter().any(|p| p.key == parameter.key) {
            return Err(DeployError::DuplicateParameter { key: parameter.key });
        }
        self.entries.push(parameter);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the set for submission.
    #[must_use]
    pub fn into_inner(self) -> Vec<StackParameter> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(raw: &str) -> DeployResult<ParameterSet> {
        ParameterSet::parse(raw, &PathBuf::from("staging.json"))
    }

    #[test]
    fn parses_entries_in_order() {
        let set = parse(
            r#"[
                {"ParameterKey": "InstanceType", "ParameterValue": "t3.small"},
                {"ParameterKey": "DomainName", "ParameterValue": "staging.example.com"}
            ]"#,
        )
        .unwrap();
        let entries = set.into_inner();
        assert_eq!(entries[0].key, "InstanceType");
        assert_eq!(entries[1].key, "DomainName");
        assert_eq!(entries[1].value, "staging.example.com");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        match parse("{\"not\": \"a list\"}") {
            Err(DeployError::ParameterParse { .. }) => {}
            other => panic!("expected ParameterParse, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_keys_in_the_file_are_rejected() {
        let result = parse(
            r#"[
                {"ParameterKey": "InstanceType", "ParameterValue": "t3.small"},
                {"ParameterKey": "InstanceType", "ParameterValue": "t3.large"}
            ]"#,
        );
        match result {
            Err(DeployError::DuplicateParameter { key }) => assert_eq!(key, "InstanceType"),
            other => panic!("expected DuplicateParameter, got {other:?}"),
        }
    }

    #[test]
    fn computed_entries_never_overwrite() {
        let mut set = parse(r#"[{"ParameterKey": "AppVersion", "ParameterValue": "0.0.1"}]"#).unwrap();
        let err = set.push(StackParameter::new("AppVersion", "1.2.3")).unwrap_err();
        assert!(matches!(err, DeployError::DuplicateParameter { .. }));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        match ParameterSet::load(&dir.path().join("staging.json")) {
            Err(DeployError::ParametersNotFound { .. }) => {}
            other => panic!("expected ParametersNotFound, got {other:?}"),
        }
    }
}
