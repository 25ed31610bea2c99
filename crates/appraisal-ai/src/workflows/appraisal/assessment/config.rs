use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Rule table backing the risk engine: the object labels that count as risk
/// tags and the keyword-triggered compliance checklist. Loaded once at
/// process start and treated as immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub potential_risk_objects: BTreeSet<String>,
    pub compliance_checklist: BTreeMap<String, String>,
}

impl RiskConfig {
    /// Load the rule table from a JSON file. A missing file or malformed
    /// JSON is a fatal startup error for the host process.
    pub fn from_path(path: &Path) -> Result<Self, RiskConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| RiskConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| RiskConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RiskConfigError {
    #[error("risk rules file '{path}' could not be read")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("risk rules file '{path}' is not valid JSON with the required keys")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("appraisal-ai-{name}-{}", std::process::id()));
        fs::write(&path, contents).expect("scratch file writes");
        path
    }

    #[test]
    fn loads_a_well_formed_rules_file() {
        let path = scratch_file(
            "rules-ok",
            r#"{
                "potential_risk_objects": ["potted plant"],
                "compliance_checklist": { "leak": "Remediate and re-inspect." }
            }"#,
        );

        let config = RiskConfig::from_path(&path).expect("rules load");
        assert!(config.potential_risk_objects.contains("potted plant"));
        assert_eq!(
            config.compliance_checklist.get("leak").map(String::as_str),
            Some("Remediate and re-inspect.")
        );

        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = env::temp_dir().join("appraisal-ai-definitely-not-here.json");
        let error = RiskConfig::from_path(&path).expect_err("missing file fails");
        assert!(matches!(error, RiskConfigError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let path = scratch_file("rules-bad", "{ not json");
        let error = RiskConfig::from_path(&path).expect_err("malformed file fails");
        assert!(matches!(error, RiskConfigError::Parse { .. }));
        fs::remove_file(path).ok();
    }

    #[test]
    fn missing_required_keys_is_a_parse_error() {
        let path = scratch_file(
            "rules-partial",
            r#"{ "potential_risk_objects": [] }"#,
        );
        let error = RiskConfig::from_path(&path).expect_err("partial file fails");
        assert!(matches!(error, RiskConfigError::Parse { .. }));
        fs::remove_file(path).ok();
    }
}
