use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::constants::SONAR_CSHARP_PATTERN_PREFIX;
use crate::enums::severity::Severity;

/// A desired coding-standard check from the SonarQube quality-profile export.
/// Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SonarRule {
    pub repository_key: String,
    pub key: String,
    pub severity: Severity,
    /// Rule parameters, keyed by parameter name. BTreeMap keeps report
    /// output stable across runs.
    pub parameters: BTreeMap<String, String>,
}

impl SonarRule {
    /// The Codacy pattern id this rule maps to.
    pub fn pattern_id(&self) -> String {
        format!("{SONAR_CSHARP_PATTERN_PREFIX}{}", self.key)
    }
}
