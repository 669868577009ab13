use serde::{Deserialize, Serialize};

use crate::config::constants::SONAR_CSHARP_PATTERN_PREFIX;

/// A pattern as Codacy knows it: a point-in-time snapshot of the remote
/// catalog or of a coding standard's tool configuration. It may go stale if
/// the remote state changes concurrently; the remote side is
/// last-writer-wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePattern {
    pub id: String,
    /// The SonarQube rule key this pattern maps to. `None` for patterns of
    /// other tools whose ids carry no SonarC# prefix.
    pub rule_key: Option<String>,
    pub enabled: bool,
    pub category: Option<String>,
}

impl RemotePattern {
    /// Builds a pattern whose rule key is derived from the id prefix.
    pub fn new(id: impl Into<String>, enabled: bool) -> Self {
        let id = id.into();
        let rule_key = derive_rule_key(&id);
        Self {
            id,
            rule_key,
            enabled,
            category: None,
        }
    }

    pub fn with_rule_key(id: impl Into<String>, rule_key: impl Into<String>, enabled: bool) -> Self {
        Self {
            id: id.into(),
            rule_key: Some(rule_key.into()),
            enabled,
            category: None,
        }
    }

    pub fn rule_key(&self) -> Option<&str> {
        self.rule_key.as_deref()
    }
}

pub fn derive_rule_key(pattern_id: &str) -> Option<String> {
    pattern_id
        .strip_prefix(SONAR_CSHARP_PATTERN_PREFIX)
        .map(str::to_string)
}
