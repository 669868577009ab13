use serde::Deserialize;

use crate::structs::pattern::RemotePattern;

/// One entry of a pattern listing (`/tools/{uuid}/patterns` or the
/// per-standard variant).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternItem {
    pub id: String,
    #[serde(default)]
    pub enabled: bool,
    pub category: Option<String>,
}

impl From<PatternItem> for RemotePattern {
    fn from(item: PatternItem) -> Self {
        let rule_key = crate::structs::pattern::derive_rule_key(&item.id);
        RemotePattern {
            id: item.id,
            rule_key,
            enabled: item.enabled,
            category: item.category,
        }
    }
}
