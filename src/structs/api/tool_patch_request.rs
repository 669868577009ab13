use serde::Serialize;

use crate::structs::api::pattern_config::PatternConfig;

/// Body of `PATCH .../coding-standards/{id}/tools/{uuid}`.
#[derive(Debug, Serialize)]
pub struct ToolPatchRequest {
    pub enabled: bool,
    pub patterns: Vec<PatternConfig>,
}

impl ToolPatchRequest {
    /// Payload that switches a tool off and clears its pattern selection.
    pub fn disable_tool() -> Self {
        Self {
            enabled: false,
            patterns: Vec::new(),
        }
    }
}
