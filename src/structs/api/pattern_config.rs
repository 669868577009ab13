use serde::Serialize;

/// One pattern entry of a tool PATCH payload.
#[derive(Debug, Clone, Serialize)]
pub struct PatternConfig {
    pub id: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<PatternParameter>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternParameter {
    pub name: String,
    pub value: String,
}

impl PatternConfig {
    pub fn disabled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled: false,
            parameters: None,
        }
    }
}
