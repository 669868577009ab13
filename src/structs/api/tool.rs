use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Tool {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ToolsResponse {
    #[serde(default)]
    pub data: Vec<Tool>,
}
