use serde::Deserialize;

/// A named, remotely stored collection of patterns scoped to an
/// organization. Never deleted by this tool.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingStandard {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub is_draft: bool,
}

#[derive(Debug, Deserialize)]
pub struct StandardsResponse {
    #[serde(default)]
    pub data: Vec<CodingStandard>,
}

#[derive(Debug, Deserialize)]
pub struct CreateStandardResponse {
    pub data: CodingStandard,
}
