use serde::Deserialize;

use crate::structs::api::pagination::Pagination;
use crate::structs::api::pattern_item::PatternItem;

#[derive(Debug, Deserialize)]
pub struct PatternsResponse {
    #[serde(default)]
    pub data: Vec<PatternItem>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl PatternsResponse {
    pub fn next_cursor(&self) -> Option<String> {
        self.pagination.as_ref().and_then(|p| p.cursor.clone())
    }
}
