use serde::Deserialize;

/// Cursor block returned by Codacy list endpoints. A missing cursor is the
/// end marker.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub cursor: Option<String>,
    pub total: Option<u64>,
}
