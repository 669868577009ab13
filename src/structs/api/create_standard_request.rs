use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CreateStandardRequest {
    pub name: String,
    pub languages: Vec<String>,
}
