use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    /// `null` and a missing field both read as empty.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "csvData")]
    pub csv_data: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    /// Answer rendered to HTML
    pub response: String,
    pub original_markdown: String,
}
