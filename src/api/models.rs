use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of a failed chat turn.
#[derive(Serialize)]
pub struct ChatErrorResponse {
    pub error: String,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub built_at: &'static str,
    pub commit: Option<&'static str>,
    pub mode: String,
}
