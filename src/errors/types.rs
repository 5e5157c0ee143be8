use thiserror::Error;

#[derive(Debug, Error)]
pub enum SonarchatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid report URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid report: {0}")]
    InvalidReport(String),

    #[error("Column not found in report: {0}")]
    MissingColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SonarchatError {
    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            SonarchatError::Config(_) | SonarchatError::InvalidUrl(_) | SonarchatError::Yaml(_) => 2,
            SonarchatError::Storage(_) | SonarchatError::NotFound(_) => 3,
            SonarchatError::Authentication(_) => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(SonarchatError::Config("x".into()).exit_code(), 2);
        assert_eq!(SonarchatError::InvalidUrl("x".into()).exit_code(), 2);
        assert_eq!(SonarchatError::NotFound("x".into()).exit_code(), 3);
        assert_eq!(SonarchatError::Authentication("x".into()).exit_code(), 4);
        assert_eq!(SonarchatError::LLMApi("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_display_keeps_message() {
        let err = SonarchatError::MissingColumn("severity".into());
        assert_eq!(err.to_string(), "Column not found in report: severity");
    }
}
