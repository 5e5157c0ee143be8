use axum::{http::StatusCode, response::IntoResponse, Json};
use crate::errors::SonarchatError;
use super::models::{ChatErrorResponse, ErrorResponse};
use tracing::{error, warn};

impl SonarchatError {
    /// Status and client-facing text for this error.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            SonarchatError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        }
    }
}

fn log_failure(status: StatusCode, err: &SonarchatError) {
    if status.is_server_error() {
        error!(error = %err, "Request failed");
    } else {
        warn!(error = %err, "Request rejected");
    }
}

/// Chat failure response. Server-side failures carry an extra `message`
/// field for the frontend; bad requests only the error.
pub struct ChatError(pub SonarchatError);

impl From<SonarchatError> for ChatError {
    fn from(err: SonarchatError) -> Self {
        ChatError(err)
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.0.status_and_message();
        log_failure(status, &self.0);
        if status.is_client_error() {
            return (status, Json(ErrorResponse { error: message })).into_response();
        }
        (
            status,
            Json(ChatErrorResponse { error: message, message: "Failed to generate response" }),
        )
            .into_response()
    }
}
