use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use crate::api::models::ErrorResponse;
use crate::api::AppState;
use crate::errors::SonarchatError;
use tracing::{error, info};

/// The whole report as a JSON array of records, fetched fresh on every call.
pub async fn get_csv_data(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    let table = state.service.load().await.map_err(|e| {
        error!(error = %e, "Report load failed");
        let message = match e {
            SonarchatError::Storage(_)
            | SonarchatError::NotFound(_)
            | SonarchatError::Authentication(_)
            | SonarchatError::Network(_) => format!("Failed to download CSV file from storage: {}", e),
            other => other.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: message }))
    })?;

    info!(rows = table.len(), "Serving report records");
    Ok(Json(Value::Array(table.records())))
}
