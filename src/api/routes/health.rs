use axum::{extract::State, Json};
use crate::api::models::HealthResponse;
use crate::api::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "sonarchat",
        version: env!("CARGO_PKG_VERSION"),
        built_at: env!("BUILD_TIMESTAMP"),
        commit: option_env!("GIT_HASH"),
        mode: state.service.mode.to_string(),
    })
}
