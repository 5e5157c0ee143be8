pub mod routes;
pub mod models;
pub mod errors;

use std::sync::Arc;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::AppConfig;
use crate::errors::SonarchatError;
use crate::service::ReportService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReportService>,
}

impl AppState {
    pub fn new(service: ReportService) -> Self {
        Self { service: Arc::new(service) }
    }
}

pub fn create_app_state(config: &AppConfig) -> Result<AppState, SonarchatError> {
    Ok(AppState::new(ReportService::from_config(config)?))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home::index))
        .route("/get_csv_data", get(routes::report::get_csv_data))
        .route("/chat", post(routes::chat::chat))
        .route("/api/health", get(routes::health::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
