use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info_span, Instrument};
use uuid::Uuid;
use crate::api::errors::ChatError;
use crate::api::AppState;
use crate::chat::{ChatReply, ChatRequest};
use crate::errors::SonarchatError;

pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ChatError> {
    let Json(req) = body.map_err(|e| SonarchatError::InvalidRequest(e.body_text()))?;

    let span = info_span!("chat", request_id = %Uuid::new_v4());
    let reply = state.service
        .answer(req.message.as_deref().unwrap_or_default(), req.csv_data.as_deref().unwrap_or_default())
        .instrument(span)
        .await?;
    Ok(Json(reply))
}
