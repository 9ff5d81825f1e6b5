//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{rejection::QueryRejection, State, Query}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::QuestionError;
use crate::logic::{inventory, request_question};
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(inventory(&state))
}

#[instrument(level = "info", skip_all)]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  query: Result<Query<QuestionQuery>, QueryRejection>,
) -> Result<Json<QuestionOut>, QuestionError> {
  let Query(q) = query.map_err(|e| QuestionError::BadRequest(e.body_text()))?;
  info!(target: "repaso_backend", category = ?q.category, direction = ?q.direction, seed = ?q.seed, "Question requested");
  request_question(&state, q.category.as_deref(), q.direction.as_deref(), q.seed).map(Json)
}
