//! Conversation services - canali aperti dalle approvazioni

use crate::core::{AppError, AppState};
use crate::entities::Conversation;
use axum::extract::{Json, Path, State};
use std::sync::Arc;
use tracing::instrument;

#[instrument(skip(state))]
pub async fn list_school_conversations(
    State(state): State<Arc<AppState>>,
    Path(school_id): Path<i64>,
) -> Result<Json<Vec<Conversation>>, AppError> {
    Ok(Json(state.conversation.find_many_by_school_id(&school_id).await?))
}

#[instrument(skip(state))]
pub async fn list_ngo_conversations(
    State(state): State<Arc<AppState>>,
    Path(ngo_id): Path<i64>,
) -> Result<Json<Vec<Conversation>>, AppError> {
    Ok(Json(state.conversation.find_many_by_ngo_id(&ngo_id).await?))
}
