//! Transparency services - note, feedback e foto prima/dopo per progetto

use crate::core::{AppError, AppState};
use crate::dtos::{AddPhotosDTO, RemovePhotoQuery, UpsertTransparencyDTO};
use crate::entities::TransparencyView;
use crate::repositories::Read;
use axum::extract::{Json, Path, Query, State};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

async fn ensure_project(state: &AppState, project_id: i64) -> Result<(), AppError> {
    if state.campaign.read(&project_id).await?.is_none() {
        warn!("Project not found: {}", project_id);
        return Err(AppError::not_found("Project not found"));
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn get_transparency(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
) -> Result<Json<TransparencyView>, AppError> {
    let record = state
        .transparency
        .find_by_project_id(&project_id)
        .await?
        .ok_or_else(|| {
            debug!("No transparency record for project {}", project_id);
            AppError::not_found("Transparency record not found")
        })?;
    Ok(Json(record.into()))
}

#[instrument(skip(state, body))]
pub async fn upsert_transparency(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
    Json(body): Json<UpsertTransparencyDTO>,
) -> Result<Json<TransparencyView>, AppError> {
    body.validate()?;
    ensure_project(&state, project_id).await?;

    let record = state.transparency.upsert(&project_id, &body).await?;
    info!("Transparency record {} saved", record.transparency_id);
    Ok(Json(record.into()))
}

#[instrument(skip(state, body), fields(kind = ?body.kind, count = body.urls.len()))]
pub async fn add_photos(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
    Json(body): Json<AddPhotosDTO>,
) -> Result<Json<TransparencyView>, AppError> {
    body.validate()?;
    ensure_project(&state, project_id).await?;

    let record = state
        .transparency
        .append_photos(&project_id, body.kind, &body.urls)
        .await?;

    info!("Added {} photos to project {}", body.urls.len(), project_id);
    Ok(Json(record.into()))
}

#[instrument(skip(state, query), fields(kind = ?query.kind))]
pub async fn remove_photo(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<i64>,
    Query(query): Query<RemovePhotoQuery>,
) -> Result<Json<TransparencyView>, AppError> {
    let (record, removed) = state
        .transparency
        .remove_photo(&project_id, query.kind, &query.url)
        .await?
        .ok_or_else(|| {
            warn!("No transparency record for project {}", project_id);
            AppError::not_found("Transparency record not found")
        })?;

    if removed == 0 {
        debug!("Photo not present, nothing removed");
    } else {
        info!("Removed {} photo entries from project {}", removed, project_id);
    }
    Ok(Json(record.into()))
}
