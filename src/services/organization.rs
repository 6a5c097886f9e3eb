//! School / NGO services - dati di riferimento

use crate::core::{AppError, AppState};
use crate::dtos::{CreateNgoDTO, CreateSchoolDTO};
use crate::entities::{Ngo, School};
use crate::repositories::{Create, Read};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

#[instrument(skip(state))]
pub async fn list_schools(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<School>>, AppError> {
    Ok(Json(state.school.find_all().await?))
}

#[instrument(skip(state, body))]
pub async fn create_school(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSchoolDTO>,
) -> Result<(StatusCode, Json<School>), AppError> {
    body.validate()?;
    let school = state.school.create(&body).await?;
    info!("School {} created", school.school_id);
    Ok((StatusCode::CREATED, Json(school)))
}

#[instrument(skip(state))]
pub async fn get_school(
    State(state): State<Arc<AppState>>,
    Path(school_id): Path<i64>,
) -> Result<Json<School>, AppError> {
    let school = state.school.read(&school_id).await?.ok_or_else(|| {
        warn!("School not found: {}", school_id);
        AppError::not_found("School not found")
    })?;
    Ok(Json(school))
}

#[instrument(skip(state, body))]
pub async fn create_ngo(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateNgoDTO>,
) -> Result<(StatusCode, Json<Ngo>), AppError> {
    body.validate()?;
    let ngo = state.ngo.create(&body).await?;
    info!("NGO {} created", ngo.ngo_id);
    Ok((StatusCode::CREATED, Json(ngo)))
}

#[instrument(skip(state))]
pub async fn get_ngo(
    State(state): State<Arc<AppState>>,
    Path(ngo_id): Path<i64>,
) -> Result<Json<Ngo>, AppError> {
    let ngo = state.ngo.read(&ngo_id).await?.ok_or_else(|| {
        warn!("NGO not found: {}", ngo_id);
        AppError::not_found("NGO not found")
    })?;
    Ok(Json(ngo))
}
