//! Campaign services - campagne NGO e proiezione delle campagne accettate

use crate::core::error::codes;
use crate::core::{AppError, AppState};
use crate::dtos::campaign::check_date_range;
use crate::dtos::{CampaignQuery, CreateCampaignDTO, UpdateCampaignDTO};
use crate::entities::Campaign;
use crate::lifecycle::accepted_campaigns;
use crate::repositories::{Create, Read, Update};
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use futures::future::try_join;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state))]
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CampaignQuery>,
) -> Result<Json<Vec<Campaign>>, AppError> {
    let campaigns = match query.ngo_id {
        Some(ngo_id) => state.campaign.find_by_ngo_id(&ngo_id).await?,
        None => state.campaign.find_all().await?,
    };
    debug!("Found {} campaigns", campaigns.len());
    Ok(Json(campaigns))
}

#[instrument(skip(state, body), fields(ngo_id = %body.ngo_id))]
pub async fn create_campaign(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateCampaignDTO>,
) -> Result<(StatusCode, Json<Campaign>), AppError> {
    debug!("Creating campaign");
    body.validate()?;

    if state.ngo.read(&body.ngo_id).await?.is_none() {
        warn!("NGO not found: {}", body.ngo_id);
        return Err(AppError::not_found("NGO not found"));
    }

    let campaign = state.campaign.create(&body).await?;
    info!("Campaign {} created", campaign.ngo_project_id);
    Ok((StatusCode::CREATED, Json(campaign)))
}

#[instrument(skip(state))]
pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(ngo_project_id): Path<i64>,
) -> Result<Json<Campaign>, AppError> {
    let campaign = state.campaign.read(&ngo_project_id).await?.ok_or_else(|| {
        warn!("Campaign not found: {}", ngo_project_id);
        AppError::not_found("Campaign not found")
    })?;
    Ok(Json(campaign))
}

#[instrument(skip(state, body))]
pub async fn update_campaign(
    State(state): State<Arc<AppState>>,
    Path(ngo_project_id): Path<i64>,
    Json(body): Json<UpdateCampaignDTO>,
) -> Result<Json<Campaign>, AppError> {
    debug!("Updating campaign");
    body.validate()?;

    let current = state.campaign.read(&ngo_project_id).await?.ok_or_else(|| {
        warn!("Campaign not found: {}", ngo_project_id);
        AppError::not_found("Campaign not found")
    })?;

    // a single date may be changed, the range is checked against the stored one
    let start = body.start_date.or(current.start_date);
    let end = body.end_date.or(current.end_date);
    if let Err(e) = check_date_range(start, end) {
        warn!("Rejected campaign date range {:?}..{:?}", start, end);
        return Err(AppError::bad_request("Validation error")
            .with_code(codes::VALIDATION)
            .with_details(e.to_string()));
    }

    let updated = state.campaign.update(&ngo_project_id, &body).await?;
    info!("Campaign {} updated", ngo_project_id);
    Ok(Json(updated))
}

/// Campaigns a school has accepted, derived from its approved invitations
#[instrument(skip(state))]
pub async fn list_accepted_campaigns(
    State(state): State<Arc<AppState>>,
    Path(school_id): Path<i64>,
) -> Result<Json<Vec<Campaign>>, AppError> {
    if state.school.read(&school_id).await?.is_none() {
        warn!("School not found: {}", school_id);
        return Err(AppError::not_found("School not found"));
    }

    let (campaigns, invitations) = try_join(
        state.campaign.find_all(),
        state.invitation.find_many_by_school_id(&school_id),
    )
    .await?;

    let accepted: Vec<Campaign> = accepted_campaigns(&campaigns, &invitations, school_id)
        .into_iter()
        .cloned()
        .collect();

    debug!("School accepted {} campaigns", accepted.len());
    Ok(Json(accepted))
}
