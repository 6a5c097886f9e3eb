//! Invitation services - ciclo di vita degli inviti campagna → scuola

use crate::core::{AppError, AppState};
use crate::dtos::{CreateInvitationDTO, RespondInvitationDTO};
use crate::entities::{Invitation, InvitationStatus};
use crate::lifecycle::{Decision, TransitionError};
use crate::repositories::{Create, Read};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body), fields(ngo_project_id = %body.ngo_project_id, school_id = %body.school_id))]
pub async fn create_invitation(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateInvitationDTO>,
) -> Result<(StatusCode, Json<Invitation>), AppError> {
    debug!("Creating invitation");
    // 1. Validare il DTO (budget non negativo, lunghezza messaggio)
    // 2. Verificare che campagna e scuola esistano
    // 3. Rifiutare se esiste già un invito attivo (PENDING o APPROVED) per la coppia
    // 4. Inserire l'invito in stato PENDING; un duplicato concorrente viene
    //    fermato dall'indice univoco parziale e riportato come conflitto

    body.validate()?;

    if state.campaign.read(&body.ngo_project_id).await?.is_none() {
        warn!("Campaign not found: {}", body.ngo_project_id);
        return Err(AppError::not_found("Campaign not found"));
    }

    if state.school.read(&body.school_id).await?.is_none() {
        warn!("School not found: {}", body.school_id);
        return Err(AppError::not_found("School not found"));
    }

    if let Some(active) = state
        .invitation
        .find_active(&body.ngo_project_id, &body.school_id)
        .await?
    {
        warn!(
            "Active invitation {} already exists ({})",
            active.request_id, active.status
        );
        return Err(AppError::invitation_exists(active.status));
    }

    let invitation = match state.invitation.create(&body).await {
        Ok(invitation) => invitation,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            warn!("Concurrent invitation won the race for this pair");
            return Err(AppError::invitation_exists(InvitationStatus::Pending));
        }
        Err(e) => return Err(e.into()),
    };

    info!("Invitation {} created", invitation.request_id);
    Ok((StatusCode::CREATED, Json(invitation)))
}

#[instrument(skip(state))]
pub async fn get_invitation(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<i64>,
) -> Result<Json<Invitation>, AppError> {
    let invitation = state.invitation.read(&request_id).await?.ok_or_else(|| {
        warn!("Invitation not found: {}", request_id);
        AppError::not_found("Invitation not found")
    })?;
    Ok(Json(invitation))
}

#[instrument(skip(state))]
pub async fn list_campaign_invitations(
    State(state): State<Arc<AppState>>,
    Path(ngo_project_id): Path<i64>,
) -> Result<Json<Vec<Invitation>>, AppError> {
    let invitations = state
        .invitation
        .find_many_by_campaign_id(&ngo_project_id)
        .await?;
    debug!("Found {} invitations for campaign", invitations.len());
    Ok(Json(invitations))
}

#[instrument(skip(state))]
pub async fn list_school_invitations(
    State(state): State<Arc<AppState>>,
    Path(school_id): Path<i64>,
) -> Result<Json<Vec<Invitation>>, AppError> {
    let invitations = state.invitation.find_many_by_school_id(&school_id).await?;
    debug!("Found {} invitations for school", invitations.len());
    Ok(Json(invitations))
}

#[instrument(skip(state))]
pub async fn list_excluded_schools(
    State(state): State<Arc<AppState>>,
    Path(ngo_project_id): Path<i64>,
) -> Result<Json<Vec<i64>>, AppError> {
    let excluded = state
        .invitation
        .find_excluded_school_ids(&ngo_project_id)
        .await?;
    debug!("{} schools excluded from new invitations", excluded.len());
    Ok(Json(excluded))
}

pub async fn approve_invitation(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<i64>,
    Json(body): Json<RespondInvitationDTO>,
) -> Result<Json<Invitation>, AppError> {
    respond_to_invitation(state, request_id, Decision::Approve, body).await
}

pub async fn reject_invitation(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<i64>,
    Json(body): Json<RespondInvitationDTO>,
) -> Result<Json<Invitation>, AppError> {
    respond_to_invitation(state, request_id, Decision::Reject, body).await
}

#[instrument(skip(state, body), fields(responder = %body.responded_by_user_id))]
async fn respond_to_invitation(
    state: Arc<AppState>,
    request_id: i64,
    decision: Decision,
    body: RespondInvitationDTO,
) -> Result<Json<Invitation>, AppError> {
    debug!("Responding to invitation");
    // 1. Validare il DTO
    // 2. Recuperare l'invito, 404 se non esiste
    // 3. Applicare la transizione in memoria (solo da PENDING)
    // 4. Salvare con UPDATE condizionato su status = 'PENDING'
    // 5. Se approvato, aprire il canale di messaggi scuola ↔ NGO

    body.validate()?;

    let invitation = state.invitation.read(&request_id).await?.ok_or_else(|| {
        warn!("Invitation not found: {}", request_id);
        AppError::not_found("Invitation not found")
    })?;

    let responded = invitation
        .respond(
            decision,
            body.responded_by_user_id,
            body.response_message,
            Utc::now(),
        )
        .map_err(|TransitionError::NotPending(current)| {
            warn!("Invitation {} is already {}", request_id, current);
            AppError::invalid_transition(current)
        })?;

    if !state.invitation.apply_response(&responded).await? {
        // someone else answered between our read and the update
        let current = state.invitation.read(&request_id).await?.ok_or_else(|| {
            warn!("Invitation {} vanished during response", request_id);
            AppError::not_found("Invitation not found")
        })?;
        warn!("Invitation {} changed concurrently to {}", request_id, current.status);
        return Err(AppError::invalid_transition(current.status));
    }

    if decision == Decision::Approve {
        open_conversation(&state, &responded).await;
    }

    info!("Invitation {} is now {}", request_id, responded.status);
    Ok(Json(responded))
}

/// Approval stands even if the messaging channel cannot be opened.
async fn open_conversation(state: &AppState, invitation: &Invitation) {
    let campaign = match state.campaign.read(&invitation.ngo_project_id).await {
        Ok(Some(campaign)) => campaign,
        Ok(None) => {
            warn!("Campaign {} missing, no conversation opened", invitation.ngo_project_id);
            return;
        }
        Err(e) => {
            warn!("Failed to load campaign for conversation: {:?}", e);
            return;
        }
    };

    match state
        .conversation
        .create_or_get(
            &invitation.ngo_project_id,
            &invitation.school_id,
            &campaign.ngo_id,
        )
        .await
    {
        Ok(conversation) => debug!("Conversation {} available", conversation.conversation_id),
        Err(e) => warn!("Failed to open conversation for approved invitation: {:?}", e),
    }
}
