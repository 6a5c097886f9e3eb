//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Ogni modulo gestisce gli endpoint HTTP per una specifica risorsa.

pub mod campaign;
pub mod conversation;
pub mod invitation;
pub mod organization;
pub mod transparency;

// Re-exports per facilitare l'import
pub use campaign::{
    create_campaign, get_campaign, list_accepted_campaigns, list_campaigns, update_campaign,
};
pub use conversation::{list_ngo_conversations, list_school_conversations};
pub use invitation::{
    approve_invitation, create_invitation, get_invitation, list_campaign_invitations,
    list_excluded_schools, list_school_invitations, reject_invitation,
};
pub use organization::{create_ngo, create_school, get_ngo, get_school, list_schools};
pub use transparency::{add_photos, get_transparency, remove_photo, upsert_transparency};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
