//! Bright Aid gateway - campaign invitations between NGOs and schools
//!
//! The server side owns persistence and is the authority on invitation state
//! transitions. The [`client`] module consumes the same HTTP API and carries the
//! view-state models used by NGO and school screens.

pub mod client;
pub mod core;
pub mod dtos;
pub mod entities;
pub mod lifecycle;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, config};
pub use services::root;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest(
            "/api",
            Router::new()
                .nest("/ngos", configure_ngo_routes())
                .nest("/schools", configure_school_routes())
                .nest("/ngo-projects", configure_campaign_routes())
                .nest("/ngo-project-requests", configure_invitation_routes())
                .nest("/conversations", configure_conversation_routes())
                .nest("/fund-transparencies", configure_transparency_routes()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn configure_ngo_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", post(create_ngo))
        .route("/{ngo_id}", get(get_ngo))
}

fn configure_school_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_schools).post(create_school))
        .route("/{school_id}", get(get_school))
        .route("/{school_id}/accepted-campaigns", get(list_accepted_campaigns))
}

/// Configura le routes per le campagne (ngo-projects)
fn configure_campaign_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_campaigns).post(create_campaign))
        .route("/{ngo_project_id}", get(get_campaign).put(update_campaign))
}

/// Configura le routes per la gestione degli inviti
fn configure_invitation_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", post(create_invitation))
        .route("/{request_id}", get(get_invitation))
        .route("/{request_id}/approve", post(approve_invitation))
        .route("/{request_id}/reject", post(reject_invitation))
        .route("/ngo-project/{ngo_project_id}", get(list_campaign_invitations))
        .route("/school/{school_id}", get(list_school_invitations))
        .route(
            "/excluded-schools/{ngo_project_id}",
            get(list_excluded_schools),
        )
}

fn configure_conversation_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/school/{school_id}", get(list_school_conversations))
        .route("/ngo/{ngo_id}", get(list_ngo_conversations))
}

fn configure_transparency_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route(
            "/by-project/{project_id}",
            get(get_transparency).put(upsert_transparency),
        )
        .route(
            "/by-project/{project_id}/photos",
            post(add_photos).delete(remove_photo),
        )
}
