//! Invitation DTOs - Data Transfer Objects per inviti

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /ngo-project-requests`. Status, type and `requestedAt` are set by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitationDTO {
    pub ngo_project_id: i64,
    pub school_id: i64,

    #[validate(length(max = 500, message = "Invitation message must be at most 500 characters"))]
    pub request_message: Option<String>,

    #[validate(range(min = 0.0, message = "Requested budget must be non-negative"))]
    pub requested_budget: f64,

    pub requested_by_user_id: Option<i64>,
}

/// Body of `POST /ngo-project-requests/{id}/approve|reject`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondInvitationDTO {
    #[validate(length(max = 300, message = "Response message must be at most 300 characters"))]
    pub response_message: Option<String>,

    pub responded_by_user_id: i64,
}
