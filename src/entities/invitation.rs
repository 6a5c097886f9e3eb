//! Invitation entity - An NGO campaign's offer to a school (`ngo-project-request`)

use super::enums::{InvitationStatus, RequestType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub request_id: i64,
    pub ngo_project_id: i64,
    pub school_id: i64,
    pub request_type: RequestType,
    pub status: InvitationStatus,
    pub request_message: Option<String>,
    pub response_message: Option<String>,
    // snapshot of the campaign budget at invite time, never updated
    pub requested_budget: f64,
    pub requested_by_user_id: Option<i64>,
    pub responded_by_user_id: Option<i64>,
    pub requested_at: DateTime<Utc>,
    // None while the invitation is pending
    pub responded_at: Option<DateTime<Utc>>,
}
