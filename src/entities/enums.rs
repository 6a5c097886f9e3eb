//! Enumerazioni - Closed status/kind types stored as uppercase text

use serde::{Deserialize, Serialize};
use std::fmt;

// ********************* ENUMERAZIONI UTILI **********************//

/// Lifecycle state of an invitation. `Pending` is the only non-terminal state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum InvitationStatus {
    Pending,
    Approved,
    Rejected,
}

impl InvitationStatus {
    /// Active invitations block a new invitation for the same campaign and school.
    pub fn is_active(self) -> bool {
        match self {
            InvitationStatus::Pending | InvitationStatus::Approved => true,
            InvitationStatus::Rejected => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        match self {
            InvitationStatus::Pending => false,
            InvitationStatus::Approved | InvitationStatus::Rejected => true,
        }
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvitationStatus::Pending => "PENDING",
            InvitationStatus::Approved => "APPROVED",
            InvitationStatus::Rejected => "REJECTED",
        };
        f.write_str(s)
    }
}

/// Who opened the request. Every flow in this service creates `Invite`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    Invite,
    JoinRequest,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    #[default]
    Planned,
    Active,
    InProgress,
    Paused,
    Completed,
    Cancelled,
}

/// Which photo collection of a transparency record an operation targets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PhotoKind {
    Before,
    After,
}
