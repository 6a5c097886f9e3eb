//! Invitation lifecycle rules
//!
//! Pure functions over invitations and campaigns, with no I/O. The gateway
//! handlers use them as the transition guard before touching the database,
//! and the client-side views use the same functions to derive what they show.
//!
//! ```text
//! PENDING ──approve──▶ APPROVED
//!    └─────reject────▶ REJECTED
//! ```

use crate::entities::{Campaign, Invitation, InvitationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A school's answer to a pending invitation
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target_status(self) -> InvitationStatus {
        match self {
            Decision::Approve => InvitationStatus::Approved,
            Decision::Reject => InvitationStatus::Rejected,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approve => f.write_str("approve"),
            Decision::Reject => f.write_str("reject"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The invitation was already answered; carries the state it is in.
    NotPending(InvitationStatus),
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::NotPending(current) => {
                write!(f, "invitation is already {current}")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

impl Invitation {
    /// Applies a school response and returns the stamped record.
    ///
    /// Only valid from `Pending`. `responded_at` is clamped so that it is never
    /// earlier than `requested_at`, even if the caller's clock is behind.
    pub fn respond(
        &self,
        decision: Decision,
        responder_id: i64,
        message: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Invitation, TransitionError> {
        if self.status != InvitationStatus::Pending {
            return Err(TransitionError::NotPending(self.status));
        }

        Ok(Invitation {
            status: decision.target_status(),
            response_message: message,
            responded_by_user_id: Some(responder_id),
            responded_at: Some(now.max(self.requested_at)),
            ..self.clone()
        })
    }
}

/// Fails when `existing` already holds an active invitation for the pair.
pub fn ensure_no_active_invitation(
    existing: &[Invitation],
    ngo_project_id: i64,
    school_id: i64,
) -> Result<(), InvitationStatus> {
    match existing.iter().find(|i| {
        i.ngo_project_id == ngo_project_id && i.school_id == school_id && i.status.is_active()
    }) {
        Some(active) => Err(active.status),
        None => Ok(()),
    }
}

/// Schools that must not be offered a new invitation for `ngo_project_id`.
pub fn excluded_schools(invitations: &[Invitation], ngo_project_id: i64) -> BTreeSet<i64> {
    invitations
        .iter()
        .filter(|i| i.ngo_project_id == ngo_project_id && i.status.is_active())
        .map(|i| i.school_id)
        .collect()
}

/// Campaigns visible to `school_id`: those it holds an approved invitation for.
///
/// Input order of `campaigns` is preserved. Recompute whenever either input changes.
pub fn accepted_campaigns<'a>(
    campaigns: &'a [Campaign],
    invitations: &[Invitation],
    school_id: i64,
) -> Vec<&'a Campaign> {
    let approved: HashSet<i64> = invitations
        .iter()
        .filter(|i| i.school_id == school_id && i.status == InvitationStatus::Approved)
        .map(|i| i.ngo_project_id)
        .collect();

    campaigns
        .iter()
        .filter(|c| approved.contains(&c.ngo_project_id))
        .collect()
}

/// Display order: most recent `requested_at` first, newest id first on ties.
pub fn sort_most_recent_first(invitations: &mut [Invitation]) {
    invitations.sort_by(|a, b| {
        b.requested_at
            .cmp(&a.requested_at)
            .then_with(|| b.request_id.cmp(&a.request_id))
    });
}

/// Per-status tally used by the request panels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }
}

pub fn count_by_status(invitations: &[Invitation]) -> StatusCounts {
    invitations
        .iter()
        .fold(StatusCounts::default(), |mut acc, i| {
            match i.status {
                InvitationStatus::Pending => acc.pending += 1,
                InvitationStatus::Approved => acc.approved += 1,
                InvitationStatus::Rejected => acc.rejected += 1,
            }
            acc
        })
}
