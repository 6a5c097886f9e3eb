//! Invitation panels: actionable on the school side, read-only on the NGO side

use crate::client::{GatewayClient, GatewayError};
use crate::entities::{Invitation, InvitationStatus};
use crate::lifecycle::{Decision, StatusCounts, count_by_status, sort_most_recent_first};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Message sent when a school approves without writing one
pub const DEFAULT_ACCEPT_MESSAGE: &str = "Invitation accepted";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl RequestFilter {
    pub fn matches(self, status: InvitationStatus) -> bool {
        match self {
            RequestFilter::All => true,
            RequestFilter::Pending => status == InvitationStatus::Pending,
            RequestFilter::Approved => status == InvitationStatus::Approved,
            RequestFilter::Rejected => status == InvitationStatus::Rejected,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRequestsPanel {
    pub school_id: i64,
    pub invitations: Vec<Invitation>,
    pub filter: RequestFilter,
    pub selected_request_id: Option<i64>,
    pub response_message: String,
    pub submitting: bool,
    /// Set when the gateway reports the invitation was answered elsewhere
    pub stale: bool,
    pub error: Option<String>,
}

impl SchoolRequestsPanel {
    pub fn open(school_id: i64, mut invitations: Vec<Invitation>) -> Self {
        sort_most_recent_first(&mut invitations);
        Self {
            school_id,
            invitations,
            ..Self::default()
        }
    }

    pub async fn load(client: &GatewayClient, school_id: i64) -> Result<Self, GatewayError> {
        let invitations = client.list_by_school(school_id).await?;
        Ok(Self::open(school_id, invitations))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_filter(&mut self, filter: RequestFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Invitation> {
        self.invitations
            .iter()
            .filter(|i| self.filter.matches(i.status))
            .collect()
    }

    pub fn counts(&self) -> StatusCounts {
        count_by_status(&self.invitations)
    }

    pub fn select(&mut self, request_id: i64) {
        self.selected_request_id = Some(request_id);
        self.response_message.clear();
        self.error = None;
    }

    /// Approves or rejects `request_id` with the current response message.
    ///
    /// The returned record replaces the local one in place. Any error restores
    /// the panel as it was before the call, then records the error.
    pub async fn respond(
        &mut self,
        client: &GatewayClient,
        request_id: i64,
        decision: Decision,
        responder_id: i64,
    ) -> Result<Invitation, GatewayError> {
        if self.submitting {
            return Err(GatewayError::Busy);
        }
        let message = self.outgoing_message(decision);
        let snapshot = self.clone();

        self.submitting = true;
        let outcome = client
            .respond(request_id, decision, responder_id, message)
            .await;

        match outcome {
            Ok(updated) => {
                info!("Invitation {} is now {}", updated.request_id, updated.status);
                if let Some(slot) = self
                    .invitations
                    .iter_mut()
                    .find(|i| i.request_id == updated.request_id)
                {
                    *slot = updated.clone();
                }
                self.submitting = false;
                self.selected_request_id = None;
                self.response_message.clear();
                self.error = None;
                Ok(updated)
            }
            Err(e) => {
                warn!("Response to invitation {} failed: {}", request_id, e);
                *self = snapshot;
                self.stale = self.stale || e.needs_refresh();
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    fn outgoing_message(&self, decision: Decision) -> Option<String> {
        let message = self.response_message.trim();
        match decision {
            Decision::Approve if message.is_empty() => Some(DEFAULT_ACCEPT_MESSAGE.to_string()),
            _ if message.is_empty() => None,
            _ => Some(message.to_string()),
        }
    }
}

/// Read-only history of one campaign's invitations
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NgoRequestsPanel {
    pub ngo_project_id: i64,
    pub invitations: Vec<Invitation>,
    pub filter: RequestFilter,
}

impl NgoRequestsPanel {
    pub fn open(ngo_project_id: i64, mut invitations: Vec<Invitation>) -> Self {
        sort_most_recent_first(&mut invitations);
        Self {
            ngo_project_id,
            invitations,
            filter: RequestFilter::All,
        }
    }

    pub async fn load(client: &GatewayClient, ngo_project_id: i64) -> Result<Self, GatewayError> {
        let invitations = client.list_by_campaign(ngo_project_id).await?;
        Ok(Self::open(ngo_project_id, invitations))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn visible(&self) -> Vec<&Invitation> {
        self.invitations
            .iter()
            .filter(|i| self.filter.matches(i.status))
            .collect()
    }

    pub fn counts(&self) -> StatusCounts {
        count_by_status(&self.invitations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::tests::{at, invitation};

    fn panel() -> SchoolRequestsPanel {
        SchoolRequestsPanel::open(
            9,
            vec![
                invitation(1, 5, 9, InvitationStatus::Approved, at(1)),
                invitation(2, 6, 9, InvitationStatus::Pending, at(3)),
                invitation(3, 7, 9, InvitationStatus::Rejected, at(2)),
            ],
        )
    }

    #[test]
    fn open_sorts_most_recent_first() {
        let ids: Vec<i64> = panel().invitations.iter().map(|i| i.request_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn filter_narrows_visible_rows_but_not_counts() {
        let mut p = panel();
        p.set_filter(RequestFilter::Pending);
        let visible: Vec<i64> = p.visible().iter().map(|i| i.request_id).collect();
        assert_eq!(visible, vec![2]);
        assert_eq!(p.counts().total(), 3);
        assert_eq!(p.counts().approved, 1);

        p.set_filter(RequestFilter::All);
        assert_eq!(p.visible().len(), 3);
    }

    #[test]
    fn empty_approval_uses_default_message() {
        let mut p = panel();
        p.select(2);
        assert_eq!(
            p.outgoing_message(Decision::Approve).as_deref(),
            Some(DEFAULT_ACCEPT_MESSAGE)
        );
        assert_eq!(p.outgoing_message(Decision::Reject), None);

        p.response_message = " Thanks ".into();
        assert_eq!(p.outgoing_message(Decision::Reject).as_deref(), Some("Thanks"));
    }

    #[test]
    fn ngo_panel_counts_history() {
        let p = NgoRequestsPanel::open(
            5,
            vec![
                invitation(1, 5, 9, InvitationStatus::Rejected, at(0)),
                invitation(2, 5, 9, InvitationStatus::Pending, at(5)),
            ],
        );
        assert_eq!(p.invitations[0].request_id, 2);
        assert_eq!(p.counts().pending, 1);
        assert_eq!(p.counts().rejected, 1);
    }

    #[test]
    fn filter_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&RequestFilter::Approved).unwrap(), "\"APPROVED\"");
    }
}
