//! School-side list of campaigns the school has accepted

use crate::client::{GatewayClient, GatewayError};
use crate::entities::{Campaign, Invitation};
use crate::lifecycle::accepted_campaigns;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchoolCampaignsView {
    pub school_id: i64,
    pub campaigns: Vec<Campaign>,
    pub invitations: Vec<Invitation>,
    pub search: String,
    pub selected_campaign_id: Option<i64>,
}

impl SchoolCampaignsView {
    pub fn open(school_id: i64, campaigns: Vec<Campaign>, invitations: Vec<Invitation>) -> Self {
        Self {
            school_id,
            campaigns,
            invitations,
            ..Self::default()
        }
    }

    pub async fn load(client: &GatewayClient, school_id: i64) -> Result<Self, GatewayError> {
        let (campaigns, invitations) = futures::future::try_join(
            client.list_campaigns(None),
            client.list_by_school(school_id),
        )
        .await?;
        Ok(Self::open(school_id, campaigns, invitations))
    }

    /// Re-fetches only the invitation set, e.g. after the school answered one.
    pub async fn refresh_invitations(&mut self, client: &GatewayClient) -> Result<(), GatewayError> {
        self.invitations = client.list_by_school(self.school_id).await?;
        Ok(())
    }

    pub fn set_campaigns(&mut self, campaigns: Vec<Campaign>) {
        self.campaigns = campaigns;
    }

    pub fn set_invitations(&mut self, invitations: Vec<Invitation>) {
        self.invitations = invitations;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Accepted campaigns matching the search, recomputed on every call
    pub fn accepted(&self) -> Vec<&Campaign> {
        let needle = self.search.trim().to_lowercase();
        accepted_campaigns(&self.campaigns, &self.invitations, self.school_id)
            .into_iter()
            .filter(|c| {
                needle.is_empty()
                    || c.project_name.to_lowercase().contains(&needle)
                    || c.project_description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Selection is limited to accepted campaigns.
    pub fn select(&mut self, ngo_project_id: i64) -> Option<&Campaign> {
        let found = self
            .accepted()
            .into_iter()
            .any(|c| c.ngo_project_id == ngo_project_id);
        self.selected_campaign_id = found.then_some(ngo_project_id);
        self.selected()
    }

    pub fn selected(&self) -> Option<&Campaign> {
        let id = self.selected_campaign_id?;
        self.campaigns.iter().find(|c| c.ngo_project_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::InvitationStatus;
    use crate::lifecycle::Decision;
    use crate::lifecycle::tests::{at, campaign, invitation};

    #[test]
    fn accepted_tracks_invitation_changes() {
        let mut view = SchoolCampaignsView::open(
            9,
            vec![campaign(5, "Books"), campaign(6, "Meals")],
            vec![
                invitation(1, 5, 9, InvitationStatus::Pending, at(0)),
                invitation(2, 6, 9, InvitationStatus::Approved, at(1)),
            ],
        );
        let ids: Vec<i64> = view.accepted().iter().map(|c| c.ngo_project_id).collect();
        assert_eq!(ids, vec![6]);

        let approved = view.invitations[0]
            .respond(Decision::Approve, 3, None, at(2))
            .unwrap();
        let mut invitations = view.invitations.clone();
        invitations[0] = approved;
        view.set_invitations(invitations);

        let ids: Vec<i64> = view.accepted().iter().map(|c| c.ngo_project_id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn search_and_selection_stay_within_accepted() {
        let mut view = SchoolCampaignsView::open(
            9,
            vec![campaign(5, "Books"), campaign(6, "Meals")],
            vec![invitation(1, 5, 9, InvitationStatus::Approved, at(0))],
        );
        assert!(view.select(6).is_none());
        assert_eq!(view.select(5).map(|c| c.ngo_project_id), Some(5));

        view.set_search("MEAL");
        assert!(view.accepted().is_empty());
        view.set_search("books desc");
        assert_eq!(view.accepted().len(), 1);

        view.reset();
        assert_eq!(view, SchoolCampaignsView::default());
    }
}
