//! NGO-side composer for inviting schools to a campaign

use crate::client::{GatewayClient, GatewayError};
use crate::dtos::CreateInvitationDTO;
use crate::entities::{Campaign, Invitation, School};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{info, warn};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InviteComposer {
    pub campaign: Option<Campaign>,
    pub schools: Vec<School>,
    /// Schools holding a pending or approved invitation for the campaign
    pub excluded: BTreeSet<i64>,
    pub search: String,
    pub selected_school_id: Option<i64>,
    pub message: String,
    pub budget: f64,
    pub submitting: bool,
    pub error: Option<String>,
}

pub fn default_invitation_message(project_name: &str) -> String {
    format!("We invite you to join our campaign: {project_name}")
}

impl InviteComposer {
    /// Fresh composer for `campaign`; any previous state is discarded.
    pub fn open(
        campaign: Campaign,
        schools: Vec<School>,
        excluded: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self {
            message: default_invitation_message(&campaign.project_name),
            budget: campaign.budget,
            campaign: Some(campaign),
            schools,
            excluded: excluded.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Fetches schools and the excluded set together, then opens the composer.
    pub async fn load(client: &GatewayClient, campaign: Campaign) -> Result<Self, GatewayError> {
        let (schools, excluded) = futures::future::try_join(
            client.list_schools(),
            client.excluded_schools(campaign.ngo_project_id),
        )
        .await?;
        Ok(Self::open(campaign, schools, excluded))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Schools that may still be invited, narrowed by the search term
    pub fn candidates(&self) -> Vec<&School> {
        let needle = self.search.trim().to_lowercase();
        self.schools
            .iter()
            .filter(|s| !self.excluded.contains(&s.school_id))
            .filter(|s| needle.is_empty() || matches_search(s, &needle))
            .collect()
    }

    /// Picks a school to invite. Excluded or unknown schools are ignored.
    pub fn select(&mut self, school_id: i64) -> bool {
        let selectable = self.candidates().iter().any(|s| s.school_id == school_id);
        if selectable {
            self.selected_school_id = Some(school_id);
            self.error = None;
        }
        selectable
    }

    pub fn selected_school(&self) -> Option<&School> {
        let id = self.selected_school_id?;
        self.schools.iter().find(|s| s.school_id == id)
    }

    pub fn to_request(&self, requested_by_user_id: Option<i64>) -> Option<CreateInvitationDTO> {
        let campaign = self.campaign.as_ref()?;
        let school_id = self.selected_school_id?;
        let message = self.message.trim();
        Some(CreateInvitationDTO {
            ngo_project_id: campaign.ngo_project_id,
            school_id,
            request_message: (!message.is_empty()).then(|| message.to_string()),
            requested_budget: self.budget,
            requested_by_user_id,
        })
    }

    /// Sends the invitation for the selected school.
    ///
    /// On success the school joins the excluded set and the selection is
    /// cleared. A `Conflict` does the same, since the school already holds an
    /// active invitation. Any other failure only changes `error`.
    pub async fn submit(
        &mut self,
        client: &GatewayClient,
        requested_by_user_id: Option<i64>,
    ) -> Result<Invitation, GatewayError> {
        if self.submitting {
            return Err(GatewayError::Busy);
        }
        let Some(request) = self.to_request(requested_by_user_id) else {
            return Err(GatewayError::Rejected {
                status: reqwest::StatusCode::BAD_REQUEST,
                message: "Select a school to invite".to_string(),
            });
        };

        self.submitting = true;
        let outcome = client.create_invitation(&request).await;
        self.submitting = false;

        match outcome {
            Ok(invitation) => {
                info!("Invited school {}", invitation.school_id);
                self.excluded.insert(invitation.school_id);
                self.selected_school_id = None;
                self.error = None;
                Ok(invitation)
            }
            Err(e) => {
                warn!("Invitation failed: {}", e);
                if matches!(e, GatewayError::Conflict { .. }) {
                    // the gateway already holds an active invitation for this school
                    self.excluded.insert(request.school_id);
                    self.selected_school_id = None;
                }
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

fn matches_search(school: &School, needle: &str) -> bool {
    let contains = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(needle));
    contains(Some(&school.school_name))
        || contains(school.district.as_deref())
        || contains(school.upazila.as_deref())
}
