//! HTTP client for the gateway API
//!
//! Every mutating call returns the updated record so callers refresh only the
//! projection that depends on it. No retries are attempted.

use super::error::GatewayError;
use crate::core::ClientConfig;
use crate::dtos::{
    AddPhotosDTO, CreateCampaignDTO, CreateInvitationDTO, CreateNgoDTO, CreateSchoolDTO,
    RespondInvitationDTO, UpdateCampaignDTO, UpsertTransparencyDTO,
};
use crate::entities::{
    Campaign, Conversation, Invitation, Ngo, PhotoKind, School, TransparencyView,
};
use crate::lifecycle::{Decision, sort_most_recent_first};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GatewayError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Gateway returned an error");
            return Err(GatewayError::from_response(status, &body));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Like [`send`](Self::send) but maps 404 to `None`.
    async fn send_optional<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, GatewayError> {
        match self.send(request).await {
            Ok(value) => Ok(Some(value)),
            Err(GatewayError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // ---------------------------------------------------------------- schools / NGOs

    pub async fn list_schools(&self) -> Result<Vec<School>, GatewayError> {
        self.send(self.client.get(self.url("/schools"))).await
    }

    pub async fn get_school(&self, school_id: i64) -> Result<Option<School>, GatewayError> {
        self.send_optional(self.client.get(self.url(&format!("/schools/{school_id}"))))
            .await
    }

    pub async fn create_school(&self, data: &CreateSchoolDTO) -> Result<School, GatewayError> {
        self.send(self.client.post(self.url("/schools")).json(data))
            .await
    }

    pub async fn create_ngo(&self, data: &CreateNgoDTO) -> Result<Ngo, GatewayError> {
        self.send(self.client.post(self.url("/ngos")).json(data))
            .await
    }

    // ---------------------------------------------------------------- campaigns

    /// All campaigns, or only those owned by `ngo_id`
    pub async fn list_campaigns(&self, ngo_id: Option<i64>) -> Result<Vec<Campaign>, GatewayError> {
        let mut request = self.client.get(self.url("/ngo-projects"));
        if let Some(ngo_id) = ngo_id {
            request = request.query(&[("ngoId", ngo_id)]);
        }
        self.send(request).await
    }

    pub async fn get_campaign(&self, ngo_project_id: i64) -> Result<Option<Campaign>, GatewayError> {
        self.send_optional(
            self.client
                .get(self.url(&format!("/ngo-projects/{ngo_project_id}"))),
        )
        .await
    }

    pub async fn create_campaign(&self, data: &CreateCampaignDTO) -> Result<Campaign, GatewayError> {
        self.send(self.client.post(self.url("/ngo-projects")).json(data))
            .await
    }

    pub async fn update_campaign(
        &self,
        ngo_project_id: i64,
        data: &UpdateCampaignDTO,
    ) -> Result<Campaign, GatewayError> {
        self.send(
            self.client
                .put(self.url(&format!("/ngo-projects/{ngo_project_id}")))
                .json(data),
        )
        .await
    }

    /// Server-side computation of the school's accepted campaigns
    pub async fn accepted_campaigns(&self, school_id: i64) -> Result<Vec<Campaign>, GatewayError> {
        self.send(
            self.client
                .get(self.url(&format!("/schools/{school_id}/accepted-campaigns"))),
        )
        .await
    }

    // ---------------------------------------------------------------- invitations

    #[instrument(skip(self, data), fields(ngo_project_id = data.ngo_project_id, school_id = data.school_id))]
    pub async fn create_invitation(
        &self,
        data: &CreateInvitationDTO,
    ) -> Result<Invitation, GatewayError> {
        debug!("Sending invitation");
        self.send(self.client.post(self.url("/ngo-project-requests")).json(data))
            .await
    }

    /// Invitation history of a campaign, most recent first
    pub async fn list_by_campaign(&self, ngo_project_id: i64) -> Result<Vec<Invitation>, GatewayError> {
        let mut invitations: Vec<Invitation> = self
            .send(self.client.get(self.url(&format!(
                "/ngo-project-requests/ngo-project/{ngo_project_id}"
            ))))
            .await?;
        sort_most_recent_first(&mut invitations);
        Ok(invitations)
    }

    /// Invitation history of a school, most recent first
    pub async fn list_by_school(&self, school_id: i64) -> Result<Vec<Invitation>, GatewayError> {
        let mut invitations: Vec<Invitation> = self
            .send(
                self.client
                    .get(self.url(&format!("/ngo-project-requests/school/{school_id}"))),
            )
            .await?;
        sort_most_recent_first(&mut invitations);
        Ok(invitations)
    }

    pub async fn excluded_schools(&self, ngo_project_id: i64) -> Result<Vec<i64>, GatewayError> {
        self.send(self.client.get(self.url(&format!(
            "/ngo-project-requests/excluded-schools/{ngo_project_id}"
        ))))
        .await
    }

    #[instrument(skip(self, message))]
    pub async fn respond(
        &self,
        request_id: i64,
        decision: Decision,
        responder_id: i64,
        message: Option<String>,
    ) -> Result<Invitation, GatewayError> {
        let body = RespondInvitationDTO {
            response_message: message,
            responded_by_user_id: responder_id,
        };
        self.send(
            self.client
                .post(self.url(&format!("/ngo-project-requests/{request_id}/{decision}")))
                .json(&body),
        )
        .await
    }

    pub async fn approve(
        &self,
        request_id: i64,
        responder_id: i64,
        message: Option<String>,
    ) -> Result<Invitation, GatewayError> {
        self.respond(request_id, Decision::Approve, responder_id, message)
            .await
    }

    pub async fn reject(
        &self,
        request_id: i64,
        responder_id: i64,
        message: Option<String>,
    ) -> Result<Invitation, GatewayError> {
        self.respond(request_id, Decision::Reject, responder_id, message)
            .await
    }

    // ---------------------------------------------------------------- messaging

    pub async fn school_conversations(&self, school_id: i64) -> Result<Vec<Conversation>, GatewayError> {
        self.send(
            self.client
                .get(self.url(&format!("/conversations/school/{school_id}"))),
        )
        .await
    }

    // ---------------------------------------------------------------- transparency

    /// `Ok(None)` when the project has no record at all
    pub async fn get_transparency(
        &self,
        project_id: i64,
    ) -> Result<Option<TransparencyView>, GatewayError> {
        self.send_optional(
            self.client
                .get(self.url(&format!("/fund-transparencies/by-project/{project_id}"))),
        )
        .await
    }

    pub async fn update_transparency(
        &self,
        project_id: i64,
        data: &UpsertTransparencyDTO,
    ) -> Result<TransparencyView, GatewayError> {
        self.send(
            self.client
                .put(self.url(&format!("/fund-transparencies/by-project/{project_id}")))
                .json(data),
        )
        .await
    }

    pub async fn upload_photos(
        &self,
        project_id: i64,
        kind: PhotoKind,
        urls: Vec<String>,
    ) -> Result<TransparencyView, GatewayError> {
        let body = AddPhotosDTO { kind, urls };
        self.send(
            self.client
                .post(self.url(&format!(
                    "/fund-transparencies/by-project/{project_id}/photos"
                )))
                .json(&body),
        )
        .await
    }

    pub async fn delete_photo(
        &self,
        project_id: i64,
        kind: PhotoKind,
        url: &str,
    ) -> Result<TransparencyView, GatewayError> {
        let kind = match kind {
            PhotoKind::Before => "BEFORE",
            PhotoKind::After => "AFTER",
        };
        self.send(
            self.client
                .delete(self.url(&format!(
                    "/fund-transparencies/by-project/{project_id}/photos"
                )))
                .query(&[("kind", kind), ("url", url)]),
        )
        .await
    }
}
