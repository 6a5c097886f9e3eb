//! Fund transparency card shown on a campaign detail page

use crate::client::{GatewayClient, GatewayError};
use crate::dtos::UpsertTransparencyDTO;
use crate::entities::{PhotoKind, TransparencyView};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(tag = "state", content = "record", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransparencyState {
    #[default]
    NotLoaded,
    /// The project has no record yet
    Missing,
    Loaded(TransparencyView),
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransparencyCard {
    pub project_id: i64,
    pub state: TransparencyState,
    pub error: Option<String>,
}

impl TransparencyCard {
    pub fn open(project_id: i64) -> Self {
        Self {
            project_id,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn record(&self) -> Option<&TransparencyView> {
        match &self.state {
            TransparencyState::Loaded(record) => Some(record),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.state == TransparencyState::Missing
    }

    /// A record exists but carries neither photos nor notes.
    pub fn is_empty(&self) -> bool {
        self.record().is_some_and(|r| {
            r.before_photos.is_empty()
                && r.after_photos.is_empty()
                && r.additional_notes.as_deref().is_none_or(str::is_empty)
                && r.beneficiary_feedback.as_deref().is_none_or(str::is_empty)
        })
    }

    pub async fn load(&mut self, client: &GatewayClient) -> Result<(), GatewayError> {
        let fetched = client.get_transparency(self.project_id).await;
        self.apply(fetched.map(|r| match r {
            Some(record) => TransparencyState::Loaded(record),
            None => TransparencyState::Missing,
        }))
    }

    pub async fn save(
        &mut self,
        client: &GatewayClient,
        data: &UpsertTransparencyDTO,
    ) -> Result<(), GatewayError> {
        let saved = client.update_transparency(self.project_id, data).await;
        self.apply(saved.map(TransparencyState::Loaded))
    }

    pub async fn add_photos(
        &mut self,
        client: &GatewayClient,
        kind: PhotoKind,
        urls: Vec<String>,
    ) -> Result<(), GatewayError> {
        let saved = client.upload_photos(self.project_id, kind, urls).await;
        self.apply(saved.map(TransparencyState::Loaded))
    }

    pub async fn remove_photo(
        &mut self,
        client: &GatewayClient,
        kind: PhotoKind,
        url: &str,
    ) -> Result<(), GatewayError> {
        let saved = client.delete_photo(self.project_id, kind, url).await;
        self.apply(saved.map(TransparencyState::Loaded))
    }

    /// Takes the gateway's record on success; keeps the previous state on error.
    fn apply(&mut self, outcome: Result<TransparencyState, GatewayError>) -> Result<(), GatewayError> {
        match outcome {
            Ok(state) => {
                self.state = state;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("Transparency update for project {} failed: {}", self.project_id, e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
