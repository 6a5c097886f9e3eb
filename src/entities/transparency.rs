//! Transparency entity - per-project evidence of fund usage

use super::enums::PhotoKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransparencyRecord {
    pub transparency_id: i64,
    pub project_id: i64,
    pub additional_notes: Option<String>,
    pub beneficiary_feedback: Option<String>,
    pub is_public: bool,
    // salvate come array JSON, l'ordine di inserimento è significativo
    pub before_photos: Json<Vec<String>>,
    pub after_photos: Json<Vec<String>>,
    pub updated_at: DateTime<Utc>,
}

impl TransparencyRecord {
    pub fn photos(&self, kind: PhotoKind) -> &[String] {
        match kind {
            PhotoKind::Before => &self.before_photos,
            PhotoKind::After => &self.after_photos,
        }
    }

    pub fn photos_mut(&mut self, kind: PhotoKind) -> &mut Vec<String> {
        match kind {
            PhotoKind::Before => &mut self.before_photos.0,
            PhotoKind::After => &mut self.after_photos.0,
        }
    }

    /// Appends `urls` to the chosen collection, keeping their order.
    pub fn append_photos(&mut self, kind: PhotoKind, urls: &[String]) {
        self.photos_mut(kind).extend(urls.iter().cloned());
    }

    /// Removes every occurrence of `url`. Returns how many entries were dropped.
    pub fn remove_photo(&mut self, kind: PhotoKind, url: &str) -> usize {
        let photos = self.photos_mut(kind);
        let before = photos.len();
        photos.retain(|p| p != url);
        before - photos.len()
    }
}

/// Wire shape of a transparency record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransparencyView {
    pub transparency_id: i64,
    pub project_id: i64,
    pub additional_notes: Option<String>,
    pub beneficiary_feedback: Option<String>,
    pub is_public: bool,
    pub before_photos: Vec<String>,
    pub after_photos: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<TransparencyRecord> for TransparencyView {
    fn from(value: TransparencyRecord) -> Self {
        Self {
            transparency_id: value.transparency_id,
            project_id: value.project_id,
            additional_notes: value.additional_notes,
            beneficiary_feedback: value.beneficiary_feedback,
            is_public: value.is_public,
            before_photos: value.before_photos.0,
            after_photos: value.after_photos.0,
            updated_at: value.updated_at,
        }
    }
}
