//! Transparency DTOs

use crate::entities::PhotoKind;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Absent fields are left untouched on update
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertTransparencyDTO {
    #[validate(length(max = 5000))]
    pub additional_notes: Option<String>,
    #[validate(length(max = 5000))]
    pub beneficiary_feedback: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddPhotosDTO {
    pub kind: PhotoKind,
    #[validate(length(min = 1, message = "At least one photo URL is required"))]
    pub urls: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemovePhotoQuery {
    pub kind: PhotoKind,
    pub url: String,
}
