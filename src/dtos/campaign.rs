//! Campaign DTOs - Data Transfer Objects per campagne

use crate::entities::CampaignStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateCampaignDTO {
    pub ngo_id: i64,

    #[validate(length(min = 1, max = 200, message = "Campaign name is required"))]
    pub project_name: String,

    #[validate(length(min = 1, message = "Campaign description is required"))]
    pub project_description: String,

    #[validate(range(min = 0.0, message = "Budget must be non-negative"))]
    pub budget: f64,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<CampaignStatus>,
}

/// Partial update: only `Some(_)` fields are written
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_dates"))]
pub struct UpdateCampaignDTO {
    #[validate(length(min = 1, max = 200, message = "Campaign name must not be empty"))]
    pub project_name: Option<String>,

    #[validate(length(min = 1, message = "Campaign description must not be empty"))]
    pub project_description: Option<String>,

    #[validate(range(min = 0.0, message = "Budget must be non-negative"))]
    pub budget: Option<f64>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<CampaignStatus>,
}

pub(crate) fn check_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            let mut err = ValidationError::new("date_range");
            err.message = Some("End date must not be before start date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

fn validate_create_dates(dto: &CreateCampaignDTO) -> Result<(), ValidationError> {
    check_date_range(dto.start_date, dto.end_date)
}

fn validate_update_dates(dto: &UpdateCampaignDTO) -> Result<(), ValidationError> {
    check_date_range(dto.start_date, dto.end_date)
}
