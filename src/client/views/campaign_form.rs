//! Campaign create/edit form state

use crate::client::{GatewayClient, GatewayError};
use crate::dtos::{CreateCampaignDTO, UpdateCampaignDTO};
use crate::entities::{Campaign, CampaignStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Raw input as typed by the operator
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignForm {
    /// `Some` when editing an existing campaign
    pub editing_id: Option<i64>,
    pub project_name: String,
    pub project_description: String,
    pub budget: String,
    pub start_date: String,
    pub end_date: String,
    pub status: CampaignStatus,
    pub errors: Vec<FieldError>,
    pub submitting: bool,
}

struct ParsedForm {
    budget: f64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl CampaignForm {
    pub fn edit(campaign: &Campaign) -> Self {
        let date = |d: Option<NaiveDate>| d.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default();
        Self {
            editing_id: Some(campaign.ngo_project_id),
            project_name: campaign.project_name.clone(),
            project_description: campaign.project_description.clone(),
            budget: campaign.budget.to_string(),
            start_date: date(campaign.start_date),
            end_date: date(campaign.end_date),
            status: campaign.status,
            ..Self::default()
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Checks the fields and records the errors on the form.
    pub fn validate(&mut self) -> bool {
        self.errors = match self.parse() {
            Ok(_) => Vec::new(),
            Err(errors) => errors,
        };
        self.errors.is_empty()
    }

    fn parse(&self) -> Result<ParsedForm, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.project_name.trim().is_empty() {
            errors.push(FieldError::new("projectName", "Campaign name is required"));
        }
        if self.project_description.trim().is_empty() {
            errors.push(FieldError::new(
                "projectDescription",
                "Campaign description is required",
            ));
        }

        let budget = match self.budget.trim().parse::<f64>() {
            Ok(b) if b.is_finite() && b >= 0.0 => Some(b),
            _ => {
                errors.push(FieldError::new("budget", "Budget must be a non-negative number"));
                None
            }
        };

        let start_date = parse_date(&self.start_date, "startDate", &mut errors);
        let end_date = parse_date(&self.end_date, "endDate", &mut errors);
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errors.push(FieldError::new("endDate", "End date must not be before start date"));
            }
        }

        match budget {
            Some(budget) if errors.is_empty() => Ok(ParsedForm {
                budget,
                start_date,
                end_date,
            }),
            _ => Err(errors),
        }
    }

    pub fn to_request(&self, ngo_id: i64) -> Result<CreateCampaignDTO, Vec<FieldError>> {
        let parsed = self.parse()?;
        Ok(self.create_from(ngo_id, &parsed))
    }

    pub fn to_update(&self) -> Result<UpdateCampaignDTO, Vec<FieldError>> {
        let parsed = self.parse()?;
        Ok(self.update_from(&parsed))
    }

    fn create_from(&self, ngo_id: i64, parsed: &ParsedForm) -> CreateCampaignDTO {
        CreateCampaignDTO {
            ngo_id,
            project_name: self.project_name.trim().to_string(),
            project_description: self.project_description.trim().to_string(),
            budget: parsed.budget,
            start_date: parsed.start_date,
            end_date: parsed.end_date,
            status: Some(self.status),
        }
    }

    fn update_from(&self, parsed: &ParsedForm) -> UpdateCampaignDTO {
        UpdateCampaignDTO {
            project_name: Some(self.project_name.trim().to_string()),
            project_description: Some(self.project_description.trim().to_string()),
            budget: Some(parsed.budget),
            start_date: parsed.start_date,
            end_date: parsed.end_date,
            status: Some(self.status),
        }
    }

    /// Creates or updates the campaign. Returns `Ok(None)` when validation fails.
    pub async fn submit(
        &mut self,
        client: &GatewayClient,
        ngo_id: i64,
    ) -> Result<Option<Campaign>, GatewayError> {
        if self.submitting {
            return Err(GatewayError::Busy);
        }
        let parsed = match self.parse() {
            Ok(parsed) => parsed,
            Err(errors) => {
                self.errors = errors;
                return Ok(None);
            }
        };
        self.errors.clear();

        self.submitting = true;
        let outcome = match self.editing_id {
            Some(id) => client.update_campaign(id, &self.update_from(&parsed)).await,
            None => client.create_campaign(&self.create_from(ngo_id, &parsed)).await,
        };
        self.submitting = false;

        let campaign = outcome?;
        self.reset();
        Ok(Some(campaign))
    }
}

fn parse_date(raw: &str, field: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(field, "Dates must use YYYY-MM-DD"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::tests::campaign;

    fn filled() -> CampaignForm {
        CampaignForm {
            project_name: "Books".into(),
            project_description: "Textbooks".into(),
            budget: "1500.50".into(),
            start_date: "2025-03-01".into(),
            end_date: "2025-06-30".into(),
            ..CampaignForm::default()
        }
    }

    #[test]
    fn valid_form_builds_request() {
        let request = filled().to_request(3).unwrap();
        assert_eq!(request.ngo_id, 3);
        assert_eq!(request.budget, 1500.5);
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(request.status, Some(CampaignStatus::Planned));
    }

    #[test]
    fn validate_collects_every_problem() {
        let mut form = CampaignForm {
            budget: "-3".into(),
            start_date: "2025-06-30".into(),
            end_date: "2025-03-01".into(),
            ..CampaignForm::default()
        };
        assert!(!form.validate());
        let fields: Vec<&str> = form.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["projectName", "projectDescription", "budget", "endDate"]);
    }

    #[test]
    fn budget_must_be_a_number() {
        let mut form = filled();
        form.budget = "lots".into();
        assert!(!form.validate());
        form.budget = "0".into();
        assert!(form.validate());
        assert!(form.errors.is_empty());
    }

    #[test]
    fn edit_prefills_and_reset_clears() {
        let mut form = CampaignForm::edit(&campaign(5, "Books"));
        assert_eq!(form.editing_id, Some(5));
        assert_eq!(form.budget, "1000");
        assert_eq!(form.to_update().unwrap().budget, Some(1000.0));

        form.reset();
        assert_eq!(form, CampaignForm::default());
    }
}
