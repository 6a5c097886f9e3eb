//! Query DTOs - query string parameters

use serde::{Deserialize, Serialize};

/// `GET /ngo-projects?ngoId=` - restricts the listing to one NGO's campaigns
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CampaignQuery {
    #[serde(default)]
    pub ngo_id: Option<i64>,
}
