//! School / NGO DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchoolDTO {
    #[validate(length(min = 1, max = 200, message = "School name is required"))]
    pub school_name: String,
    pub district: Option<String>,
    pub upazila: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNgoDTO {
    #[validate(length(min = 1, max = 200, message = "NGO name is required"))]
    pub ngo_name: String,
    pub user_id: Option<i64>,
}
