//! School and NGO entities - the two sides of an invitation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub school_id: i64,
    pub school_name: String,
    pub district: Option<String>,
    pub upazila: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Ngo {
    pub ngo_id: i64,
    pub ngo_name: String,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
