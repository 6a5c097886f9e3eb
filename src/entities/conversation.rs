//! Conversation entity - messaging channel opened when a school approves an invitation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub conversation_id: i64,
    pub ngo_project_id: i64,
    pub school_id: i64,
    pub ngo_id: i64,
    pub created_at: DateTime<Utc>,
}
