//! ConversationRepository - messaging channels between a school and an NGO

use crate::entities::Conversation;
use chrono::Utc;
use sqlx::{Error, SqlitePool};

pub struct ConversationRepository {
    connection_pool: SqlitePool,
}

impl ConversationRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Opens the channel for `(ngo_project_id, school_id)` or returns the existing one.
    pub async fn create_or_get(
        &self,
        ngo_project_id: &i64,
        school_id: &i64,
        ngo_id: &i64,
    ) -> Result<Conversation, Error> {
        sqlx::query(
            r#"
            INSERT INTO conversations (ngo_project_id, school_id, ngo_id, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (ngo_project_id, school_id) DO NOTHING
            "#,
        )
        .bind(ngo_project_id)
        .bind(school_id)
        .bind(ngo_id)
        .bind(Utc::now())
        .execute(&self.connection_pool)
        .await?;

        sqlx::query_as::<_, Conversation>(
            r#"
            SELECT conversation_id, ngo_project_id, school_id, ngo_id, created_at
            FROM conversations
            WHERE ngo_project_id = ? AND school_id = ?
            "#,
        )
        .bind(ngo_project_id)
        .bind(school_id)
        .fetch_one(&self.connection_pool)
        .await
    }

    pub async fn find_many_by_school_id(&self, school_id: &i64) -> Result<Vec<Conversation>, Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            SELECT conversation_id, ngo_project_id, school_id, ngo_id, created_at
            FROM conversations
            WHERE school_id = ?
            ORDER BY conversation_id
            "#,
        )
        .bind(school_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    pub async fn find_many_by_ngo_id(&self, ngo_id: &i64) -> Result<Vec<Conversation>, Error> {
        sqlx::query_as::<_, Conversation>(
            r#"
            SELECT conversation_id, ngo_project_id, school_id, ngo_id, created_at
            FROM conversations
            WHERE ngo_id = ?
            ORDER BY conversation_id
            "#,
        )
        .bind(ngo_id)
        .fetch_all(&self.connection_pool)
        .await
    }
}
