//! InvitationRepository - Repository per la gestione degli inviti (ngo_project_requests)

use super::{Create, Read};
use crate::dtos::CreateInvitationDTO;
use crate::entities::{Invitation, InvitationStatus, RequestType};
use crate::lifecycle::sort_most_recent_first;
use chrono::Utc;
use sqlx::{Error, SqlitePool};

const INVITATION_COLUMNS: &str = r#"
    request_id, ngo_project_id, school_id, request_type, status,
    request_message, response_message, requested_budget,
    requested_by_user_id, responded_by_user_id, requested_at, responded_at
"#;

pub struct InvitationRepository {
    connection_pool: SqlitePool,
}

impl InvitationRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Full history of one campaign, most recent first
    pub async fn find_many_by_campaign_id(
        &self,
        ngo_project_id: &i64,
    ) -> Result<Vec<Invitation>, Error> {
        let sql =
            format!("SELECT {INVITATION_COLUMNS} FROM ngo_project_requests WHERE ngo_project_id = ?");
        let mut invitations = sqlx::query_as::<_, Invitation>(&sql)
            .bind(ngo_project_id)
            .fetch_all(&self.connection_pool)
            .await?;

        // timestamps are stored as text, so ordering happens here rather than in SQL
        sort_most_recent_first(&mut invitations);
        Ok(invitations)
    }

    /// Full history of one school, most recent first
    pub async fn find_many_by_school_id(&self, school_id: &i64) -> Result<Vec<Invitation>, Error> {
        let sql =
            format!("SELECT {INVITATION_COLUMNS} FROM ngo_project_requests WHERE school_id = ?");
        let mut invitations = sqlx::query_as::<_, Invitation>(&sql)
            .bind(school_id)
            .fetch_all(&self.connection_pool)
            .await?;

        sort_most_recent_first(&mut invitations);
        Ok(invitations)
    }

    /// The pending or approved invitation for the pair, if any
    pub async fn find_active(
        &self,
        ngo_project_id: &i64,
        school_id: &i64,
    ) -> Result<Option<Invitation>, Error> {
        let sql = format!(
            r#"
            SELECT {INVITATION_COLUMNS}
            FROM ngo_project_requests
            WHERE ngo_project_id = ? AND school_id = ? AND status <> 'REJECTED'
            "#
        );
        sqlx::query_as::<_, Invitation>(&sql)
            .bind(ngo_project_id)
            .bind(school_id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Schools holding a non-rejected invitation for the campaign
    pub async fn find_excluded_school_ids(&self, ngo_project_id: &i64) -> Result<Vec<i64>, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT DISTINCT school_id
            FROM ngo_project_requests
            WHERE ngo_project_id = ? AND status <> 'REJECTED'
            ORDER BY school_id
            "#,
        )
        .bind(ngo_project_id)
        .fetch_all(&self.connection_pool)
        .await
    }

    /// Persists a response produced by [`Invitation::respond`].
    ///
    /// The update only applies while the stored row is still `PENDING`, so two
    /// concurrent responses cannot both win. Returns `false` when nothing was
    /// updated (row missing or already answered).
    pub async fn apply_response(&self, responded: &Invitation) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            UPDATE ngo_project_requests
            SET status = ?, response_message = ?, responded_by_user_id = ?, responded_at = ?
            WHERE request_id = ? AND status = 'PENDING'
            "#,
        )
        .bind(responded.status)
        .bind(&responded.response_message)
        .bind(responded.responded_by_user_id)
        .bind(responded.responded_at)
        .bind(responded.request_id)
        .execute(&self.connection_pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

impl Create<Invitation, CreateInvitationDTO> for InvitationRepository {
    /// Inserts a `PENDING` invitation. A concurrent duplicate surfaces as a
    /// unique violation from `ux_ngo_project_requests_active`.
    async fn create(&self, data: &CreateInvitationDTO) -> Result<Invitation, Error> {
        let now = Utc::now();
        let status = InvitationStatus::Pending;
        let request_type = RequestType::Invite;

        let result = sqlx::query(
            r#"
            INSERT INTO ngo_project_requests
                (ngo_project_id, school_id, request_type, status, request_message,
                 requested_budget, requested_by_user_id, requested_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.ngo_project_id)
        .bind(data.school_id)
        .bind(request_type)
        .bind(status)
        .bind(&data.request_message)
        .bind(data.requested_budget)
        .bind(data.requested_by_user_id)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        Ok(Invitation {
            request_id: result.last_insert_rowid(),
            ngo_project_id: data.ngo_project_id,
            school_id: data.school_id,
            request_type,
            status,
            request_message: data.request_message.clone(),
            response_message: None,
            requested_budget: data.requested_budget,
            requested_by_user_id: data.requested_by_user_id,
            responded_by_user_id: None,
            requested_at: now,
            responded_at: None,
        })
    }
}

impl Read<Invitation, i64> for InvitationRepository {
    async fn read(&self, id: &i64) -> Result<Option<Invitation>, Error> {
        let sql = format!("SELECT {INVITATION_COLUMNS} FROM ngo_project_requests WHERE request_id = ?");
        sqlx::query_as::<_, Invitation>(&sql)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}
