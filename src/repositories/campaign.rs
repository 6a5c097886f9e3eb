//! CampaignRepository - Repository per la gestione delle campagne (ngo_projects)

use super::{Create, Read, Update};
use crate::dtos::{CreateCampaignDTO, UpdateCampaignDTO};
use crate::entities::Campaign;
use chrono::Utc;
use sqlx::{Error, Sqlite, SqlitePool};

const CAMPAIGN_COLUMNS: &str = r#"
    ngo_project_id, ngo_id, project_name, project_description, budget,
    start_date, end_date, status, created_at, updated_at
"#;

pub struct CampaignRepository {
    connection_pool: SqlitePool,
}

impl CampaignRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Campaign>, Error> {
        let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM ngo_projects ORDER BY ngo_project_id");
        sqlx::query_as::<_, Campaign>(&sql)
            .fetch_all(&self.connection_pool)
            .await
    }

    /// Campaigns owned by one NGO
    pub async fn find_by_ngo_id(&self, ngo_id: &i64) -> Result<Vec<Campaign>, Error> {
        let sql = format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM ngo_projects WHERE ngo_id = ? ORDER BY ngo_project_id"
        );
        sqlx::query_as::<_, Campaign>(&sql)
            .bind(ngo_id)
            .fetch_all(&self.connection_pool)
            .await
    }
}

impl Create<Campaign, CreateCampaignDTO> for CampaignRepository {
    async fn create(&self, data: &CreateCampaignDTO) -> Result<Campaign, Error> {
        let now = Utc::now();
        let status = data.status.unwrap_or_default();

        let result = sqlx::query(
            r#"
            INSERT INTO ngo_projects
                (ngo_id, project_name, project_description, budget, start_date, end_date,
                 status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.ngo_id)
        .bind(&data.project_name)
        .bind(&data.project_description)
        .bind(data.budget)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(status)
        .bind(now)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        Ok(Campaign {
            ngo_project_id: result.last_insert_rowid(),
            ngo_id: data.ngo_id,
            project_name: data.project_name.clone(),
            project_description: data.project_description.clone(),
            budget: data.budget,
            start_date: data.start_date,
            end_date: data.end_date,
            status,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Read<Campaign, i64> for CampaignRepository {
    async fn read(&self, id: &i64) -> Result<Option<Campaign>, Error> {
        let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM ngo_projects WHERE ngo_project_id = ?");
        sqlx::query_as::<_, Campaign>(&sql)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<Campaign, UpdateCampaignDTO, i64> for CampaignRepository {
    async fn update(&self, id: &i64, data: &UpdateCampaignDTO) -> Result<Campaign, Error> {
        let current = self.read(id).await?.ok_or(Error::RowNotFound)?;

        // Build dynamic UPDATE query using QueryBuilder (idiomatic SQLx way)
        let mut query_builder = sqlx::QueryBuilder::<Sqlite>::new("UPDATE ngo_projects SET ");
        let mut separated = query_builder.separated(", ");
        if let Some(ref name) = data.project_name {
            separated.push("project_name = ");
            separated.push_bind_unseparated(name);
        }
        if let Some(ref description) = data.project_description {
            separated.push("project_description = ");
            separated.push_bind_unseparated(description);
        }
        if let Some(budget) = data.budget {
            separated.push("budget = ");
            separated.push_bind_unseparated(budget);
        }
        if let Some(start) = data.start_date {
            separated.push("start_date = ");
            separated.push_bind_unseparated(start);
        }
        if let Some(end) = data.end_date {
            separated.push("end_date = ");
            separated.push_bind_unseparated(end);
        }
        if let Some(status) = data.status {
            separated.push("status = ");
            separated.push_bind_unseparated(status);
        }
        separated.push("updated_at = ");
        separated.push_bind_unseparated(Utc::now().max(current.updated_at));

        query_builder.push(" WHERE ngo_project_id = ");
        query_builder.push_bind(id);

        query_builder.build().execute(&self.connection_pool).await?;

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}
