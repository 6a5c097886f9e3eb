//! TransparencyRepository - one evidence record per project

use crate::dtos::UpsertTransparencyDTO;
use crate::entities::{PhotoKind, TransparencyRecord};
use chrono::Utc;
use sqlx::types::Json;
use sqlx::{Error, SqlitePool};

const TRANSPARENCY_COLUMNS: &str = r#"
    transparency_id, project_id, additional_notes, beneficiary_feedback,
    is_public, before_photos, after_photos, updated_at
"#;

pub struct TransparencyRepository {
    connection_pool: SqlitePool,
}

impl TransparencyRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// `None` means no record exists, which is different from an empty record.
    pub async fn find_by_project_id(
        &self,
        project_id: &i64,
    ) -> Result<Option<TransparencyRecord>, Error> {
        let sql = format!("SELECT {TRANSPARENCY_COLUMNS} FROM fund_transparencies WHERE project_id = ?");
        sqlx::query_as::<_, TransparencyRecord>(&sql)
            .bind(project_id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Applies `change` to the project's record inside one write transaction.
    ///
    /// The write lock is taken before the record is read, so concurrent edits of
    /// the same record are serialized instead of overwriting each other. With
    /// `create_if_missing` an empty public record is inserted first; otherwise a
    /// missing record yields `Ok(None)`. `change` returns whether it modified
    /// anything, and an unchanged record is not written back.
    pub async fn modify<F>(
        &self,
        project_id: &i64,
        create_if_missing: bool,
        change: F,
    ) -> Result<Option<TransparencyRecord>, Error>
    where
        F: FnOnce(&mut TransparencyRecord) -> bool,
    {
        let mut tx = self.connection_pool.begin().await?;

        if create_if_missing {
            sqlx::query(
                r#"
                INSERT INTO fund_transparencies (project_id, is_public, before_photos, after_photos, updated_at)
                VALUES (?, 1, '[]', '[]', ?)
                ON CONFLICT (project_id) DO NOTHING
                "#,
            )
            .bind(project_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        } else {
            // no-op write, only to hold the lock before reading
            sqlx::query("UPDATE fund_transparencies SET updated_at = updated_at WHERE project_id = ?")
                .bind(project_id)
                .execute(&mut *tx)
                .await?;
        }

        let sql = format!("SELECT {TRANSPARENCY_COLUMNS} FROM fund_transparencies WHERE project_id = ?");
        let Some(mut record) = sqlx::query_as::<_, TransparencyRecord>(&sql)
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            tx.rollback().await?;
            return Ok(None);
        };

        if change(&mut record) {
            record.updated_at = Utc::now();
            sqlx::query(
                r#"
                UPDATE fund_transparencies
                SET additional_notes = ?, beneficiary_feedback = ?, is_public = ?,
                    before_photos = ?, after_photos = ?, updated_at = ?
                WHERE transparency_id = ?
                "#,
            )
            .bind(&record.additional_notes)
            .bind(&record.beneficiary_feedback)
            .bind(record.is_public)
            .bind(Json(&record.before_photos.0))
            .bind(Json(&record.after_photos.0))
            .bind(record.updated_at)
            .bind(record.transparency_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(record))
    }

    /// Writes only the `Some(_)` fields of `data`, creating the record if needed
    pub async fn upsert(
        &self,
        project_id: &i64,
        data: &UpsertTransparencyDTO,
    ) -> Result<TransparencyRecord, Error> {
        self.modify(project_id, true, |record| {
            if let Some(ref notes) = data.additional_notes {
                record.additional_notes = Some(notes.clone());
            }
            if let Some(ref feedback) = data.beneficiary_feedback {
                record.beneficiary_feedback = Some(feedback.clone());
            }
            if let Some(is_public) = data.is_public {
                record.is_public = is_public;
            }
            true
        })
        .await?
        .ok_or(Error::RowNotFound)
    }

    /// Appends `urls` to one photo collection, creating the record if needed
    pub async fn append_photos(
        &self,
        project_id: &i64,
        kind: PhotoKind,
        urls: &[String],
    ) -> Result<TransparencyRecord, Error> {
        self.modify(project_id, true, |record| {
            record.append_photos(kind, urls);
            true
        })
        .await?
        .ok_or(Error::RowNotFound)
    }

    /// Removes every occurrence of `url`. `None` when the project has no record.
    pub async fn remove_photo(
        &self,
        project_id: &i64,
        kind: PhotoKind,
        url: &str,
    ) -> Result<Option<(TransparencyRecord, usize)>, Error> {
        let mut removed = 0;
        let record = self
            .modify(project_id, false, |record| {
                removed = record.remove_photo(kind, url);
                removed > 0
            })
            .await?;
        Ok(record.map(|r| (r, removed)))
    }
}
