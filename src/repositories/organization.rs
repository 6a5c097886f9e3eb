//! NgoRepository / SchoolRepository - reference data for campaigns and invitations

use super::{Create, Read};
use crate::dtos::{CreateNgoDTO, CreateSchoolDTO};
use crate::entities::{Ngo, School};
use chrono::Utc;
use sqlx::{Error, SqlitePool};

pub struct NgoRepository {
    connection_pool: SqlitePool,
}

impl NgoRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }
}

impl Create<Ngo, CreateNgoDTO> for NgoRepository {
    async fn create(&self, data: &CreateNgoDTO) -> Result<Ngo, Error> {
        let now = Utc::now();
        let result = sqlx::query("INSERT INTO ngos (ngo_name, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&data.ngo_name)
            .bind(data.user_id)
            .bind(now)
            .execute(&self.connection_pool)
            .await?;

        Ok(Ngo {
            ngo_id: result.last_insert_rowid(),
            ngo_name: data.ngo_name.clone(),
            user_id: data.user_id,
            created_at: now,
        })
    }
}

impl Read<Ngo, i64> for NgoRepository {
    async fn read(&self, id: &i64) -> Result<Option<Ngo>, Error> {
        sqlx::query_as::<_, Ngo>(
            "SELECT ngo_id, ngo_name, user_id, created_at FROM ngos WHERE ngo_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

pub struct SchoolRepository {
    connection_pool: SqlitePool,
}

impl SchoolRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// All schools, alphabetical - the invite composer filters this list locally
    pub async fn find_all(&self) -> Result<Vec<School>, Error> {
        sqlx::query_as::<_, School>(
            r#"
            SELECT school_id, school_name, district, upazila, user_id, created_at
            FROM schools
            ORDER BY school_name COLLATE NOCASE, school_id
            "#,
        )
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Create<School, CreateSchoolDTO> for SchoolRepository {
    async fn create(&self, data: &CreateSchoolDTO) -> Result<School, Error> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO schools (school_name, district, upazila, user_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.school_name)
        .bind(&data.district)
        .bind(&data.upazila)
        .bind(data.user_id)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        Ok(School {
            school_id: result.last_insert_rowid(),
            school_name: data.school_name.clone(),
            district: data.district.clone(),
            upazila: data.upazila.clone(),
            user_id: data.user_id,
            created_at: now,
        })
    }
}

impl Read<School, i64> for SchoolRepository {
    async fn read(&self, id: &i64) -> Result<Option<School>, Error> {
        sqlx::query_as::<_, School>(
            r#"
            SELECT school_id, school_name, district, upazila, user_id, created_at
            FROM schools
            WHERE school_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}
