// SPDX-License-Identifier: MIT

//! Postgres-backed `ReadingStore` built on sqlx.
//!
//! The form input and the generated reading are stored as JSONB columns;
//! both are opaque to queries, which only ever filter by id or owner.

use crate::db::{tables, ReadingStore, LIST_ALL_LIMIT};
use crate::error::AppError;
use crate::models::{AnalyticsEvent, JournalResponse, ReadingResponse, StoredReading, UserInput};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const MAX_CONNECTIONS: u32 = 20;

const READING_COLUMNS: &str = "reading_id, inputs, reading, user_id, created_at";

/// A row from the `readings` table.
#[derive(FromRow)]
struct ReadingRow {
    reading_id: Uuid,
    inputs: Json<UserInput>,
    reading: Json<ReadingResponse>,
    user_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<ReadingRow> for StoredReading {
    fn from(row: ReadingRow) -> Self {
        StoredReading {
            reading_id: row.reading_id,
            inputs: row.inputs.0,
            reading: row.reading.0,
            created_at: row.created_at,
            user_id: row.user_id,
        }
    }
}

/// Postgres database client.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to Postgres and run pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to connect to Postgres: {}", e)))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::Storage(format!("Migration failed: {}", e)))?;

        tracing::info!("Connected to Postgres");

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by integration tests against a real db).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgStore {
    async fn save_reading(
        &self,
        inputs: &UserInput,
        reading: &ReadingResponse,
        user_id: Option<Uuid>,
    ) -> Result<Uuid, AppError> {
        let reading_id = Uuid::new_v4();

        let query = format!(
            "INSERT INTO {} (reading_id, inputs, reading, user_id) VALUES ($1, $2, $3, $4)",
            tables::READINGS
        );
        sqlx::query(&query)
            .bind(reading_id)
            .bind(Json(inputs))
            .bind(Json(reading))
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(reading_id = %reading_id, "Reading saved");
        Ok(reading_id)
    }

    async fn get_reading(&self, reading_id: Uuid) -> Result<Option<StoredReading>, AppError> {
        let query = format!(
            "SELECT {READING_COLUMNS} FROM {} WHERE reading_id = $1",
            tables::READINGS
        );
        let row: Option<ReadingRow> = sqlx::query_as(&query)
            .bind(reading_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(StoredReading::from))
    }

    async fn list_readings_for_user(&self, user_id: Uuid) -> Result<Vec<StoredReading>, AppError> {
        let query = format!(
            "SELECT {READING_COLUMNS} FROM {} WHERE user_id = $1 ORDER BY created_at DESC",
            tables::READINGS
        );
        let rows: Vec<ReadingRow> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(StoredReading::from).collect())
    }

    async fn list_all_readings(&self) -> Result<Vec<StoredReading>, AppError> {
        let query = format!(
            "SELECT {READING_COLUMNS} FROM {} ORDER BY created_at DESC LIMIT $1",
            tables::READINGS
        );
        let rows: Vec<ReadingRow> = sqlx::query_as(&query)
            .bind(LIST_ALL_LIMIT)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(StoredReading::from).collect())
    }

    async fn save_journal_response(&self, response: &JournalResponse) -> Result<(), AppError> {
        let query = format!(
            "INSERT INTO {} (id, reading_id, prompt_text, accepted, answer)
             VALUES ($1, $2, $3, $4, $5)",
            tables::JOURNAL_RESPONSES
        );
        sqlx::query(&query)
            .bind(Uuid::new_v4())
            .bind(response.reading_id)
            .bind(&response.prompt_text)
            .bind(response.accepted)
            .bind(&response.answer)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_analytics_event(&self, event: &AnalyticsEvent) -> Result<(), AppError> {
        let query = format!(
            "INSERT INTO {} (event_type, reading_id, user_id, metadata)
             VALUES ($1, $2, $3, $4)",
            tables::ANALYTICS_EVENTS
        );
        sqlx::query(&query)
            .bind(event.event_type.as_str())
            .bind(event.reading_id)
            .bind(event.user_id)
            .bind(event.metadata.as_ref().map(Json))
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
