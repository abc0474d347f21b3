//! Postgres-backed QR code store.
//!
//! Every event's codes share the `qrcodes` table and are told apart by
//! `event_id`. Ids are generated here rather than by the database so that
//! they look the same as the in-memory backend's.
use super::{QrCodeStore, StoreError, StoreResult};
use crate::models::{EventId, NewQrCode, StoredQrCode};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Opens a pool and brings the schema up to date.
    ///
    /// The URL may carry credentials; it is never logged.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        tracing::info!("Successfully connected to database");

        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Migrations run successfully");

        Ok(Self { pool })
    }
}

#[async_trait]
impl QrCodeStore for PostgresStore {
    async fn list_all(&self, event_id: &EventId) -> StoreResult<Vec<StoredQrCode>> {
        let rows = sqlx::query_as::<_, StoredQrCode>(
            r#"SELECT id, description, qr_data FROM qrcodes WHERE event_id = $1 ORDER BY created_at, id"#,
        )
        .bind(event_id.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create(&self, event_id: &EventId, qr_code: NewQrCode) -> StoreResult<StoredQrCode> {
        let stored = qr_code.into_stored(Uuid::new_v4().simple().to_string());
        sqlx::query(
            r#"INSERT INTO qrcodes (id, event_id, description, qr_data) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(&stored.id)
        .bind(event_id.as_str())
        .bind(&stored.description)
        .bind(&stored.qr_data)
        .execute(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn delete(&self, event_id: &EventId, id: &str) -> StoreResult<()> {
        let removed = sqlx::query(r#"DELETE FROM qrcodes WHERE event_id = $1 AND id = $2"#)
            .bind(event_id.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if removed.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("qr code '{id}'")));
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
