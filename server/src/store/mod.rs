use async_trait::async_trait;
use thiserror::Error;

use crate::models::{EventId, NewQrCode, StoredQrCode};

pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error")]
    Database(#[from] sqlx::Error),
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("{0}")]
    Unexpected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Backing collection of QR codes, grouped per event.
///
/// Every call works on the whole collection of one event or on a single
/// document by id; there is no filtering, sorting or paging.
#[async_trait]
pub trait QrCodeStore: Send + Sync {
    async fn list_all(&self, event_id: &EventId) -> StoreResult<Vec<StoredQrCode>>;
    async fn create(&self, event_id: &EventId, qr_code: NewQrCode) -> StoreResult<StoredQrCode>;
    async fn delete(&self, event_id: &EventId, id: &str) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;
    fn backend_name(&self) -> &'static str;
}
