//! In-memory QR code store.
//!
//! Keeps each event's collection as an insertion-ordered `Vec` behind a
//! `tokio::sync::RwLock`. Nothing survives a restart; used for local
//! development when no database is configured, and in tests.
use super::{QrCodeStore, StoreError, StoreResult};
use crate::models::{EventId, NewQrCode, StoredQrCode};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<EventId, Vec<StoredQrCode>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a document in place as-is, keeping its id and any missing fields.
    pub async fn insert_raw(&self, event_id: &EventId, document: StoredQrCode) {
        self.collections
            .write()
            .await
            .entry(event_id.clone())
            .or_default()
            .push(document);
    }
}

#[async_trait]
impl QrCodeStore for InMemoryStore {
    async fn list_all(&self, event_id: &EventId) -> StoreResult<Vec<StoredQrCode>> {
        Ok(self
            .collections
            .read()
            .await
            .get(event_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create(&self, event_id: &EventId, qr_code: NewQrCode) -> StoreResult<StoredQrCode> {
        let stored = qr_code.into_stored(Uuid::new_v4().simple().to_string());
        self.insert_raw(event_id, stored.clone()).await;
        Ok(stored)
    }

    async fn delete(&self, event_id: &EventId, id: &str) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let documents = collections
            .get_mut(event_id)
            .ok_or_else(|| StoreError::NotFound(format!("qr code '{id}'")))?;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        if documents.len() == before {
            return Err(StoreError::NotFound(format!("qr code '{id}'")));
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
