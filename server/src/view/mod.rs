//! The QR codes admin view: a page-lifetime copy of one event's QR codes.
//!
//! The backing store is the source of truth. After a successful add or
//! delete the local list is patched in place (append or filter) instead of
//! re-fetched, so it is only guaranteed to match the store again after the
//! next [`QrCodesView::load`].
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info};

use crate::models::{EventId, NewQrCode, QrCodeRecord};
use crate::store::{QrCodeStore, StoreError};

pub mod qr;
pub mod render;
pub mod sessions;

pub use render::{render_page, PageOptions};
pub use sessions::ViewSessions;

/// Backend failures, one per operation. The display text is what the admin
/// sees; the wrapped store error only goes to the log.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Error fetching QR codes. Please try again.")]
    FetchFailure(#[source] StoreError),

    #[error("Error adding QR code. Please try again.")]
    AddFailure(#[source] StoreError),

    #[error("Error deleting QR code. Please try again.")]
    DeleteFailure(#[source] StoreError),
}

impl ViewError {
    fn source_error(&self) -> &StoreError {
        match self {
            ViewError::FetchFailure(e) | ViewError::AddFailure(e) | ViewError::DeleteFailure(e) => {
                e
            }
        }
    }
}

/// Rejected input. Never reaches the store and never touches the error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Description is required!")]
    DescriptionRequired,
}

#[derive(Debug)]
pub struct QrCodesView {
    event_id: Option<EventId>,
    records: Vec<QrCodeRecord>,
    pending_description: String,
    loading: bool,
    load_failed: bool,
    error: Option<String>,
}

impl QrCodesView {
    pub fn new(event_id: Option<EventId>) -> Self {
        Self {
            event_id,
            records: Vec::new(),
            pending_description: String::new(),
            loading: true,
            load_failed: false,
            error: None,
        }
    }

    pub fn event_id(&self) -> Option<&EventId> {
        self.event_id.as_ref()
    }

    pub fn records(&self) -> &[QrCodeRecord] {
        &self.records
    }

    pub fn pending_description(&self) -> &str {
        &self.pending_description
    }

    pub fn set_pending_description(&mut self, description: impl Into<String>) {
        self.pending_description = description.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the most recent [`load`](Self::load) hit a backend failure.
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Last backend failure message. Overwritten by the next failure, never
    /// cleared by a success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the list with the event's full collection.
    ///
    /// Does nothing without an event id; the view then stays loading.
    pub async fn load(&mut self, store: &dyn QrCodeStore) {
        let Some(event_id) = self.event_id.clone() else {
            return;
        };

        match store.list_all(&event_id).await {
            Ok(documents) => {
                self.records = documents.into_iter().map(QrCodeRecord::from).collect();
                self.load_failed = false;
                info!(event_id = %event_id, count = self.records.len(), "Loaded QR codes");
            }
            Err(e) => {
                self.load_failed = true;
                self.fail(ViewError::FetchFailure(e));
            }
        }
        self.loading = false;
    }

    pub async fn add_record(
        &mut self,
        store: &dyn QrCodeStore,
        description: &str,
    ) -> Result<(), InputError> {
        self.add_record_at(store, description, Utc::now()).await
    }

    /// Persists a new code stamped with `at` and appends it locally.
    ///
    /// The typed description is kept as pending input until the store
    /// accepts the record.
    pub async fn add_record_at(
        &mut self,
        store: &dyn QrCodeStore,
        description: &str,
        at: DateTime<Utc>,
    ) -> Result<(), InputError> {
        if description.is_empty() {
            return Err(InputError::DescriptionRequired);
        }
        self.pending_description = description.to_string();

        let Some(event_id) = self.event_id.clone() else {
            self.fail(ViewError::AddFailure(StoreError::Unexpected(
                "no event selected".to_string(),
            )));
            return Ok(());
        };

        let new = NewQrCode::generate(&event_id, description, at);
        match store.create(&event_id, new).await {
            Ok(stored) => {
                info!(event_id = %event_id, qr_id = %stored.id, "Added QR code");
                self.records.push(stored.into());
                self.pending_description.clear();
            }
            Err(e) => self.fail(ViewError::AddFailure(e)),
        }
        Ok(())
    }

    /// Deletes a code from the store, then drops it from the local list.
    ///
    /// The id is not checked against the local list first. A document that
    /// is already gone from the store counts as deleted.
    pub async fn delete_record(&mut self, store: &dyn QrCodeStore, id: &str) {
        let Some(event_id) = self.event_id.clone() else {
            self.fail(ViewError::DeleteFailure(StoreError::Unexpected(
                "no event selected".to_string(),
            )));
            return;
        };

        match store.delete(&event_id, id).await {
            Ok(()) => {
                info!(event_id = %event_id, qr_id = %id, "Deleted QR code");
                self.records.retain(|record| record.id != id);
            }
            Err(StoreError::NotFound(_)) => {
                info!(event_id = %event_id, qr_id = %id, "QR code was already deleted");
                self.records.retain(|record| record.id != id);
            }
            Err(e) => self.fail(ViewError::DeleteFailure(e)),
        }
    }

    fn fail(&mut self, err: ViewError) {
        error!(
            event_id = ?self.event_id.as_ref().map(EventId::as_str),
            error = ?err.source_error(),
            "{err}"
        );
        self.error = Some(err.to_string());
    }
}
