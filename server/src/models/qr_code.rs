use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::EventId;

/// Payload shown in place of a code when a stored document has no `qrData`.
pub const INVALID_QR_DATA: &str = "Invalid QR Data";

/// A QR code document as it sits in the backing store.
///
/// Documents written by other tools may lack `qr_data`, so it stays optional
/// here and is defaulted when the view loads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct StoredQrCode {
    pub id: String,
    pub description: String,
    #[serde(rename = "qrData")]
    pub qr_data: Option<String>,
}

/// A QR code as the admin view holds and renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodeRecord {
    pub id: String,
    pub description: String,
    #[serde(rename = "qrData")]
    pub qr_data: String,
}

impl From<StoredQrCode> for QrCodeRecord {
    fn from(stored: StoredQrCode) -> Self {
        let qr_data = match stored.qr_data {
            Some(data) if !data.is_empty() => data,
            _ => INVALID_QR_DATA.to_string(),
        };
        Self {
            id: stored.id,
            description: stored.description,
            qr_data,
        }
    }
}

/// Fields of a QR code about to be persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQrCode {
    pub description: String,
    #[serde(rename = "qrData")]
    pub qr_data: String,
}

impl NewQrCode {
    /// Builds a record whose payload is `{event_id}-{unix millis}`.
    ///
    /// Two codes created for the same event in the same millisecond collide.
    pub fn generate(event_id: &EventId, description: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            description: description.into(),
            qr_data: format!("{}-{}", event_id, at.timestamp_millis()),
        }
    }

    pub fn into_stored(self, id: String) -> StoredQrCode {
        StoredQrCode {
            id,
            description: self.description,
            qr_data: Some(self.qr_data),
        }
    }
}
