use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::models::{EventId, NewQrCode, QrCodeRecord};
use crate::routes::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};
use crate::view::InputError;

#[derive(Debug, Deserialize)]
pub struct CreateQrCodeRequest {
    #[serde(default)]
    pub description: String,
}

fn resolve_event(raw: &str) -> Result<EventId, AppError> {
    EventId::resolve(Some(raw))
        .ok_or_else(|| AppError::ValidationError("An event id is required".to_string()))
}

pub async fn list_qr_codes(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Response, AppError> {
    let event_id = resolve_event(&event_id)?;
    let records: Vec<QrCodeRecord> = state
        .store
        .list_all(&event_id)
        .await?
        .into_iter()
        .map(QrCodeRecord::from)
        .collect();

    Ok(success(records, "QR codes fetched").into_response())
}

pub async fn create_qr_code(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(body): Json<CreateQrCodeRequest>,
) -> Result<Response, AppError> {
    let event_id = resolve_event(&event_id)?;
    if body.description.is_empty() {
        return Err(AppError::ValidationError(
            InputError::DescriptionRequired.to_string(),
        ));
    }

    let new = NewQrCode::generate(&event_id, body.description, Utc::now());
    let stored = state.store.create(&event_id, new).await?;
    tracing::info!(event_id = %event_id, qr_id = %stored.id, "Created QR code via API");

    Ok(created(QrCodeRecord::from(stored), "QR code created").into_response())
}

pub async fn delete_qr_code(
    State(state): State<AppState>,
    Path((event_id, qr_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let event_id = resolve_event(&event_id)?;
    state.store.delete(&event_id, &qr_id).await?;
    tracing::info!(event_id = %event_id, qr_id = %qr_id, "Deleted QR code via API");

    Ok(empty_success("QR code deleted").into_response())
}
