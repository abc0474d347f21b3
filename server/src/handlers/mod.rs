use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::routes::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub mod api;
pub mod pages;
pub mod qr;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
    store: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> Result<Response, AppError> {
    state.store.health_check().await?;

    let payload = HealthPayload {
        status: "ok",
        service: "qrcodes-admin",
        store: state.store.backend_name(),
    };

    Ok(success(payload, "Health check successful").into_response())
}
