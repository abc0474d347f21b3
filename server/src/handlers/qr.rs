use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::routes::AppState;
use crate::utils::error::AppError;
use crate::view::qr::render_qr_svg;

#[derive(Debug, Deserialize)]
pub struct QrQuery {
    #[serde(default)]
    pub data: String,
    pub size: Option<u32>,
}

/// Renders any string as an SVG QR code.
pub async fn qr_svg(
    State(state): State<AppState>,
    Query(query): Query<QrQuery>,
) -> Result<Response, AppError> {
    if query.data.is_empty() {
        return Err(AppError::ValidationError("QR data is required".to_string()));
    }

    let svg = render_qr_svg(&query.data, query.size.unwrap_or(state.page.qr_size))?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}
