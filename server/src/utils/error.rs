use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use qrcode::types::QrError;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Store error")]
    StoreError(#[source] StoreError),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(format!("{what} was not found")),
            other => AppError::StoreError(other),
        }
    }
}

impl From<QrError> for AppError {
    fn from(err: QrError) -> Self {
        match err {
            QrError::DataTooLong => {
                AppError::ValidationError("QR data is too long to encode".to_string())
            }
            other => AppError::InternalServerError(format!("QR encoding failed: {other}")),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::StoreError(_) => "STORE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::StoreError(e) => {
                error!(error = ?e, "Store error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Only expose high-level message to the client
        let public_message = match &self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::StoreError(_) => "A storage error occurred".to_string(),
            AppError::InternalServerError(_) => "An internal error occurred".to_string(),
        };

        error_response(code, public_message, None, status)
    }
}
