use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// CORS for the JSON API. The admin page itself posts same-origin forms.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .expose_headers([
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn allowed_origins(origins: &[String]) -> AllowOrigin {
    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::debug!("CORS: Allowing origin: {}", origin);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    // An empty list would reject every cross-origin call, and `any()` cannot
    // be combined with credentials, so fall back to the local defaults.
    if values.is_empty() {
        tracing::warn!("CORS: No valid origins configured, using local defaults");
        return AllowOrigin::list(
            split_origins(DEFAULT_ALLOWED_ORIGINS)
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        );
    }

    tracing::info!("CORS: Configured with {} allowed origin(s)", values.len());
    AllowOrigin::list(values)
}
