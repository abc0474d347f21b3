use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer, Config};
use crate::handlers::{api, health_check, pages, qr};
use crate::store::QrCodeStore;
use crate::view::{PageOptions, ViewSessions};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QrCodeStore>,
    pub sessions: ViewSessions,
    pub page: PageOptions,
}

impl AppState {
    pub fn new(store: Arc<dyn QrCodeStore>, page: PageOptions, sessions: ViewSessions) -> Self {
        Self {
            store,
            sessions,
            page,
        }
    }
}

pub fn create_routes(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/qr.svg", get(qr::qr_svg))
        .route(
            "/admin/events/:event_id/qr-codes",
            get(pages::show_qr_codes).post(pages::add_qr_code),
        )
        .route(
            "/admin/events/:event_id/qr-codes/:qr_id/delete",
            post(pages::delete_qr_code),
        )
        .route(
            "/api/events/:event_id/qr-codes",
            get(api::list_qr_codes).post(api::create_qr_code),
        )
        .route(
            "/api/events/:event_id/qr-codes/:qr_id",
            axum::routing::delete(api::delete_qr_code),
        )
        .with_state(state)
        .layer(create_security_headers_layer(config.production))
        .layer(create_cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}
