#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use qrcodes_admin::config::Config;
use qrcodes_admin::models::{EventId, NewQrCode, StoredQrCode};
use qrcodes_admin::routes::{create_routes, AppState};
use qrcodes_admin::store::memory::InMemoryStore;
use qrcodes_admin::store::{QrCodeStore, StoreError, StoreResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub type App = axum::routing::RouterIntoService<Body, ()>;

pub fn app(store: Arc<dyn QrCodeStore>) -> App {
    let config = Config::default();
    let state = AppState::new(store, config.page_options(), config.view_sessions());
    create_routes(state, &config).into_service()
}

pub fn event(id: &str) -> EventId {
    EventId::resolve(Some(id)).expect("event id")
}

pub async fn read_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// In-memory store whose operations can be switched to fail, counting calls.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryStore,
    pub calls: AtomicUsize,
    pub fail_list: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FlakyStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    fn call(&self, flag: &AtomicBool) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Unexpected("backend unavailable".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl QrCodeStore for FlakyStore {
    async fn list_all(&self, event_id: &EventId) -> StoreResult<Vec<StoredQrCode>> {
        self.call(&self.fail_list)?;
        self.inner.list_all(event_id).await
    }

    async fn create(&self, event_id: &EventId, qr_code: NewQrCode) -> StoreResult<StoredQrCode> {
        self.call(&self.fail_create)?;
        self.inner.create(event_id, qr_code).await
    }

    async fn delete(&self, event_id: &EventId, id: &str) -> StoreResult<()> {
        self.call(&self.fail_delete)?;
        self.inner.delete(event_id, id).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}

pub async fn seed_evt42(store: &InMemoryStore) {
    let evt = event("evt42");
    store
        .insert_raw(
            &evt,
            StoredQrCode {
                id: "a".into(),
                description: "A".into(),
                qr_data: Some("evt42-1".into()),
            },
        )
        .await;
    store
        .insert_raw(
            &evt,
            StoredQrCode {
                id: "b".into(),
                description: "B".into(),
                qr_data: None,
            },
        )
        .await;
}
