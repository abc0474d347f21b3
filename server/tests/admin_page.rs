mod common;

use axum::http::{header, StatusCode};
use common::{app, event, form_post, get, read_body, seed_evt42, FlakyStore};
use qrcodes_admin::store::memory::InMemoryStore;
use qrcodes_admin::store::QrCodeStore;
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn page_renders_codes_and_invalid_indicator() {
    let store = InMemoryStore::new();
    seed_evt42(&store).await;
    let app = app(Arc::new(store));

    let response = app
        .oneshot(get("/admin/events/evt42/qr-codes"))
        .await
        .expect("page");
    assert_eq!(response.status(), StatusCode::OK);
    let csp = response
        .headers()
        .get(header::CONTENT_SECURITY_POLICY)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(csp.contains("form-action 'self'"));

    let html = read_body(response).await;
    assert!(html.contains("Manage QR Codes"));
    assert!(html.contains("data-value=\"evt42-1\""));
    assert!(html.contains("Invalid QR data"));
    assert_eq!(html.matches("<li ").count(), 2);
    assert!(!html.contains("Loading..."));
}

#[tokio::test]
async fn add_appends_record_and_redirects() {
    let store = Arc::new(InMemoryStore::new());
    let app = app(store.clone());

    let response = app
        .clone()
        .oneshot(form_post("/admin/events/evt1/qr-codes", "description=Front+door"))
        .await
        .expect("add");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/events/evt1/qr-codes"
    );

    let stored = store.list_all(&event("evt1")).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].description, "Front door");
    let qr_data = stored[0].qr_data.clone().unwrap();
    let millis = qr_data.strip_prefix("evt1-").expect("event prefix");
    assert!(millis.parse::<i64>().is_ok());

    let html = read_body(app.oneshot(get("/admin/events/evt1/qr-codes")).await.unwrap()).await;
    assert!(html.contains("<p>Front door</p>"));
    assert!(html.contains(&format!("data-value=\"{qr_data}\"")));
}

#[tokio::test]
async fn add_with_empty_description_alerts_without_backend_call() {
    let store = Arc::new(FlakyStore::default());
    let app = app(store.clone());

    app.clone()
        .oneshot(get("/admin/events/evt1/qr-codes"))
        .await
        .unwrap();
    let calls = store.calls();

    let response = app
        .oneshot(form_post("/admin/events/evt1/qr-codes", "description="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = read_body(response).await;
    assert!(html.contains("role=\"alert\">Description is required!</div>"));
    assert!(!html.contains("class=\"error\""));
    assert_eq!(store.calls(), calls);
}

#[tokio::test]
async fn failed_add_keeps_typed_description_and_shows_error() {
    let store = Arc::new(FlakyStore::default());
    store.set_fail_create(true);
    let app = app(store.clone());

    let response = app
        .clone()
        .oneshot(form_post("/admin/events/evt1/qr-codes", "description=Stage"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = read_body(app.oneshot(get("/admin/events/evt1/qr-codes")).await.unwrap()).await;
    assert!(html.contains("value=\"Stage\""));
    assert!(html.contains("Error adding QR code. Please try again."));
    assert_eq!(html.matches("<li ").count(), 0);
}

#[tokio::test]
async fn delete_removes_record_from_page() {
    let store = Arc::new(InMemoryStore::new());
    seed_evt42(&store).await;
    let app = app(store.clone());

    let response = app
        .clone()
        .oneshot(form_post("/admin/events/evt42/qr-codes/a/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/events/evt42/qr-codes"
    );

    let html = read_body(app.oneshot(get("/admin/events/evt42/qr-codes")).await.unwrap()).await;
    assert!(!html.contains("id=\"qr-a\""));
    assert!(html.contains("id=\"qr-b\""));
    assert_eq!(store.list_all(&event("evt42")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_delete_keeps_record_and_error_survives_until_refresh() {
    let store = Arc::new(FlakyStore::default());
    seed_evt42(&store.inner).await;
    store.set_fail_delete(true);
    let app = app(store.clone());

    app.clone()
        .oneshot(form_post("/admin/events/evt42/qr-codes/a/delete", ""))
        .await
        .unwrap();
    let html = read_body(
        app.clone()
            .oneshot(get("/admin/events/evt42/qr-codes"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("id=\"qr-a\""));
    assert!(html.contains("Error deleting QR code. Please try again."));

    // A later success leaves the message in place.
    app.clone()
        .oneshot(form_post("/admin/events/evt42/qr-codes", "description=C"))
        .await
        .unwrap();
    let html = read_body(
        app.clone()
            .oneshot(get("/admin/events/evt42/qr-codes"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("<p>C</p>"));
    assert!(html.contains("Error deleting QR code. Please try again."));

    let html = read_body(
        app.oneshot(get("/admin/events/evt42/qr-codes?refresh=true"))
            .await
            .unwrap(),
    )
    .await;
    assert!(!html.contains("Error deleting QR code."));
    assert_eq!(html.matches("<li ").count(), 3);
}

#[tokio::test]
async fn fetch_failure_shows_error_instead_of_loading() {
    let store = Arc::new(FlakyStore::default());
    store
        .fail_list
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let app = app(store);

    let html = read_body(app.oneshot(get("/admin/events/evt1/qr-codes")).await.unwrap()).await;
    assert!(!html.contains("Loading..."));
    assert!(html.contains("Error fetching QR codes. Please try again."));
}

#[tokio::test]
async fn blank_event_id_never_fetches() {
    let store = Arc::new(FlakyStore::default());
    let app = app(store.clone());

    let response = app
        .oneshot(get("/admin/events/%20/qr-codes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = read_body(response).await;
    assert!(html.contains("Loading..."));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn failed_first_load_recovers_on_next_visit() {
    let store = Arc::new(FlakyStore::default());
    seed_evt42(&store.inner).await;
    store
        .fail_list
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let app = app(store.clone());

    let html = read_body(
        app.clone()
            .oneshot(get("/admin/events/evt42/qr-codes"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("Error fetching QR codes. Please try again."));
    assert!(html.contains("href=\"/admin/events/evt42/qr-codes?refresh=true\""));

    store
        .fail_list
        .store(false, std::sync::atomic::Ordering::SeqCst);
    let html = read_body(app.oneshot(get("/admin/events/evt42/qr-codes")).await.unwrap()).await;
    assert!(!html.contains("Error fetching QR codes."));
    assert_eq!(html.matches("<li ").count(), 2);
    assert_eq!(store.calls(), 2);
}

#[tokio::test]
async fn deleting_record_already_gone_from_store_clears_it_from_page() {
    let store = Arc::new(InMemoryStore::new());
    seed_evt42(&store).await;
    let app = app(store.clone());

    app.clone()
        .oneshot(get("/admin/events/evt42/qr-codes"))
        .await
        .unwrap();
    store.delete(&event("evt42"), "a").await.unwrap();

    let response = app
        .clone()
        .oneshot(form_post("/admin/events/evt42/qr-codes/a/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = read_body(app.oneshot(get("/admin/events/evt42/qr-codes")).await.unwrap()).await;
    assert!(!html.contains("id=\"qr-a\""));
    assert!(!html.contains("Error deleting QR code."));
}

#[tokio::test]
async fn event_ids_with_reserved_characters_round_trip_through_forms() {
    let store = Arc::new(InMemoryStore::new());
    let app = app(store.clone());

    let html = read_body(
        app.clone()
            .oneshot(get("/admin/events/evt%231/qr-codes"))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("action=\"/admin/events/evt%231/qr-codes\""));

    let response = app
        .oneshot(form_post("/admin/events/evt%231/qr-codes", "description=Gate"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/events/evt%231/qr-codes"
    );

    let stored = store.list_all(&event("evt#1")).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0]
        .qr_data
        .as_deref()
        .is_some_and(|data| data.starts_with("evt#1-")));
}
