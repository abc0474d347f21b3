//! HTML handlers for the QR codes admin page.
//!
//! Writes go through the event's [`ViewSessions`](crate::view::ViewSessions)
//! entry and then redirect back, so the page shows the patched local list
//! and whatever sits in the error slot.
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::models::EventId;
use crate::routes::AppState;
use crate::view::{render_page, InputError, QrCodesView};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddQrCodeForm {
    #[serde(default)]
    pub description: String,
}

pub async fn show_qr_codes(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let Some(event_id) = EventId::resolve(Some(&event_id)) else {
        return unresolved_page(&state);
    };

    if query.refresh {
        state.sessions.reset(&event_id).await;
    }
    let view = state.sessions.open(&event_id, state.store.as_ref()).await;
    let view = view.lock().await;
    Html(render_page(&view, &state.page, None)).into_response()
}

pub async fn add_qr_code(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    uri: Uri,
    Form(form): Form<AddQrCodeForm>,
) -> Response {
    let Some(event_id) = EventId::resolve(Some(&event_id)) else {
        return unresolved_page(&state);
    };

    let view = state.sessions.open(&event_id, state.store.as_ref()).await;
    let mut view = view.lock().await;
    match view.add_record(state.store.as_ref(), &form.description).await {
        Ok(()) => Redirect::to(uri.path()).into_response(),
        Err(e @ InputError::DescriptionRequired) => {
            tracing::debug!(event_id = %event_id, "Rejected QR code without description");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_page(&view, &state.page, Some(&e.to_string()))),
            )
                .into_response()
        }
    }
}

pub async fn delete_qr_code(
    State(state): State<AppState>,
    Path((event_id, qr_id)): Path<(String, String)>,
    uri: Uri,
) -> Response {
    let Some(event_id) = EventId::resolve(Some(&event_id)) else {
        return unresolved_page(&state);
    };

    let view = state.sessions.open(&event_id, state.store.as_ref()).await;
    view.lock()
        .await
        .delete_record(state.store.as_ref(), &qr_id)
        .await;

    // `.../qr-codes/{id}/delete` back to `.../qr-codes`
    let page = uri.path().rsplitn(3, '/').last().unwrap_or("/");
    Redirect::to(page).into_response()
}

/// A blank event id never fetches; the page stays in its loading state.
fn unresolved_page(state: &AppState) -> Response {
    let view = QrCodesView::new(None);
    Html(render_page(&view, &state.page, None)).into_response()
}
