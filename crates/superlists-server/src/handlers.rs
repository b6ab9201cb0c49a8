//! Request handlers.
//!
//! Every handler takes the shared [`AppState`], talks to the list store and
//! answers with a rendered page, a redirect to the list URL, or JSON for the
//! status endpoint.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use superlists_core::{Error, ItemText, ListId, StoreStats};
use superlists_telemetry::MetricsSnapshot;

use crate::server::AppState;
use crate::views;

/// Form submitted by the new-item input box.
#[derive(Debug, Deserialize)]
pub struct NewItemForm {
    /// Text typed by the visitor.
    pub item_text: String,
}

// === Error Pages ===

/// Maps an error to an HTML error page.
///
/// Storage and internal failures are logged and reported without detail.
pub fn error_response(err: &Error) -> Response {
    let (status, title, message) = if !err.is_client_error() {
        tracing::error!(error = %err, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server Error",
            "요청을 처리하는 중 오류가 발생했습니다",
        )
    } else if err.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            "Not Found",
            "요청한 작업 목록을 찾을 수 없습니다",
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            "Bad Request",
            views::EMPTY_ITEM_ERROR,
        )
    };

    (status, Html(views::error_page(title, message))).into_response()
}

// === Pages ===

/// `GET /`: the home page with an empty form.
pub async fn home() -> Html<String> {
    Html(views::home_page(None))
}

/// `POST /` and `POST /lists/new`: starts a new list with the submitted item.
pub async fn new_list(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewItemForm>,
) -> Response {
    let Ok(text) = ItemText::new(form.item_text) else {
        state.metrics.record_rejected();
        return (
            StatusCode::BAD_REQUEST,
            Html(views::home_page(Some(views::EMPTY_ITEM_ERROR))),
        )
            .into_response();
    };

    match state.store.create_list(text).await {
        Ok(list) => {
            state.metrics.record_list_created();
            tracing::info!(list_id = %list.id, "List created");
            Redirect::to(&list.id.url()).into_response()
        },
        Err(e) => error_response(&e),
    }
}

/// `GET /lists/:list_id`: redirects to the canonical list URL.
pub async fn append_slash(Path(list_id): Path<String>) -> Response {
    match list_id.parse::<ListId>() {
        Ok(id) => Redirect::permanent(&id.url()).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `GET /lists/:list_id/`: renders one list.
pub async fn view_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
) -> Response {
    let id = match list_id.parse::<ListId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match state.store.get_list(&id).await {
        Ok(Some(list)) => Html(views::list_page(&list, None)).into_response(),
        Ok(None) => error_response(&Error::list_not_found(id)),
        Err(e) => error_response(&e),
    }
}

/// `POST /lists/:list_id/add_item`: appends the submitted item to a list.
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<String>,
    Form(form): Form<NewItemForm>,
) -> Response {
    let id = match list_id.parse::<ListId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let Ok(text) = ItemText::new(form.item_text) else {
        state.metrics.record_rejected();
        return match state.store.get_list(&id).await {
            Ok(Some(list)) => (
                StatusCode::BAD_REQUEST,
                Html(views::list_page(&list, Some(views::EMPTY_ITEM_ERROR))),
            )
                .into_response(),
            Ok(None) => error_response(&Error::list_not_found(id)),
            Err(e) => error_response(&e),
        };
    };

    match state.store.append_item(&id, text).await {
        Ok(list) => {
            state.metrics.record_item_added();
            tracing::debug!(list_id = %id, items = list.len(), "Item added");
            Redirect::to(&id.url()).into_response()
        },
        Err(e) => error_response(&e),
    }
}

// === Health Endpoints ===

/// `GET /health`: liveness probe.
pub async fn health() -> &'static str {
    "OK"
}

/// Body of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct ServerStatus {
    status: String,
    uptime_seconds: u64,
    max_concurrent_requests: usize,
    store: StoreStats,
    activity: MetricsSnapshot,
}

/// `GET /api/status`: uptime, store contents and activity counters.
pub async fn server_status(State(state): State<Arc<AppState>>) -> Response {
    match state.store.stats().await {
        Ok(store) => Json(ServerStatus {
            status: "running".to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
            max_concurrent_requests: state.config.max_concurrent_requests,
            store,
            activity: state.metrics.snapshot(),
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read store stats");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(status_error(&e)),
            )
                .into_response()
        },
    }
}

#[derive(Debug, Serialize)]
struct StatusError {
    status: &'static str,
    error: String,
}

fn status_error(err: &Error) -> StatusError {
    StatusError {
        status: "error",
        error: err.to_string(),
    }
}
