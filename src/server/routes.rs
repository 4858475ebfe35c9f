use crate::core::projects::PROJECTS;
use crate::domain::model::{BlogsResponse, ContactForm, RequestMetadata};
use crate::server::AppState;
use crate::utils::error::FolioError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// `GET /api/blogs`
///
/// 200 with whatever the aggregation produced (possibly empty); 500 only when
/// something outside the per-source isolation fails.
pub async fn blogs_handler(State(state): State<AppState>) -> Response {
    let body = state
        .aggregator
        .run()
        .await
        .and_then(|items| serde_json::to_vec(&BlogsResponse::ok(items)).map_err(FolioError::from));

    match body {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("❌ Blog aggregation failed unexpectedly: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(BlogsResponse::failed()),
            )
                .into_response()
        }
    }
}

/// `POST /api/contact`
pub async fn contact_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ContactForm>, JsonRejection>,
) -> Response {
    let Json(form) = match body {
        Ok(form) => form,
        Err(rejection) => {
            tracing::debug!("Rejected contact body: {}", rejection);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid request body" })),
            )
                .into_response();
        }
    };

    match state.contact.submit(form, request_metadata(&headers)).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(FolioError::ValidationError { message }) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
        Err(e) => {
            tracing::error!("❌ Contact submission failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed_to_process" })),
            )
                .into_response()
        }
    }
}

/// `GET /api/projects`
pub async fn projects_handler() -> Json<serde_json::Value> {
    Json(json!({ "items": PROJECTS }))
}

/// `GET /health`
pub async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "storage": state.contact.storage_enabled(),
        "email": state.contact.email_enabled(),
    }))
}

/// 代理後面的 IP 取 X-Forwarded-For 第一個，否則用 X-Real-IP
pub fn request_metadata(headers: &HeaderMap) -> RequestMetadata {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let forwarded = header("x-forwarded-for").and_then(|v| {
        v.split(',')
            .next()
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(str::to_string)
    });

    RequestMetadata {
        user_agent: header("user-agent"),
        ip: forwarded.or_else(|| header("x-real-ip")),
    }
}
