//! JSON API consumed by the dashboard frontend.
//!
//! The core surfaces structured errors; this layer maps them onto HTTP
//! status codes and a small JSON error body carrying both the machine kind
//! and the user-facing message.

use crate::dashboard::DashboardService;
use crate::export;
use crate::WxError;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct LocationQuery {
    location: String,
}

/// Build the API router.
pub fn router(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/forecast.csv", get(forecast_csv))
        .with_state(service)
}

/// `GET /api/dashboard?location=...`: run one fetch cycle and return the
/// snapshot.
async fn dashboard(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<LocationQuery>,
) -> Response {
    match service.fetch(&query.location).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => error_response(err),
    }
}

/// `GET /api/forecast.csv?location=...`: run one fetch cycle and return the
/// flat CSV export.
async fn forecast_csv(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<LocationQuery>,
) -> Response {
    let records = match service.fetch(&query.location).await {
        Ok(snapshot) => snapshot.records,
        Err(err) => return error_response(err),
    };

    match export::to_csv_string(&records) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: WxError) -> Response {
    let status = status_for(&err);
    warn!("Request failed ({}): {err}", err.kind());

    let body = Json(json!({
        "error": err.kind(),
        "message": err.user_message(),
    }));
    (status, body).into_response()
}

fn status_for(err: &WxError) -> StatusCode {
    match err {
        WxError::NotFound { .. } => StatusCode::NOT_FOUND,
        WxError::Validation { .. } => StatusCode::BAD_REQUEST,
        WxError::Fetch { .. } | WxError::Layout { .. } => StatusCode::BAD_GATEWAY,
        WxError::Config { .. } | WxError::Csv { .. } | WxError::Io { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
