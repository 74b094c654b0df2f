//! Health and metrics endpoints

use crate::{metrics, state::AppState, Result};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Report store and message sink health. 503 when the store is unreachable.
pub async fn health(State(state): State<AppState>) -> Response {
    let store_result = state.store.health_check().await;
    let sink_result = state.message_sink.health_check().await;

    let store = match &store_result {
        Ok(()) => json!({ "backend": state.store.backend_name(), "status": "ok" }),
        Err(e) => {
            tracing::warn!(error = %e, "Seller store health check failed");
            json!({ "backend": state.store.backend_name(), "status": "unavailable" })
        }
    };
    let sink = match sink_result {
        Ok(details) => details,
        Err(e) => {
            tracing::warn!(error = %e, "Message sink health check failed");
            json!({ "status": "unavailable" })
        }
    };

    let (status, label) = if store_result.is_ok() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(json!({
            "status": label,
            "version": env!("CARGO_PKG_VERSION"),
            "store": store,
            "messaging": sink,
        })),
    )
        .into_response()
}

pub async fn metrics() -> Result<Response> {
    let body = metrics::render()?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}
