use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use campus_shared::{HealthCheck, HealthResponse, HealthStatus};

use crate::store::Store;
use crate::AppState;

/// GET /health - liveness plus a database round trip
pub async fn health_check<S: Store>(State(state): State<Arc<AppState<S>>>) -> Response {
    let database = match state.store.ping() {
        Ok(()) => HealthCheck {
            name: "database".to_string(),
            status: HealthStatus::Healthy,
            message: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "database health check failed");
            HealthCheck {
                name: "database".to_string(),
                status: HealthStatus::Unhealthy,
                message: Some("unreachable".to_string()),
            }
        }
    };

    let response = HealthResponse::healthy("campus-messaging", env!("CARGO_PKG_VERSION"))
        .with_checks(vec![database]);

    let status = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(response)).into_response()
}

/// GET /metrics - Prometheus exposition
pub async fn metrics<S: Store>(State(state): State<Arc<AppState<S>>>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
