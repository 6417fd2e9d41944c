//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Estimator**: Runs a reference estimate against the configured preset
/// 2. **Recent store**: Checks that prediction history accepts writes
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "estimator": { "status": "ok", "message": "Preset: baseline" },
///     "recent_store": { "status": "ok", "message": "Capacity: 5" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let estimator_check = check_estimator(&state);

    let store_check = check_recent_store(&state).await;

    let all_healthy = estimator_check.status == "ok" && store_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            estimator: estimator_check,
            recent_store: store_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Runs the estimator self-check.
fn check_estimator(state: &AppState) -> CheckStatus {
    let service = &state.estimator_service;
    match service.self_check() {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Preset: {}", service.yield_preset())),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(e.to_string()),
        },
    }
}

/// Checks that the recent store accepts writes.
async fn check_recent_store(state: &AppState) -> CheckStatus {
    let service = &state.estimator_service;
    if service.store_healthy().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Capacity: {}", service.recent_capacity())),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Recent store unavailable".to_string()),
        }
    }
}
