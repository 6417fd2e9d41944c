//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`              - Health check: estimator, recent store
//! - `POST /predict`             - Yield estimate
//! - `POST /soil/analyze`        - Soil score and advisories
//! - `POST /soil/recommend`      - Fertilizer rules
//! - `GET  /predictions/recent`  - Prediction history
//!
//! Anything else answers 404 with the standard error body.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the estimator routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `per_second` / `burst_size` - token bucket for the estimator routes;
///   `/health` is not limited
///
/// # Errors
///
/// Returns an error if the rate limit values are zero.
pub fn app_router(
    state: AppState,
    per_second: u64,
    burst_size: u32,
) -> Result<NormalizePath<Router>> {
    let api_router =
        api::routes::public_routes().layer(rate_limit::layer(per_second, burst_size)?);

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api_router)
        .fallback(fallback_handler)
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::EstimatorService;
    use crate::infrastructure::recent::InMemoryRecentStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let service = EstimatorService::new(
            Default::default(),
            Default::default(),
            None,
            Arc::new(InMemoryRecentStore::new(5)),
        );
        AppState::new(Arc::new(service))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_trailing_slash_is_normalized() {
        let app = app_router(test_state(), 2, 100).unwrap();

        let response = app.oneshot(get("/health/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = app_router(test_state(), 2, 100).unwrap();

        let response = app.oneshot(get("/yield")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_zero_rate_limit_rejected() {
        assert!(app_router(test_state(), 0, 100).is_err());
    }
}
