//! API route configuration.

use crate::api::handlers::{
    predict_handler, recent_handler, soil_analyze_handler, soil_recommend_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Estimator routes. No authentication; rate limiting is applied by the caller.
///
/// # Endpoints
///
/// - `POST /predict`             - Estimate yield for a field
/// - `POST /soil/analyze`        - Score a soil sample with advisories
/// - `POST /soil/recommend`      - Fertilizer rule table for a soil sample
/// - `GET  /predictions/recent`  - Recently served predictions, newest first
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(predict_handler))
        .route("/soil/analyze", post(soil_analyze_handler))
        .route("/soil/recommend", post(soil_recommend_handler))
        .route("/predictions/recent", get(recent_handler))
}
