//! Handlers for soil analysis and fertilizer recommendations.

use axum::{Json, extract::State};

use crate::api::dto::soil::{AdvisoryItem, RecommendResponse, SoilAnalysisResponse, SoilRequest};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// Scores a soil sample and lists the advisories that apply.
///
/// # Endpoint
///
/// `POST /soil/analyze`
///
/// # Request Body
///
/// ```json
/// { "n": 40, "p": 18, "k": 120, "ph": 6.3, "om": 1.0, "preset": "ph_band" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "score": 66,
///   "n": 40, "p": 18, "k": 120,
///   "advisory": ["Add compost/green manure to improve organic matter."],
///   "preset": "nutrient_balance"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `ph` is outside 0-14 or the body does not
/// deserialize.
pub async fn soil_analyze_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SoilRequest>,
) -> Result<Json<SoilAnalysisResponse>, AppError> {
    let service = &state.estimator_service;
    let preset = payload.preset.unwrap_or(service.soil_preset());

    let result = service.analyze_soil(&payload.to_sample(), Some(preset))?;

    Ok(Json(SoilAnalysisResponse::new(&payload, &result, preset)))
}

/// Runs the fertilizer rule table against a soil sample.
///
/// # Endpoint
///
/// `POST /soil/recommend`
///
/// # Response
///
/// ```json
/// {
///   "advisory": [
///     { "rule": "nitrogen_low", "text": "Nitrogen low: add urea or organic manure (apply split doses)." }
///   ]
/// }
/// ```
///
/// Always contains at least one entry; `balanced` when no rule fires.
///
/// Readings are not range-checked here, unlike `/soil/analyze`: a pH of 20
/// simply fires `soil_alkaline`. Only a body that does not deserialize is
/// rejected (400).
pub async fn soil_recommend_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SoilRequest>,
) -> Json<RecommendResponse> {
    let advisory = state
        .estimator_service
        .recommend_fertilizer(&payload.to_sample())
        .into_iter()
        .map(AdvisoryItem::from)
        .collect();

    Json(RecommendResponse { advisory })
}
