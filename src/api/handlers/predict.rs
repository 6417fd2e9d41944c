//! Handler for the yield prediction endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::predict::{PredictRequest, PredictResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// Estimates crop yield for a field.
///
/// # Endpoint
///
/// `POST /predict`
///
/// # Request Body
///
/// ```json
/// {
///   "crop": "maize",
///   "area": 2,
///   "soil": "loamy",
///   "rain": 520,
///   "temp": 26,
///   "irrigation": 5,
///   "ph": 6.4,            // optional
///   "organicCarbon": 1.2, // optional
///   "priorYield": 2600,   // optional, kg/ha
///   "preset": "varietal", // optional
///   "seed": 42            // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "yieldPerHa": 3177,
///   "totalYield": 6353,
///   "recommendations": ["Maintain good agricultural practices for optimal yield."],
///   "confidence": "good",
///   "preset": "baseline"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a non-positive area, a pH outside 0-14, an
/// oversized text field, or a body that is not valid JSON for the request
/// (missing `area`, a string where a number belongs, a negative `irrigation`).
pub async fn predict_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    payload.validate()?;

    let service = &state.estimator_service;
    let preset = payload.preset.unwrap_or(service.yield_preset());

    let estimate = service
        .predict(payload.to_inputs(), Some(preset), payload.seed)
        .await?;

    Ok(Json(PredictResponse::from_estimate(estimate, preset)))
}
