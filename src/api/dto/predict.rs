//! DTOs for the yield prediction endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Confidence, SoilType, YieldEstimate, YieldInputs};
use crate::domain::presets::YieldPreset;

/// Yield prediction request.
///
/// `crop` and `soil` may be empty or unknown; the estimator falls back to its
/// defaults for them. A missing `irrigation` level counts as no irrigation.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    #[serde(default)]
    #[validate(length(max = 64, message = "Crop name must be at most 64 characters"))]
    pub crop: String,

    /// Field area in hectares.
    pub area: f64,

    #[serde(default)]
    #[validate(length(max = 32, message = "Soil type must be at most 32 characters"))]
    pub soil: String,

    /// Rainfall in mm.
    pub rain: f64,

    /// Mean temperature in °C.
    pub temp: f64,

    #[serde(default)]
    pub irrigation: u32,

    pub ph: Option<f64>,

    pub organic_carbon: Option<f64>,

    /// Previous season's yield in kg/ha.
    pub prior_yield: Option<f64>,

    /// Overrides the configured yield preset.
    pub preset: Option<YieldPreset>,

    /// Seeds the weather jitter for a reproducible result.
    pub seed: Option<u64>,
}

impl PredictRequest {
    pub fn to_inputs(&self) -> YieldInputs {
        YieldInputs::new(
            self.crop.clone(),
            self.area,
            SoilType::from_label(&self.soil),
            self.rain,
            self.temp,
            self.irrigation,
        )
        .with_soil_ph(self.ph)
        .with_organic_carbon(self.organic_carbon)
        .with_prior_yield(self.prior_yield)
    }
}

/// Yield prediction result.
///
/// Yields are rounded to whole kilograms for display only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub yield_per_ha: f64,
    pub total_yield: f64,
    pub recommendations: Vec<String>,
    pub confidence: Confidence,
    pub preset: YieldPreset,
}

impl PredictResponse {
    pub fn from_estimate(estimate: YieldEstimate, preset: YieldPreset) -> Self {
        Self {
            yield_per_ha: estimate.yield_per_hectare.round(),
            total_yield: estimate.total_yield.round(),
            recommendations: estimate.recommendations,
            confidence: estimate.confidence,
            preset,
        }
    }
}
