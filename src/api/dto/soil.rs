//! DTOs for soil analysis and fertilizer recommendation endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Advisory, SoilSample, SoilScore};
use crate::domain::presets::SoilPreset;

/// Soil readings: nutrients in mg/kg, organic matter in percent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilRequest {
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub ph: f64,
    /// Organic matter in percent. Omitted means `0.0`, which always fires
    /// `organic_matter_low`.
    #[serde(default, alias = "organicMatter")]
    pub om: f64,
    /// Overrides the configured soil preset.
    pub preset: Option<SoilPreset>,
}

impl SoilRequest {
    pub fn to_sample(&self) -> SoilSample {
        SoilSample::new(self.n, self.p, self.k, self.ph, self.om)
    }
}

/// Soil analysis result with the advisories as plain strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysisResponse {
    pub score: u8,
    pub n: f64,
    pub p: f64,
    pub k: f64,
    pub advisory: Vec<String>,
    pub preset: SoilPreset,
}

impl SoilAnalysisResponse {
    pub fn new(request: &SoilRequest, result: &SoilScore, preset: SoilPreset) -> Self {
        Self {
            score: result.score,
            n: request.n,
            p: request.p,
            k: request.k,
            advisory: result.advisory_texts(),
            preset,
        }
    }
}

/// Fertilizer recommendation result.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub advisory: Vec<AdvisoryItem>,
}

/// An advisory with its rule identifier.
#[derive(Debug, Serialize)]
pub struct AdvisoryItem {
    pub rule: &'static str,
    pub text: &'static str,
}

impl From<Advisory> for AdvisoryItem {
    fn from(advisory: Advisory) -> Self {
        Self {
            rule: advisory.rule.as_str(),
            text: advisory.text,
        }
    }
}
