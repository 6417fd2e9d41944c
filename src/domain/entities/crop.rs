//! Yield estimation inputs and results.

use serde::{Deserialize, Serialize};

/// Soil texture category used by the soil factor.
///
/// Parsing is lenient: anything that is not recognised maps to
/// [`SoilType::Other`], which takes the default multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoilType {
    Loamy,
    Sandy,
    Clay,
    #[default]
    Other,
}

impl SoilType {
    /// Maps a free-text soil label to a category, case-insensitively.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "loamy" | "loam" => Self::Loamy,
            "sandy" | "sand" => Self::Sandy,
            "clay" | "clayey" => Self::Clay,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loamy => "loamy",
            Self::Sandy => "sandy",
            Self::Clay => "clay",
            Self::Other => "other",
        }
    }
}

impl From<&str> for SoilType {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

/// Farm, soil and weather readings for a single yield estimate.
///
/// `area` is in hectares, `rainfall` in mm and `temperature` in °C.
/// `prior_yield` is a previous season's yield in kg/ha; when present it
/// replaces the crop's base yield.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldInputs {
    pub crop: String,
    pub area: f64,
    pub soil_type: SoilType,
    pub rainfall: f64,
    pub temperature: f64,
    pub irrigation_level: u32,
    pub soil_ph: Option<f64>,
    pub organic_carbon: Option<f64>,
    pub prior_yield: Option<f64>,
}

impl YieldInputs {
    /// Creates inputs with no optional soil readings.
    pub fn new(
        crop: impl Into<String>,
        area: f64,
        soil_type: SoilType,
        rainfall: f64,
        temperature: f64,
        irrigation_level: u32,
    ) -> Self {
        Self {
            crop: crop.into(),
            area,
            soil_type,
            rainfall,
            temperature,
            irrigation_level,
            soil_ph: None,
            organic_carbon: None,
            prior_yield: None,
        }
    }

    pub fn with_soil_ph(mut self, ph: Option<f64>) -> Self {
        self.soil_ph = ph;
        self
    }

    pub fn with_organic_carbon(mut self, organic_carbon: Option<f64>) -> Self {
        self.organic_carbon = organic_carbon;
        self
    }

    pub fn with_prior_yield(mut self, prior_yield: Option<f64>) -> Self {
        self.prior_yield = prior_yield;
        self
    }
}

/// Every multiplicative term that went into an estimate.
///
/// `fertility` is `None` when neither pH nor organic carbon was supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldFactors {
    pub base_yield: f64,
    pub soil: f64,
    pub rainfall: f64,
    pub temperature: f64,
    pub irrigation: f64,
    pub fertility: Option<f64>,
    pub variety: f64,
    pub weather_jitter: f64,
    pub small_area: f64,
}

impl YieldFactors {
    /// Product of all factors, excluding the base yield.
    pub fn product(&self) -> f64 {
        self.soil
            * self.rainfall
            * self.temperature
            * self.irrigation
            * self.fertility.unwrap_or(1.0)
            * self.variety
            * self.weather_jitter
            * self.small_area
    }
}

/// How much weight the caller should put on an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Good,
    Moderate,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
        }
    }
}

/// Result of a yield estimate, in kg.
///
/// `total_yield` is always exactly `yield_per_hectare * area`; nothing is
/// rounded here.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldEstimate {
    pub yield_per_hectare: f64,
    pub total_yield: f64,
    pub recommendations: Vec<String>,
    pub confidence: Confidence,
    pub factors: YieldFactors,
}
