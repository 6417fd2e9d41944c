//! Named constant tables for the estimator.
//!
//! The heuristics exist in several variants that disagree on their constants.
//! Rather than duplicating the arithmetic, each variant is a preset: a table of
//! named constants fed to the single implementation in
//! [`crate::domain::estimator`] and [`crate::domain::soil_scorer`].
//!
//! # Yield presets
//!
//! - [`YieldPreset::Baseline`] - crop base table with soil, rainfall,
//!   temperature and irrigation factors
//! - [`YieldPreset::Varietal`] - baseline plus per-variety bonuses
//!
//! # Soil presets
//!
//! - [`SoilPreset::NutrientBalance`] - linear deviation of N/P/K from reference
//!   points plus a pH band (default)
//! - [`SoilPreset::PhBand`] - dominated by pH banding, with organic matter and
//!   nitrogen contributions

use crate::domain::entities::{Reading, SoilType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Returned when a preset name does not match any known table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown preset '{0}'")]
pub struct UnknownPreset(pub String);

// ── Yield curves ────────────────────────────────────────────────────────────

/// Multiplier per soil category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilFactors {
    pub loamy: f64,
    pub sandy: f64,
    /// Applies to clay and to anything unrecognised.
    pub fallback: f64,
}

/// Saturating rainfall response: `tanh(rain / scale) * ceiling`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainfallCurve {
    pub scale: f64,
    pub ceiling: f64,
}

impl RainfallCurve {
    /// Negative rainfall is read as none.
    pub fn factor(&self, rainfall_mm: f64) -> f64 {
        (rainfall_mm.max(0.0) / self.scale).tanh() * self.ceiling
    }
}

/// Tent-shaped temperature response peaking at `optimum`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureCurve {
    pub optimum: f64,
    /// Deviation in °C at which the factor reaches zero.
    pub span: f64,
}

impl TemperatureCurve {
    pub fn factor(&self, temperature: f64) -> f64 {
        (1.0 - (temperature - self.optimum).abs() / self.span).max(0.0)
    }
}

/// Linear irrigation response capped at `cap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrigationCurve {
    pub intercept: f64,
    pub per_level: f64,
    pub cap: f64,
}

impl IrrigationCurve {
    pub fn factor(&self, level: u32) -> f64 {
        (self.intercept + f64::from(level) * self.per_level).min(self.cap)
    }
}

/// Soil fertility response from organic carbon and pH distance from neutral.
///
/// `clamp(oc * (1 + (tolerance - |ph - neutral_ph|) / divisor), min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FertilityCurve {
    pub neutral_ph: f64,
    pub tolerance: f64,
    pub divisor: f64,
    pub default_ph: f64,
    pub default_organic_carbon: f64,
    pub min: f64,
    pub max: f64,
}

impl FertilityCurve {
    /// Returns `None` when neither reading is available.
    pub fn factor(&self, ph: Option<f64>, organic_carbon: Option<f64>) -> Option<f64> {
        if ph.is_none() && organic_carbon.is_none() {
            return None;
        }

        let ph = ph.unwrap_or(self.default_ph);
        let oc = organic_carbon.unwrap_or(self.default_organic_carbon);
        let raw = oc * (1.0 + (self.tolerance - (ph - self.neutral_ph).abs()) / self.divisor);

        Some(raw.clamp(self.min, self.max))
    }
}

/// Weather jitter: `1 + (u - bias) * spread` for `u` in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterCurve {
    pub bias: f64,
    pub spread: f64,
}

impl JitterCurve {
    pub fn multiplier(&self, sample: f64) -> f64 {
        1.0 + (sample.clamp(0.0, 1.0) - self.bias) * self.spread
    }
}

/// Edge-effect penalty for very small plots.
///
/// Policy constant: plots under `threshold_ha` lose a fixed share of yield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmallAreaCorrection {
    pub threshold_ha: f64,
    pub multiplier: f64,
}

impl SmallAreaCorrection {
    pub fn factor(&self, area_ha: f64) -> f64 {
        if area_ha < self.threshold_ha {
            self.multiplier
        } else {
            1.0
        }
    }
}

/// Advisory sentence per yield band, split at `low` and `medium` kg/ha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldBands {
    pub low: f64,
    pub medium: f64,
    pub low_text: &'static str,
    pub medium_text: &'static str,
    pub high_text: &'static str,
}

impl YieldBands {
    pub fn advisory(&self, yield_per_hectare: f64) -> &'static str {
        if yield_per_hectare < self.low {
            self.low_text
        } else if yield_per_hectare < self.medium {
            self.medium_text
        } else {
            self.high_text
        }
    }
}

/// Complete constant table for a yield estimate. All yields are kg/ha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldConstants {
    pub base_yields: &'static [(&'static str, f64)],
    pub default_base_yield: f64,
    pub soil: SoilFactors,
    pub rainfall: RainfallCurve,
    pub temperature: TemperatureCurve,
    pub irrigation: IrrigationCurve,
    pub fertility: FertilityCurve,
    /// Matched as case-insensitive substrings of the crop name, first hit wins.
    pub variety_factors: &'static [(&'static str, f64)],
    pub jitter: JitterCurve,
    pub small_area: SmallAreaCorrection,
    pub min_yield: f64,
    pub max_yield: f64,
    /// Estimates above this are labelled [`crate::domain::entities::Confidence::Good`].
    pub confidence_threshold: f64,
    pub bands: YieldBands,
}

impl YieldConstants {
    /// Base yield for a crop, matched case-insensitively after trimming.
    pub fn base_yield(&self, crop: &str) -> f64 {
        let crop = crop.trim().to_lowercase();
        self.base_yields
            .iter()
            .find(|(name, _)| *name == crop)
            .map(|(_, value)| *value)
            .unwrap_or(self.default_base_yield)
    }

    pub fn soil_factor(&self, soil: SoilType) -> f64 {
        match soil {
            SoilType::Loamy => self.soil.loamy,
            SoilType::Sandy => self.soil.sandy,
            SoilType::Clay | SoilType::Other => self.soil.fallback,
        }
    }

    pub fn variety_factor(&self, crop: &str) -> f64 {
        let crop = crop.to_lowercase();
        self.variety_factors
            .iter()
            .find(|(needle, _)| crop.contains(needle))
            .map(|(_, value)| *value)
            .unwrap_or(1.0)
    }
}

const BASE_YIELDS: &[(&str, f64)] = &[
    ("wheat", 3000.0),
    ("rice", 4000.0),
    ("maize", 5000.0),
    ("corn", 5000.0),
    ("millet", 1500.0),
];

const VARIETY_FACTORS: &[(&str, f64)] = &[("maize", 1.05), ("rice", 0.98)];

const BASELINE: YieldConstants = YieldConstants {
    base_yields: BASE_YIELDS,
    default_base_yield: 2800.0,
    soil: SoilFactors {
        loamy: 1.05,
        sandy: 0.9,
        fallback: 0.95,
    },
    rainfall: RainfallCurve {
        scale: 800.0,
        ceiling: 1.2,
    },
    temperature: TemperatureCurve {
        optimum: 25.0,
        span: 50.0,
    },
    irrigation: IrrigationCurve {
        intercept: 0.6,
        per_level: 0.06,
        cap: 1.0,
    },
    fertility: FertilityCurve {
        neutral_ph: 6.5,
        tolerance: 7.0,
        divisor: 10.0,
        default_ph: 6.5,
        default_organic_carbon: 1.0,
        min: 0.6,
        max: 1.6,
    },
    variety_factors: &[],
    jitter: JitterCurve {
        bias: 0.4,
        spread: 0.12,
    },
    small_area: SmallAreaCorrection {
        threshold_ha: 0.4,
        multiplier: 0.95,
    },
    min_yield: 300.0,
    max_yield: 10_000.0,
    confidence_threshold: 2000.0,
    bands: YieldBands {
        low: 2000.0,
        medium: 3000.0,
        low_text: "Consider improving soil nutrients and irrigation.",
        medium_text: "Optimize planting density and fertilizer application.",
        high_text: "Maintain good agricultural practices for optimal yield.",
    },
};

const VARIETAL: YieldConstants = YieldConstants {
    variety_factors: VARIETY_FACTORS,
    ..BASELINE
};

/// Selectable yield constant table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldPreset {
    #[default]
    Baseline,
    Varietal,
}

impl YieldPreset {
    pub fn constants(self) -> YieldConstants {
        match self {
            Self::Baseline => BASELINE,
            Self::Varietal => VARIETAL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Varietal => "varietal",
        }
    }
}

impl FromStr for YieldPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(Self::Baseline),
            "varietal" => Ok(Self::Varietal),
            other => Err(UnknownPreset(other.to_string())),
        }
    }
}

impl fmt::Display for YieldPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Soil tables ─────────────────────────────────────────────────────────────

/// Bounded linear adjustment: `clamp((min(value, cap) - reference) * per_unit, floor, ceiling)`.
///
/// When `rounded` is set the adjustment is rounded half-up before clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientTerm {
    pub reading: Reading,
    pub reference: f64,
    pub per_unit: f64,
    pub reading_cap: Option<f64>,
    pub floor: f64,
    pub ceiling: f64,
    pub rounded: bool,
}

impl NutrientTerm {
    pub fn adjustment(&self, reading: f64) -> f64 {
        let reading = match self.reading_cap {
            Some(cap) => reading.min(cap),
            None => reading,
        };
        let raw = (reading - self.reference) * self.per_unit;
        let raw = if self.rounded { round_half_up(raw) } else { raw };
        raw.clamp(self.floor, self.ceiling)
    }
}

/// Additive pH adjustment: `good` inside `[good_min, good_max]`, otherwise
/// `acidic` below it or `alkaline` above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhBand {
    pub good_min: f64,
    pub good_max: f64,
    pub good: f64,
    pub acidic: f64,
    pub alkaline: f64,
}

impl PhBand {
    pub fn adjustment(&self, ph: f64) -> f64 {
        if ph < self.good_min {
            self.acidic
        } else if ph > self.good_max {
            self.alkaline
        } else {
            self.good
        }
    }
}

/// Complete constant table for soil scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilConstants {
    pub baseline: f64,
    pub terms: &'static [NutrientTerm],
    pub ph_band: PhBand,
    pub min_score: f64,
    pub max_score: f64,
}

const NUTRIENT_BALANCE_TERMS: &[NutrientTerm] = &[
    NutrientTerm {
        reading: Reading::Nitrogen,
        reference: 40.0,
        per_unit: 0.5,
        reading_cap: None,
        floor: -20.0,
        ceiling: 20.0,
        rounded: false,
    },
    NutrientTerm {
        reading: Reading::Phosphorus,
        reference: 15.0,
        per_unit: 1.0 / 1.5,
        reading_cap: None,
        floor: -15.0,
        ceiling: 15.0,
        rounded: false,
    },
    NutrientTerm {
        reading: Reading::Potassium,
        reference: 100.0,
        per_unit: 0.2,
        reading_cap: None,
        floor: -15.0,
        ceiling: 15.0,
        rounded: false,
    },
];

const PH_BAND_TERMS: &[NutrientTerm] = &[
    NutrientTerm {
        reading: Reading::OrganicMatter,
        reference: 0.0,
        per_unit: 10.0 / 3.0,
        reading_cap: None,
        floor: f64::NEG_INFINITY,
        ceiling: 20.0,
        rounded: true,
    },
    NutrientTerm {
        reading: Reading::Nitrogen,
        reference: 0.0,
        per_unit: 0.1,
        reading_cap: Some(100.0),
        floor: f64::NEG_INFINITY,
        ceiling: 10.0,
        rounded: true,
    },
];

const NUTRIENT_BALANCE: SoilConstants = SoilConstants {
    baseline: 50.0,
    terms: NUTRIENT_BALANCE_TERMS,
    ph_band: PhBand {
        good_min: 6.0,
        good_max: 7.5,
        good: 10.0,
        acidic: -8.0,
        alkaline: -5.0,
    },
    min_score: 1.0,
    max_score: 100.0,
};

const PH_BAND: SoilConstants = SoilConstants {
    baseline: 50.0,
    terms: PH_BAND_TERMS,
    ph_band: PhBand {
        good_min: 6.0,
        good_max: 7.5,
        good: 20.0,
        acidic: -10.0,
        alkaline: -10.0,
    },
    min_score: 1.0,
    max_score: 100.0,
};

/// Selectable soil scoring table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilPreset {
    #[default]
    NutrientBalance,
    PhBand,
}

impl SoilPreset {
    pub fn constants(self) -> SoilConstants {
        match self {
            Self::NutrientBalance => NUTRIENT_BALANCE,
            Self::PhBand => PH_BAND,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NutrientBalance => "nutrient_balance",
            Self::PhBand => "ph_band",
        }
    }
}

impl FromStr for SoilPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "nutrient_balance" => Ok(Self::NutrientBalance),
            "ph_band" => Ok(Self::PhBand),
            other => Err(UnknownPreset(other.to_string())),
        }
    }
}

impl fmt::Display for SoilPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rounds halves towards positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
