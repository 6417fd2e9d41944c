//! Recorded prediction kept by the presentation layer.

use chrono::{DateTime, Utc};

/// A prediction that was served to a user, kept for the "recent results" list.
///
/// The estimator never reads these back.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentPrediction {
    pub crop: String,
    pub yield_per_hectare: f64,
    pub total_yield: f64,
    pub recorded_at: DateTime<Utc>,
}

impl RecentPrediction {
    pub fn new(crop: impl Into<String>, yield_per_hectare: f64, total_yield: f64) -> Self {
        Self {
            crop: crop.into(),
            yield_per_hectare,
            total_yield,
            recorded_at: Utc::now(),
        }
    }
}
