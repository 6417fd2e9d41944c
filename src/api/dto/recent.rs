//! DTOs for the recent predictions endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::RecentPrediction;

/// Query parameters for `GET /predictions/recent`.
///
/// Uses `serde_with` to parse the limit from the query string.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecentResponse {
    pub total: usize,
    pub items: Vec<RecentItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentItem {
    pub crop: String,
    pub yield_per_ha: f64,
    pub total_yield: f64,
    pub recorded_at: DateTime<Utc>,
}

impl From<RecentPrediction> for RecentItem {
    fn from(entry: RecentPrediction) -> Self {
        Self {
            crop: entry.crop,
            yield_per_ha: entry.yield_per_hectare.round(),
            total_yield: entry.total_yield.round(),
            recorded_at: entry.recorded_at,
        }
    }
}
