//! Yield prediction and soil analysis service.

use std::sync::Arc;

use crate::domain::entities::{
    Advisory, RecentPrediction, SoilSample, SoilScore, SoilType, YieldEstimate, YieldInputs,
};
use crate::domain::estimator::estimate;
use crate::domain::jitter::{FixedJitter, SeededJitter};
use crate::domain::presets::{SoilPreset, YieldPreset};
use crate::domain::soil_scorer;
use crate::error::AppError;
use crate::infrastructure::recent::RecentStore;
use serde_json::json;
use tracing::{debug, info, warn};

/// Service wrapping the estimator with presets, jitter and history.
///
/// Holds no estimator state of its own: the only thing that outlives a call is
/// the entry pushed into the recent store.
pub struct EstimatorService {
    yield_preset: YieldPreset,
    soil_preset: SoilPreset,
    jitter_seed: Option<u64>,
    recent_store: Arc<dyn RecentStore>,
}

impl EstimatorService {
    /// Creates a new estimator service.
    ///
    /// # Arguments
    ///
    /// - `yield_preset` / `soil_preset` - tables used when a request names none
    /// - `jitter_seed` - when set, every prediction without its own seed uses
    ///   this one, making the deployment fully reproducible
    /// - `recent_store` - where served predictions are recorded
    pub fn new(
        yield_preset: YieldPreset,
        soil_preset: SoilPreset,
        jitter_seed: Option<u64>,
        recent_store: Arc<dyn RecentStore>,
    ) -> Self {
        Self {
            yield_preset,
            soil_preset,
            jitter_seed,
            recent_store,
        }
    }

    pub fn yield_preset(&self) -> YieldPreset {
        self.yield_preset
    }

    pub fn soil_preset(&self) -> SoilPreset {
        self.soil_preset
    }

    /// Estimates yield and records the result in the recent store.
    ///
    /// The jitter seed is taken from `seed`, then the configured seed, and
    /// falls back to OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the estimator rejects the inputs.
    /// A failing recent store is logged and does not fail the prediction.
    pub async fn predict(
        &self,
        inputs: YieldInputs,
        preset: Option<YieldPreset>,
        seed: Option<u64>,
    ) -> Result<YieldEstimate, AppError> {
        let preset = preset.unwrap_or(self.yield_preset);
        let constants = preset.constants();
        let mut jitter = match seed.or(self.jitter_seed) {
            Some(seed) => SeededJitter::from_seed(seed),
            None => SeededJitter::from_entropy(),
        };

        let result = estimate(&inputs, &constants, &mut jitter).inspect_err(|e| {
            metrics::counter!("invalid_inputs_total", "operation" => "predict").increment(1);
            warn!(field = e.field(), "Rejected prediction input: {}", e);
        })?;

        metrics::counter!("predictions_total", "preset" => preset.as_str()).increment(1);
        info!(
            crop = %inputs.crop,
            area = inputs.area,
            preset = preset.as_str(),
            yield_per_ha = result.yield_per_hectare,
            "Yield estimated"
        );

        let entry = RecentPrediction::new(
            inputs.crop.clone(),
            result.yield_per_hectare,
            result.total_yield,
        );
        if let Err(e) = self.recent_store.push(entry).await {
            warn!("Failed to record recent prediction: {}", e);
        }

        Ok(result)
    }

    /// Scores a soil sample.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for non-finite readings or pH outside 0-14.
    pub fn analyze_soil(
        &self,
        sample: &SoilSample,
        preset: Option<SoilPreset>,
    ) -> Result<SoilScore, AppError> {
        let preset = preset.unwrap_or(self.soil_preset);

        let result = soil_scorer::score(sample, &preset.constants()).inspect_err(|e| {
            metrics::counter!("invalid_inputs_total", "operation" => "soil_analyze").increment(1);
            warn!(field = e.field(), "Rejected soil sample: {}", e);
        })?;

        metrics::counter!("soil_analyses_total", "preset" => preset.as_str()).increment(1);
        debug!(
            score = result.score,
            advisories = result.advisories.len(),
            preset = preset.as_str(),
            "Soil scored"
        );

        Ok(result)
    }

    /// Fertilizer advisories for a sample, in rule order. Never empty.
    pub fn recommend_fertilizer(&self, sample: &SoilSample) -> Vec<Advisory> {
        soil_scorer::recommend(sample)
    }

    /// Returns recorded predictions, newest first.
    ///
    /// `limit` defaults to, and is capped at, the store capacity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be read.
    pub async fn recent_predictions(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<RecentPrediction>, AppError> {
        let capacity = self.recent_store.capacity();
        let limit = limit.unwrap_or(capacity).min(capacity);

        Ok(self.recent_store.list(limit).await?)
    }

    /// Runs a reference estimate with neutral jitter to confirm the configured
    /// tables produce a value inside their own clamp band.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the reference estimate fails or falls
    /// outside the band.
    pub fn self_check(&self) -> Result<(), AppError> {
        let constants = self.yield_preset.constants();
        let inputs = YieldInputs::new("wheat", 1.0, SoilType::Loamy, 600.0, 25.0, 5);
        let mut jitter = FixedJitter::neutral(&constants.jitter);

        let result = estimate(&inputs, &constants, &mut jitter).map_err(|e| {
            AppError::internal(
                "Estimator self-check failed",
                json!({ "reason": e.to_string() }),
            )
        })?;

        if !(constants.min_yield..=constants.max_yield).contains(&result.yield_per_hectare) {
            return Err(AppError::internal(
                "Estimator self-check out of range",
                json!({ "yield_per_ha": result.yield_per_hectare }),
            ));
        }

        Ok(())
    }

    /// Maximum number of predictions kept in history.
    pub fn recent_capacity(&self) -> usize {
        self.recent_store.capacity()
    }

    /// Checks whether the recent store accepts writes.
    pub async fn store_healthy(&self) -> bool {
        self.recent_store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AdvisoryRule;
    use crate::infrastructure::recent::{InMemoryRecentStore, MockRecentStore, StoreError};

    fn service_with(store: Arc<dyn RecentStore>) -> EstimatorService {
        EstimatorService::new(
            YieldPreset::Baseline,
            SoilPreset::NutrientBalance,
            None,
            store,
        )
    }

    fn maize_field() -> YieldInputs {
        YieldInputs::new("maize", 2.0, SoilType::Loamy, 520.0, 26.0, 5)
    }

    #[tokio::test]
    async fn test_predict_records_recent_entry() {
        let mut store = MockRecentStore::new();
        store
            .expect_push()
            .times(1)
            .withf(|entry| entry.crop == "maize")
            .returning(|_| Ok(()));

        let service = service_with(Arc::new(store));
        let result = service.predict(maize_field(), None, Some(11)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_predict_with_same_seed_is_reproducible() {
        let service = service_with(Arc::new(InMemoryRecentStore::new(5)));

        let first = service.predict(maize_field(), None, Some(5)).await.unwrap();
        let second = service.predict(maize_field(), None, Some(5)).await.unwrap();

        assert_eq!(first.yield_per_hectare, second.yield_per_hectare);
        assert_eq!(first.total_yield, second.total_yield);
    }

    #[tokio::test]
    async fn test_configured_seed_is_used_when_request_has_none() {
        let service = EstimatorService::new(
            YieldPreset::Baseline,
            SoilPreset::NutrientBalance,
            Some(77),
            Arc::new(InMemoryRecentStore::new(5)),
        );

        let first = service.predict(maize_field(), None, None).await.unwrap();
        let second = service.predict(maize_field(), None, Some(77)).await.unwrap();

        assert_eq!(first.yield_per_hectare, second.yield_per_hectare);
    }

    #[tokio::test]
    async fn test_predict_survives_store_failure() {
        let mut store = MockRecentStore::new();
        store
            .expect_push()
            .returning(|_| Err(StoreError::Unavailable("down".to_string())));

        let service = service_with(Arc::new(store));

        assert!(service.predict(maize_field(), None, Some(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_predict_rejects_invalid_area_without_recording() {
        let mut store = MockRecentStore::new();
        store.expect_push().times(0);

        let service = service_with(Arc::new(store));
        let inputs = YieldInputs { area: 0.0, ..maize_field() };

        let err = service.predict(inputs, None, Some(1)).await.unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }

    #[tokio::test]
    async fn test_recent_predictions_limit_capped_by_capacity() {
        let service = service_with(Arc::new(InMemoryRecentStore::new(2)));
        for _ in 0..4 {
            service.predict(maize_field(), None, Some(3)).await.unwrap();
        }

        assert_eq!(service.recent_predictions(None).await.unwrap().len(), 2);
        assert_eq!(service.recent_predictions(Some(50)).await.unwrap().len(), 2);
        assert_eq!(service.recent_predictions(Some(1)).await.unwrap().len(), 1);
    }

    #[test]
    fn test_analyze_soil_uses_requested_preset() {
        let service = service_with(Arc::new(InMemoryRecentStore::new(5)));
        let sample = SoilSample::new(40.0, 18.0, 120.0, 6.3, 1.0);

        let default = service.analyze_soil(&sample, None).unwrap();
        let ph_band = service.analyze_soil(&sample, Some(SoilPreset::PhBand)).unwrap();

        assert_eq!(default.score, 66);
        assert_eq!(ph_band.score, 77);
    }

    #[test]
    fn test_recommend_fertilizer_fallback() {
        let service = service_with(Arc::new(InMemoryRecentStore::new(5)));
        let sample = SoilSample::new(50.0, 30.0, 200.0, 6.8, 3.0);

        let advisories = service.recommend_fertilizer(&sample);

        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].rule, AdvisoryRule::Balanced);
    }

    #[test]
    fn test_self_check_passes_for_builtin_presets() {
        for preset in [YieldPreset::Baseline, YieldPreset::Varietal] {
            let service = EstimatorService::new(
                preset,
                SoilPreset::PhBand,
                None,
                Arc::new(InMemoryRecentStore::new(1)),
            );
            assert!(service.self_check().is_ok());
        }
    }
}
