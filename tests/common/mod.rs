#![allow(dead_code)]

use std::sync::Arc;
use yield_advisor::application::services::EstimatorService;
use yield_advisor::domain::presets::{SoilPreset, YieldPreset};
use yield_advisor::infrastructure::recent::{InMemoryRecentStore, NullRecentStore, RecentStore};
use yield_advisor::state::AppState;

pub const TEST_CAPACITY: usize = 5;

pub fn create_test_state() -> AppState {
    create_state_with_store(Arc::new(InMemoryRecentStore::new(TEST_CAPACITY)))
}

pub fn create_state_without_history() -> AppState {
    create_state_with_store(Arc::new(NullRecentStore::new()))
}

pub fn create_state_with_store(recent_store: Arc<dyn RecentStore>) -> AppState {
    let service = EstimatorService::new(
        YieldPreset::Baseline,
        SoilPreset::NutrientBalance,
        None,
        recent_store,
    );

    AppState::new(Arc::new(service))
}

pub fn maize_request() -> serde_json::Value {
    serde_json::json!({
        "crop": "maize",
        "area": 2,
        "soil": "loamy",
        "rain": 520,
        "temp": 26,
        "irrigation": 5,
        "seed": 42
    })
}
