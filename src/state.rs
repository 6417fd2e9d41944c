//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::EstimatorService;

#[derive(Clone)]
pub struct AppState {
    pub estimator_service: Arc<EstimatorService>,
}

impl AppState {
    pub fn new(estimator_service: Arc<EstimatorService>) -> Self {
        Self { estimator_service }
    }
}
