//! Domain layer: the agronomic estimator.
//!
//! Everything in this layer is a pure, synchronous computation. It performs no
//! I/O, holds no cross-call state and knows nothing about the HTTP or CLI
//! surfaces built on top of it.
//!
//! # Architecture
//!
//! - [`entities`] - Value records passed in and out of the estimator
//! - [`presets`] - Named constant tables for every heuristic variant
//! - [`jitter`] - Injectable randomness for the weather-jitter term
//! - [`estimator`] - Yield estimation
//! - [`soil_scorer`] - Soil scoring and fertilizer advisories
//! - [`error`] - The `InvalidInput` failure
//!
//! # Example
//!
//! ```
//! use yield_advisor::domain::entities::{SoilType, YieldInputs};
//! use yield_advisor::domain::estimator::estimate;
//! use yield_advisor::domain::jitter::SeededJitter;
//! use yield_advisor::domain::presets::YieldPreset;
//!
//! let inputs = YieldInputs::new("wheat", 1.5, SoilType::Loamy, 600.0, 24.0, 4);
//! let constants = YieldPreset::Baseline.constants();
//! let estimate = estimate(&inputs, &constants, &mut SeededJitter::from_seed(1)).unwrap();
//!
//! assert_eq!(estimate.total_yield, estimate.yield_per_hectare * 1.5);
//! ```

pub mod entities;
pub mod error;
pub mod estimator;
pub mod jitter;
pub mod presets;
pub mod soil_scorer;

pub use error::EstimatorError;
