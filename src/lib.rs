//! # Yield Advisor
//!
//! A heuristic crop yield estimator and soil advisory service built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Estimator, soil scorer, presets and entities
//! - **Application Layer** ([`application`]) - Service orchestration around the estimator
//! - **Infrastructure Layer** ([`infrastructure`]) - Recent predictions storage
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Multiplicative yield model with named, selectable constant presets
//! - Reproducible weather jitter through an injectable seed
//! - Soil scoring (0-100) and a fertilizer rule table
//! - Bounded history of recently served predictions
//! - Rate limiting and observability
//!
//! ## Quick Start
//!
//! ```bash
//! export YIELD_PRESET="baseline"   # Optional
//! export JITTER_SEED="42"          # Optional, reproducible output
//!
//! cargo run
//!
//! # Or straight from the terminal
//! cargo run --bin advisor -- predict --crop maize --area 2 --rain 520 --temp 26
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::EstimatorService;
    pub use crate::domain::entities::{SoilSample, SoilType, YieldEstimate, YieldInputs};
    pub use crate::domain::presets::{SoilPreset, YieldPreset};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
