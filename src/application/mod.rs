//! Application layer services.
//!
//! Services bind the pure estimator to the running process: they choose the
//! configured presets, construct the jitter source for each request, record
//! served predictions, and emit logs and metrics. HTTP handlers and the CLI
//! never call into the domain with their own constants.
//!
//! # Available Services
//!
//! - [`services::estimator_service::EstimatorService`] - Yield prediction,
//!   soil analysis and fertilizer recommendations

pub mod services;
