//! Core domain entities: plain value records exchanged with the estimator.
//!
//! Entities carry no identity and are never mutated after construction. Every
//! call to the estimator creates fresh values; callers decide whether and where
//! to keep them.
//!
//! # Entity Types
//!
//! - [`YieldInputs`] / [`YieldEstimate`] - Yield estimation request and result
//! - [`SoilSample`] / [`SoilScore`] - Soil readings and their health score
//! - [`Advisory`] - A rule-triggered recommendation
//! - [`RecentPrediction`] - A recorded prediction kept by the presentation layer

pub mod advisory;
pub mod crop;
pub mod recent;
pub mod soil;

pub use advisory::{Advisory, AdvisoryRule};
pub use crop::{Confidence, SoilType, YieldEstimate, YieldFactors, YieldInputs};
pub use recent::RecentPrediction;
pub use soil::{Reading, SoilSample, SoilScore};
