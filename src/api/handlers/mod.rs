//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod fallback;
pub mod health;
pub mod predict;
pub mod recent;
pub mod soil;

pub use fallback::fallback_handler;
pub use health::health_handler;
pub use predict::predict_handler;
pub use recent::recent_handler;
pub use soil::{soil_analyze_handler, soil_recommend_handler};
