//! Infrastructure layer: state kept on behalf of the presentation layer.
//!
//! The estimator itself owns no state. The only thing the service keeps
//! between requests is the "recent predictions" list shown to users.
//!
//! # Modules
//!
//! - [`recent`] - Recent prediction storage behind the
//!   [`recent::RecentStore`] trait

pub mod recent;
