//! Business logic services for the application layer.

pub mod estimator_service;

pub use estimator_service::EstimatorService;
