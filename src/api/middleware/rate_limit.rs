//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-IP limiter layer type.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a per-client-IP rate limiter.
///
/// # Limits
///
/// - **Rate**: `per_second` requests replenished per second
///   (`RATE_LIMIT_PER_SECOND`, default 2)
/// - **Burst**: `burst_size` requests (`RATE_LIMIT_BURST`, default 100)
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The client IP
/// is the socket peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if either value is zero.
pub fn layer(per_second: u64, burst_size: u32) -> Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(per_second)
        .burst_size(burst_size)
        .finish()
        .context("Rate limit and burst size must be greater than zero")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_rejects_zero_values() {
        assert!(layer(0, 10).is_err());
        assert!(layer(2, 0).is_err());
        assert!(layer(2, 100).is_ok());
    }
}
