//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `YIELD_PRESET` - Yield table when a request names none: `baseline` or
//!   `varietal` (default: `baseline`)
//! - `SOIL_PRESET` - Soil scoring table: `nutrient_balance` or `ph_band`
//!   (default: `nutrient_balance`)
//! - `JITTER_SEED` - Fixes the weather jitter for every request without its own
//!   seed (default: unset, OS entropy)
//! - `RECENT_CAPACITY` - Predictions kept for `/predictions/recent`
//!   (default: 5, max: 1000, `0` disables history)
//! - `RATE_LIMIT_PER_SECOND` - Token replenish rate per client IP (default: 2)
//! - `RATE_LIMIT_BURST` - Token bucket size per client IP (default: 100)

use crate::domain::presets::{SoilPreset, YieldPreset};
use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub yield_preset: YieldPreset,
    pub soil_preset: SoilPreset,
    pub jitter_seed: Option<u64>,
    /// Size of the recent predictions ring. Zero swaps in a store that keeps nothing.
    pub recent_capacity: usize,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a preset name is unknown or `JITTER_SEED` is not an
    /// unsigned integer.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let yield_preset = match env::var("YIELD_PRESET") {
            Ok(v) => v.parse().context("Invalid YIELD_PRESET")?,
            Err(_) => YieldPreset::default(),
        };

        let soil_preset = match env::var("SOIL_PRESET") {
            Ok(v) => v.parse().context("Invalid SOIL_PRESET")?,
            Err(_) => SoilPreset::default(),
        };

        // Malformed seeds fail startup instead of falling back to entropy.
        let jitter_seed = match env::var("JITTER_SEED") {
            Ok(v) if !v.trim().is_empty() => Some(
                v.trim()
                    .parse()
                    .with_context(|| format!("JITTER_SEED must be an unsigned integer, got '{v}'"))?,
            ),
            _ => None,
        };

        let recent_capacity = env::var("RECENT_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let rate_limit_per_second = env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let rate_limit_burst = env::var("RATE_LIMIT_BURST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            yield_preset,
            soil_preset,
            jitter_seed,
            recent_capacity,
            rate_limit_per_second,
            rate_limit_burst,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `recent_capacity` exceeds 1000
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - either rate limit value is zero
    pub fn validate(&self) -> Result<()> {
        if self.recent_capacity > 1_000 {
            anyhow::bail!(
                "RECENT_CAPACITY is too large (max: 1000), got {}",
                self.recent_capacity
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.rate_limit_per_second == 0 {
            anyhow::bail!("RATE_LIMIT_PER_SECOND must be greater than 0");
        }
        if self.rate_limit_burst == 0 {
            anyhow::bail!("RATE_LIMIT_BURST must be greater than 0");
        }

        Ok(())
    }

    /// Returns whether served predictions are kept for `/predictions/recent`.
    pub fn is_history_enabled(&self) -> bool {
        self.recent_capacity > 0
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Yield preset: {}", self.yield_preset);
        tracing::info!("  Soil preset: {}", self.soil_preset);

        match self.jitter_seed {
            Some(seed) => tracing::info!("  Jitter seed: {} (reproducible)", seed),
            None => tracing::info!("  Jitter seed: entropy"),
        }

        if self.is_history_enabled() {
            tracing::info!("  Recent predictions: {} (enabled)", self.recent_capacity);
        } else {
            tracing::info!("  Recent predictions: disabled");
        }

        tracing::info!(
            "  Rate limit: {}/s, burst {}",
            self.rate_limit_per_second,
            self.rate_limit_burst
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
