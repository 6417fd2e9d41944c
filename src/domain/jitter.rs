//! Injectable source for the weather-jitter term.
//!
//! Jitter is the estimator's only non-deterministic input. It is drawn from a
//! [`JitterSource`] passed in by the caller, never from an ambient generator, so
//! a fixed seed or a fixed sample makes every estimate reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies uniform samples in `[0, 1)` for the weather-jitter multiplier.
#[cfg_attr(test, mockall::automock)]
pub trait JitterSource {
    fn sample(&mut self) -> f64;
}

/// Jitter drawn from a seedable PRNG.
///
/// Two sources built from the same seed yield the same sequence of samples.
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeds from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Always returns the same sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(pub f64);

impl FixedJitter {
    /// The sample that makes the multiplier exactly 1.0 for `curve`.
    pub fn neutral(curve: &crate::domain::presets::JitterCurve) -> Self {
        Self(curve.bias)
    }
}

impl JitterSource for FixedJitter {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets::YieldPreset;

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let mut a = SeededJitter::from_seed(42);
        let mut b = SeededJitter::from_seed(42);

        for _ in 0..16 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn test_seeded_jitter_stays_in_unit_interval() {
        let mut jitter = SeededJitter::from_entropy();

        for _ in 0..1000 {
            let sample = jitter.sample();
            assert!((0.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn test_neutral_fixed_jitter() {
        let curve = YieldPreset::Baseline.constants().jitter;
        let mut jitter = FixedJitter::neutral(&curve);

        assert_eq!(curve.multiplier(jitter.sample()), 1.0);
    }
}
