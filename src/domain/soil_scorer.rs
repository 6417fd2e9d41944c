//! Soil health scoring and fertilizer advisories.
//!
//! Scoring starts from the preset baseline, adds one bounded adjustment per
//! scoring term plus a pH band adjustment, then clamps to the preset range and
//! rounds to an integer.
//!
//! Advisories come from a single threshold table shared by [`score`] and
//! [`recommend`]. Rules are evaluated in table order and every rule that holds
//! contributes one advisory; when none holds, exactly one
//! [`AdvisoryRule::Balanced`] advisory is returned.

use crate::domain::entities::{Advisory, AdvisoryRule, Reading, SoilSample, SoilScore};
use crate::domain::error::{EstimatorError, ensure_finite, ensure_ph};
use crate::domain::presets::{SoilConstants, round_half_up};

/// Side of the bound a reading must fall on for a rule to fire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Below(f64),
    Above(f64),
}

impl Bound {
    fn holds(&self, value: f64) -> bool {
        match *self {
            Self::Below(limit) => value < limit,
            Self::Above(limit) => value > limit,
        }
    }
}

/// One row of the advisory table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisoryThreshold {
    pub rule: AdvisoryRule,
    pub reading: Reading,
    pub bound: Bound,
}

/// Fertilizer rules in evaluation order.
pub const ADVISORY_THRESHOLDS: &[AdvisoryThreshold] = &[
    AdvisoryThreshold {
        rule: AdvisoryRule::NitrogenLow,
        reading: Reading::Nitrogen,
        bound: Bound::Below(20.0),
    },
    AdvisoryThreshold {
        rule: AdvisoryRule::PhosphorusLow,
        reading: Reading::Phosphorus,
        bound: Bound::Below(15.0),
    },
    AdvisoryThreshold {
        rule: AdvisoryRule::PotassiumLow,
        reading: Reading::Potassium,
        bound: Bound::Below(120.0),
    },
    AdvisoryThreshold {
        rule: AdvisoryRule::SoilAcidic,
        reading: Reading::Ph,
        bound: Bound::Below(5.5),
    },
    AdvisoryThreshold {
        rule: AdvisoryRule::SoilAlkaline,
        reading: Reading::Ph,
        bound: Bound::Above(7.8),
    },
    AdvisoryThreshold {
        rule: AdvisoryRule::OrganicMatterLow,
        reading: Reading::OrganicMatter,
        bound: Bound::Below(1.5),
    },
];

/// Scores a soil sample on a 1-100 scale.
///
/// # Errors
///
/// Returns [`EstimatorError::InvalidInput`] if any reading is not finite or
/// `ph` is outside 0-14. Negative nutrient readings are scored as-is.
pub fn score(sample: &SoilSample, constants: &SoilConstants) -> Result<SoilScore, EstimatorError> {
    validate(sample)?;

    let mut raw = constants.baseline;
    for term in constants.terms {
        raw += term.adjustment(sample.reading(term.reading));
    }
    raw += constants.ph_band.adjustment(sample.ph);

    let score = round_half_up(raw.clamp(constants.min_score, constants.max_score)) as u8;

    Ok(SoilScore {
        score,
        advisories: recommend(sample),
    })
}

/// Evaluates the fertilizer rule table against a sample.
///
/// Pure threshold check, no validation. The result is never empty.
pub fn recommend(sample: &SoilSample) -> Vec<Advisory> {
    let mut advisories: Vec<Advisory> = ADVISORY_THRESHOLDS
        .iter()
        .filter(|threshold| threshold.bound.holds(sample.reading(threshold.reading)))
        .map(|threshold| Advisory::from(threshold.rule))
        .collect();

    if advisories.is_empty() {
        advisories.push(Advisory::from(AdvisoryRule::Balanced));
    }

    advisories
}

fn validate(sample: &SoilSample) -> Result<(), EstimatorError> {
    ensure_finite("nitrogen", sample.nitrogen)?;
    ensure_finite("phosphorus", sample.phosphorus)?;
    ensure_finite("potassium", sample.potassium)?;
    ensure_finite("organic_matter", sample.organic_matter)?;
    ensure_ph("ph", sample.ph)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets::SoilPreset;

    fn rules(advisories: &[Advisory]) -> Vec<AdvisoryRule> {
        advisories.iter().map(|a| a.rule).collect()
    }

    #[test]
    fn test_good_ph_band_with_low_organic_matter() {
        let sample = SoilSample::new(40.0, 18.0, 120.0, 6.3, 1.0);
        let constants = SoilPreset::NutrientBalance.constants();

        let result = score(&sample, &constants).unwrap();

        // 50 + 0 (N) + 2 (P) + 4 (K) + 10 (pH)
        assert_eq!(result.score, 66);
        assert_eq!(rules(&result.advisories), vec![AdvisoryRule::OrganicMatterLow]);
    }

    #[test]
    fn test_depleted_acidic_sample_clamps_to_floor() {
        let sample = SoilSample::new(0.0, 0.0, 0.0, 4.0, 0.0);

        for preset in [SoilPreset::NutrientBalance, SoilPreset::PhBand] {
            let result = score(&sample, &preset.constants()).unwrap();
            assert!(result.score >= 1);
        }

        // 50 - 20 - 10 - 15 - 8 = -3
        let result = score(&sample, &SoilPreset::NutrientBalance.constants()).unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(
            rules(&result.advisories),
            vec![
                AdvisoryRule::NitrogenLow,
                AdvisoryRule::PhosphorusLow,
                AdvisoryRule::PotassiumLow,
                AdvisoryRule::SoilAcidic,
                AdvisoryRule::OrganicMatterLow,
            ]
        );
    }

    #[test]
    fn test_negative_readings_clamp_to_one() {
        let sample = SoilSample::new(-1e6, -1e6, -1e6, 4.0, -1e6);

        for preset in [SoilPreset::NutrientBalance, SoilPreset::PhBand] {
            assert_eq!(score(&sample, &preset.constants()).unwrap().score, 1);
        }
    }

    #[test]
    fn test_huge_readings_clamp_to_hundred() {
        let sample = SoilSample::new(1e9, 1e9, 1e9, 6.8, 1e9);

        let nutrient = score(&sample, &SoilPreset::NutrientBalance.constants()).unwrap();
        let ph_band = score(&sample, &SoilPreset::PhBand.constants()).unwrap();

        // 50 + 20 + 15 + 15 + 10
        assert_eq!(nutrient.score, 100);
        // 50 + 20 + 20 + 10
        assert_eq!(ph_band.score, 100);
    }

    #[test]
    fn test_ph_band_preset() {
        let sample = SoilSample::new(40.0, 18.0, 120.0, 6.3, 1.0);

        let result = score(&sample, &SoilPreset::PhBand.constants()).unwrap();

        // 50 + 20 (pH) + round(3.33) (OM) + round(4.0) (N)
        assert_eq!(result.score, 77);
    }

    #[test]
    fn test_alkaline_penalty_differs_from_acidic() {
        let constants = SoilPreset::NutrientBalance.constants();
        let acidic = SoilSample::new(40.0, 15.0, 100.0, 5.9, 2.0);
        let alkaline = SoilSample { ph: 7.6, ..acidic };

        assert_eq!(score(&acidic, &constants).unwrap().score, 42);
        assert_eq!(score(&alkaline, &constants).unwrap().score, 45);
    }

    #[test]
    fn test_invalid_ph_is_rejected() {
        let constants = SoilPreset::NutrientBalance.constants();

        let err = score(&SoilSample::new(40.0, 18.0, 120.0, 14.1, 2.0), &constants).unwrap_err();
        assert_eq!(err.field(), "ph");

        let err = score(&SoilSample::new(f64::NAN, 18.0, 120.0, 7.0, 2.0), &constants).unwrap_err();
        assert_eq!(err.field(), "nitrogen");
    }

    #[test]
    fn test_recommend_balanced_fallback() {
        let sample = SoilSample::new(45.0, 20.0, 150.0, 6.8, 2.5);

        let advisories = recommend(&sample);

        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].rule, AdvisoryRule::Balanced);
        assert_eq!(advisories[0].text, AdvisoryRule::Balanced.text());
    }

    #[test]
    fn test_recommend_alkaline_order() {
        let sample = SoilSample::new(10.0, 20.0, 150.0, 8.2, 1.0);

        assert_eq!(
            rules(&recommend(&sample)),
            vec![
                AdvisoryRule::NitrogenLow,
                AdvisoryRule::SoilAlkaline,
                AdvisoryRule::OrganicMatterLow,
            ]
        );
    }

    #[test]
    fn test_fallback_appears_iff_no_rule_fires() {
        let readings = [0.0, 14.9, 15.0, 19.9, 20.0, 119.0, 120.0];
        let phs = [4.0, 5.5, 6.5, 7.8, 7.9];

        for n in readings {
            for p in readings {
                for ph in phs {
                    let sample = SoilSample::new(n, p, 130.0, ph, 2.0);
                    let advisories = recommend(&sample);
                    let any_fired = ADVISORY_THRESHOLDS
                        .iter()
                        .any(|t| t.bound.holds(sample.reading(t.reading)));
                    let has_fallback = advisories.iter().any(|a| a.rule == AdvisoryRule::Balanced);

                    assert!(!advisories.is_empty());
                    assert_eq!(has_fallback, !any_fired);
                }
            }
        }
    }
}
