//! Yield estimation.
//!
//! An estimate is the crop's base yield multiplied by a set of independent
//! factors, each close to 1.0:
//!
//! | factor        | driven by                           |
//! |---------------|-------------------------------------|
//! | soil          | soil category                       |
//! | rainfall      | saturating `tanh` of rainfall       |
//! | temperature   | distance from the optimum           |
//! | irrigation    | irrigation level, capped            |
//! | fertility     | pH and organic carbon, if supplied  |
//! | variety       | crop name substring, preset-driven  |
//! | weather       | injected jitter sample              |
//! | small area    | plots under the area threshold      |
//!
//! The per-hectare result is clamped to the preset's yield band and the total
//! is derived from it without rounding.

use crate::domain::entities::{Confidence, YieldEstimate, YieldFactors, YieldInputs};
use crate::domain::error::{EstimatorError, ensure_finite, ensure_ph};
use crate::domain::jitter::JitterSource;
use crate::domain::presets::YieldConstants;

const LOW_RAINFALL_MM: f64 = 400.0;
const HIGH_RAINFALL_MM: f64 = 1000.0;
const COOL_TEMPERATURE_C: f64 = 20.0;
const HOT_TEMPERATURE_C: f64 = 35.0;
const LIMING_PH: f64 = 6.0;
const LOW_ORGANIC_CARBON: f64 = 1.2;

/// Estimates yield for one field.
///
/// Draws exactly one sample from `jitter`.
///
/// # Errors
///
/// Returns [`EstimatorError::InvalidInput`] if:
/// - `area` is not a positive finite number
/// - `rainfall`, `temperature`, `organic_carbon` or `prior_yield` is not finite
/// - `soil_ph` is outside 0-14
///
/// Unknown crops and soil types fall back to the preset defaults.
pub fn estimate<J: JitterSource + ?Sized>(
    inputs: &YieldInputs,
    constants: &YieldConstants,
    jitter: &mut J,
) -> Result<YieldEstimate, EstimatorError> {
    let area = ensure_finite("area", inputs.area)?;
    if area <= 0.0 {
        return Err(EstimatorError::invalid(
            "area",
            format!("area must be greater than 0 hectares, got {area}"),
        ));
    }
    let rainfall = ensure_finite("rainfall", inputs.rainfall)?;
    let temperature = ensure_finite("temperature", inputs.temperature)?;
    let soil_ph = inputs
        .soil_ph
        .map(|ph| ensure_ph("soil_ph", ph))
        .transpose()?;
    let organic_carbon = inputs
        .organic_carbon
        .map(|oc| ensure_finite("organic_carbon", oc))
        .transpose()?;
    let prior_yield = inputs
        .prior_yield
        .map(|y| ensure_finite("prior_yield", y))
        .transpose()?;

    let base_yield = prior_yield
        .filter(|y| *y > 0.0)
        .unwrap_or_else(|| constants.base_yield(&inputs.crop));

    let factors = YieldFactors {
        base_yield,
        soil: constants.soil_factor(inputs.soil_type),
        rainfall: constants.rainfall.factor(rainfall),
        temperature: constants.temperature.factor(temperature),
        irrigation: constants.irrigation.factor(inputs.irrigation_level),
        fertility: constants.fertility.factor(soil_ph, organic_carbon),
        variety: constants.variety_factor(&inputs.crop),
        weather_jitter: constants.jitter.multiplier(jitter.sample()),
        small_area: constants.small_area.factor(area),
    };

    let yield_per_hectare =
        (base_yield * factors.product()).clamp(constants.min_yield, constants.max_yield);
    let total_yield = yield_per_hectare * area;

    let mut recommendations = vec![constants.bands.advisory(yield_per_hectare).to_string()];
    recommendations.extend(condition_advisories(
        rainfall,
        temperature,
        soil_ph,
        organic_carbon,
    ));

    let confidence = if yield_per_hectare > constants.confidence_threshold {
        Confidence::Good
    } else {
        Confidence::Moderate
    };

    Ok(YieldEstimate {
        yield_per_hectare,
        total_yield,
        recommendations,
        confidence,
        factors,
    })
}

/// Field-condition advisories appended after the yield-band sentence.
fn condition_advisories(
    rainfall: f64,
    temperature: f64,
    soil_ph: Option<f64>,
    organic_carbon: Option<f64>,
) -> Vec<String> {
    let mut advisories = Vec::new();

    if rainfall < LOW_RAINFALL_MM {
        advisories.push(format!(
            "Low rainfall ({rainfall}mm): plan additional irrigation or drip systems."
        ));
    } else if rainfall > HIGH_RAINFALL_MM {
        advisories.push(format!(
            "High rainfall ({rainfall}mm): ensure proper drainage to prevent waterlogging."
        ));
    }

    if temperature < COOL_TEMPERATURE_C {
        advisories.push(format!(
            "Cool temperature ({temperature}°C): consider cold-tolerant varieties or greenhouse cultivation."
        ));
    } else if temperature > HOT_TEMPERATURE_C {
        advisories.push(format!(
            "High temperature ({temperature}°C): use shade nets and heat-resistant varieties."
        ));
    }

    if soil_ph.is_some_and(|ph| ph < LIMING_PH) {
        advisories.push("Apply lime to raise pH towards 6.5-7.0.".to_string());
    }

    if organic_carbon.is_some_and(|oc| oc < LOW_ORGANIC_CARBON) {
        advisories.push("Add organic matter: compost/manure.".to_string());
    }

    advisories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SoilType;
    use crate::domain::jitter::{FixedJitter, MockJitterSource, SeededJitter};
    use crate::domain::presets::YieldPreset;
    use approx::assert_relative_eq;

    fn maize_field() -> YieldInputs {
        YieldInputs::new("maize", 2.0, SoilType::Loamy, 520.0, 26.0, 5)
    }

    fn neutral(constants: &YieldConstants) -> FixedJitter {
        FixedJitter::neutral(&constants.jitter)
    }

    #[test]
    fn test_maize_reference_estimate() {
        let constants = YieldPreset::Baseline.constants();
        let estimate = estimate(&maize_field(), &constants, &mut neutral(&constants)).unwrap();

        let expected = 5000.0 * 1.05 * ((520.0f64 / 800.0).tanh() * 1.2) * 0.98 * 0.9;
        assert_relative_eq!(estimate.yield_per_hectare, expected, epsilon = 1e-9);
        assert_relative_eq!(estimate.yield_per_hectare, 3176.54, epsilon = 0.01);
        assert_eq!(estimate.total_yield, estimate.yield_per_hectare * 2.0);
        assert_eq!(estimate.confidence, Confidence::Good);
        assert_eq!(
            estimate.recommendations,
            vec!["Maintain good agricultural practices for optimal yield.".to_string()]
        );
        assert_eq!(estimate.factors.fertility, None);
        assert_eq!(estimate.factors.variety, 1.0);
        assert_eq!(estimate.factors.weather_jitter, 1.0);
    }

    #[test]
    fn test_total_is_exact_product_of_per_hectare_and_area() {
        let constants = YieldPreset::Baseline.constants();
        let mut jitter = SeededJitter::from_seed(7);

        for area in [0.1, 0.39, 0.4, 1.0, 2.5, 13.37, 1e4] {
            let inputs = YieldInputs::new("rice", area, SoilType::Clay, 750.0, 29.0, 3);
            let estimate = estimate(&inputs, &constants, &mut jitter).unwrap();
            assert_eq!(estimate.total_yield, estimate.yield_per_hectare * area);
        }
    }

    #[test]
    fn test_per_hectare_stays_within_clamp_for_extreme_inputs() {
        let constants = YieldPreset::Varietal.constants();
        let mut jitter = SeededJitter::from_seed(99);

        let rainfalls = [-1e9, 0.0, 1.0, 520.0, 1e6, f64::MAX];
        let temperatures = [-273.0, 0.0, 25.0, 60.0, 1e9];
        for rainfall in rainfalls {
            for temperature in temperatures {
                let inputs = YieldInputs::new("maize", 0.2, SoilType::Sandy, rainfall, temperature, 50)
                    .with_soil_ph(Some(14.0))
                    .with_organic_carbon(Some(1e6))
                    .with_prior_yield(Some(1e12));
                let estimate = estimate(&inputs, &constants, &mut jitter).unwrap();

                assert!(estimate.yield_per_hectare >= constants.min_yield);
                assert!(estimate.yield_per_hectare <= constants.max_yield);
            }
        }
    }

    #[test]
    fn test_zero_rainfall_hits_lower_clamp() {
        let constants = YieldPreset::Baseline.constants();
        let inputs = YieldInputs::new("wheat", 1.0, SoilType::Loamy, 0.0, 25.0, 10);

        let estimate = estimate(&inputs, &constants, &mut neutral(&constants)).unwrap();

        assert_eq!(estimate.yield_per_hectare, 300.0);
        assert_eq!(estimate.confidence, Confidence::Moderate);
        assert_eq!(
            estimate.recommendations[0],
            "Consider improving soil nutrients and irrigation."
        );
        assert!(estimate.recommendations[1].starts_with("Low rainfall"));
    }

    #[test]
    fn test_non_positive_area_is_rejected() {
        let constants = YieldPreset::Baseline.constants();

        for area in [0.0, -1.0, f64::NAN] {
            let inputs = YieldInputs::new("wheat", area, SoilType::Loamy, 500.0, 25.0, 5);
            let err = estimate(&inputs, &constants, &mut neutral(&constants)).unwrap_err();
            assert_eq!(err.field(), "area");
        }
    }

    #[test]
    fn test_out_of_range_ph_is_rejected() {
        let constants = YieldPreset::Baseline.constants();
        let inputs = maize_field().with_soil_ph(Some(15.2));

        let err = estimate(&inputs, &constants, &mut neutral(&constants)).unwrap_err();

        assert_eq!(err.field(), "soil_ph");
    }

    #[test]
    fn test_unknown_crop_and_soil_fall_back_to_defaults() {
        let constants = YieldPreset::Baseline.constants();
        let inputs = YieldInputs::new("", 1.0, SoilType::from_label("volcanic"), 600.0, 25.0, 0);

        let estimate = estimate(&inputs, &constants, &mut neutral(&constants)).unwrap();

        assert_eq!(estimate.factors.base_yield, 2800.0);
        assert_eq!(estimate.factors.soil, 0.95);
    }

    #[test]
    fn test_small_area_correction() {
        let constants = YieldPreset::Baseline.constants();
        let small = YieldInputs::new("sorghum", 0.3, SoilType::Other, 600.0, 25.0, 0);
        let large = YieldInputs { area: 1.0, ..small.clone() };

        let small_estimate = estimate(&small, &constants, &mut neutral(&constants)).unwrap();
        let large_estimate = estimate(&large, &constants, &mut neutral(&constants)).unwrap();

        assert_eq!(small_estimate.factors.small_area, 0.95);
        assert_eq!(large_estimate.factors.small_area, 1.0);
        assert_relative_eq!(large_estimate.yield_per_hectare, 1216.437, epsilon = 0.001);
        assert_relative_eq!(
            small_estimate.yield_per_hectare,
            large_estimate.yield_per_hectare * 0.95,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_prior_yield_replaces_base() {
        let constants = YieldPreset::Baseline.constants();
        let inputs = maize_field().with_prior_yield(Some(2600.0));

        let with_prior = estimate(&inputs, &constants, &mut neutral(&constants)).unwrap();

        assert_eq!(with_prior.factors.base_yield, 2600.0);

        let ignored = maize_field().with_prior_yield(Some(0.0));
        let without_prior = estimate(&ignored, &constants, &mut neutral(&constants)).unwrap();
        assert_eq!(without_prior.factors.base_yield, 5000.0);
    }

    #[test]
    fn test_fertility_and_condition_advisories() {
        let constants = YieldPreset::Baseline.constants();
        let inputs = YieldInputs::new("wheat", 1.0, SoilType::Loamy, 1200.0, 38.0, 5)
            .with_soil_ph(Some(5.4))
            .with_organic_carbon(Some(0.9));

        let estimate = estimate(&inputs, &constants, &mut neutral(&constants)).unwrap();

        // 0.9 * (1 + (7 - 1.1) / 10) = 1.431
        assert_relative_eq!(estimate.factors.fertility.unwrap(), 1.431, epsilon = 1e-9);
        assert_eq!(estimate.recommendations.len(), 5);
        assert!(estimate.recommendations[1].starts_with("High rainfall"));
        assert!(estimate.recommendations[2].starts_with("High temperature"));
        assert_eq!(estimate.recommendations[3], "Apply lime to raise pH towards 6.5-7.0.");
        assert_eq!(estimate.recommendations[4], "Add organic matter: compost/manure.");
    }

    #[test]
    fn test_varietal_preset_applies_variety_bonus() {
        let baseline = YieldPreset::Baseline.constants();
        let varietal = YieldPreset::Varietal.constants();

        let plain = estimate(&maize_field(), &baseline, &mut neutral(&baseline)).unwrap();
        let bonus = estimate(&maize_field(), &varietal, &mut neutral(&varietal)).unwrap();

        assert_relative_eq!(
            bonus.yield_per_hectare,
            plain.yield_per_hectare * 1.05,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_same_seed_gives_same_estimate() {
        let constants = YieldPreset::Baseline.constants();

        let first = estimate(&maize_field(), &constants, &mut SeededJitter::from_seed(2024)).unwrap();
        let second = estimate(&maize_field(), &constants, &mut SeededJitter::from_seed(2024)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_jitter_is_drawn_once_and_bounded() {
        let constants = YieldPreset::Baseline.constants();
        let mut jitter = MockJitterSource::new();
        jitter.expect_sample().times(1).return_const(1.0);

        let estimate = estimate(&maize_field(), &constants, &mut jitter).unwrap();

        assert_relative_eq!(estimate.factors.weather_jitter, 1.072, epsilon = 1e-12);
    }
}
