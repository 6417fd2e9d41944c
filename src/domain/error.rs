//! Errors raised by the agronomic estimator.

/// The only hard failure the estimator produces.
///
/// Irregular but usable input (unknown crop, unknown soil type, missing
/// optional readings) never reaches this type; it falls back to the
/// documented defaults instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimatorError {
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl EstimatorError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }
}

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, EstimatorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EstimatorError::invalid(field, "must be a finite number"))
    }
}

/// pH must be finite and lie on the 0-14 scale.
pub(crate) fn ensure_ph(field: &'static str, value: f64) -> Result<f64, EstimatorError> {
    let value = ensure_finite(field, value)?;
    if (0.0..=14.0).contains(&value) {
        Ok(value)
    } else {
        Err(EstimatorError::invalid(
            field,
            format!("pH must be between 0 and 14, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite_rejects_nan() {
        assert!(ensure_finite("rainfall", f64::NAN).is_err());
        assert!(ensure_finite("rainfall", f64::INFINITY).is_err());
        assert_eq!(ensure_finite("rainfall", 12.5).unwrap(), 12.5);
    }

    #[test]
    fn test_ensure_ph_bounds() {
        assert!(ensure_ph("ph", 0.0).is_ok());
        assert!(ensure_ph("ph", 14.0).is_ok());
        assert!(ensure_ph("ph", -0.1).is_err());

        let err = ensure_ph("ph", 14.5).unwrap_err();
        assert_eq!(err.field(), "ph");
        assert!(err.to_string().contains("between 0 and 14"));
    }
}
