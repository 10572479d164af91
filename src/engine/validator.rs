//! Measurement validator
//!
//! Turns raw strings into an [`InputVector`]. Fields are checked in canonical
//! order and the first problem wins: later fields are never looked at once an
//! earlier one fails. Per field the checks run missing, then parse, then range.

use crate::types::{FeatureSpec, InputVector, RawMeasurements, NUM_FEATURES};

use super::error::ValidationError;
use super::schema::FeatureSchema;

/// Fail-fast validator for raw measurements.
pub struct Validator;

impl Validator {
    /// Validate all twelve measurements.
    pub fn validate(raw: &RawMeasurements) -> Result<InputVector, ValidationError> {
        let mut values = [0.0_f64; NUM_FEATURES];

        for &id in FeatureSchema::canonical_order() {
            let spec = FeatureSchema::spec(id);
            values[id.index()] = Self::validate_field(spec, raw.get(id))?;
        }

        Ok(InputVector::from_validated(values))
    }

    /// Validate one raw value against its spec.
    pub fn validate_field(spec: &FeatureSpec, raw: Option<&str>) -> Result<f64, ValidationError> {
        let (raw, trimmed) = match raw {
            Some(r) if !r.trim().is_empty() => (r, r.trim()),
            _ => return Err(ValidationError::missing(spec)),
        };

        let value: f64 = trimmed
            .parse()
            .map_err(|_| ValidationError::invalid(spec, raw))?;

        Self::check_range(spec, trimmed, value)
    }

    /// Inclusive bounds check on an already parsed value. `raw` is the input
    /// text quoted in the error. NaN and infinities are out of range.
    pub fn check_range(spec: &FeatureSpec, raw: &str, value: f64) -> Result<f64, ValidationError> {
        if spec.contains(value) {
            Ok(value)
        } else {
            Err(ValidationError::out_of_range(spec, raw, value))
        }
    }
}
