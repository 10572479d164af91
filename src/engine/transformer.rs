//! Preprocessing transform applied before inference

use crate::config::defaults::LOG_EPSILON;
use crate::types::{InputVector, TransformedVector, NUM_FEATURES};

/// Elementwise `log10(x + ε)`.
pub struct Transformer;

impl Transformer {
    pub fn transform(input: &InputVector) -> TransformedVector {
        let mut out = [0.0_f64; NUM_FEATURES];
        for (slot, &x) in out.iter_mut().zip(input.values()) {
            *slot = Self::transform_value(x);
        }
        TransformedVector::from_values(out)
    }

    pub fn transform_value(x: f64) -> f64 {
        (x + LOG_EPSILON).log10()
    }
}
