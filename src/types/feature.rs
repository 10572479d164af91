//! Soil measurement identifiers and feature vectors
//!
//! The twelve chemistry measurements are addressed through [`FeatureId`], whose
//! discriminants fix the canonical column order the classifier was trained on.
//! Vectors are fixed-arity arrays indexed by that enum, never loose maps.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of soil measurements fed to the classifier.
pub const NUM_FEATURES: usize = 12;

/// One of the twelve soil chemistry measurements.
///
/// Declaration order is the canonical training order. Do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureId {
    /// Nitrogen
    N,
    /// Phosphorus
    P,
    /// Potassium
    K,
    /// Soil acidity
    Ph,
    /// Electrical conductivity
    Ec,
    /// Organic carbon
    Oc,
    /// Sulfur
    S,
    /// Zinc
    Zn,
    /// Iron
    Fe,
    /// Copper
    Cu,
    /// Manganese
    Mn,
    /// Boron
    B,
}

impl FeatureId {
    /// All identifiers in canonical order.
    pub const ALL: [FeatureId; NUM_FEATURES] = [
        FeatureId::N,
        FeatureId::P,
        FeatureId::K,
        FeatureId::Ph,
        FeatureId::Ec,
        FeatureId::Oc,
        FeatureId::S,
        FeatureId::Zn,
        FeatureId::Fe,
        FeatureId::Cu,
        FeatureId::Mn,
        FeatureId::B,
    ];

    /// Column position in a feature vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire identifier used by form fields, JSON keys and the model artifact.
    pub const fn as_str(self) -> &'static str {
        match self {
            FeatureId::N => "N",
            FeatureId::P => "P",
            FeatureId::K => "K",
            FeatureId::Ph => "pH",
            FeatureId::Ec => "EC",
            FeatureId::Oc => "OC",
            FeatureId::S => "S",
            FeatureId::Zn => "Zn",
            FeatureId::Fe => "Fe",
            FeatureId::Cu => "Cu",
            FeatureId::Mn => "Mn",
            FeatureId::B => "B",
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FeatureId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Identifier that is not one of the twelve soil measurements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown soil feature identifier: {0}")]
pub struct UnknownFeature(pub String);

impl FromStr for FeatureId {
    type Err = UnknownFeature;

    /// Exact, case-sensitive match on the wire identifier (`pH`, not `PH`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

/// Plausible-range description of a single measurement.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct FeatureSpec {
    pub id: FeatureId,
    /// User-facing label, e.g. "Potassium (K)"
    pub label: &'static str,
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
    /// Measurement unit, empty for dimensionless values (pH)
    pub unit: &'static str,
    /// Range observed in the training dataset, shown in error messages only
    pub typical_range: &'static str,
}

impl FeatureSpec {
    /// Whether `value` lies inside `[min, max]`. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Unit with a leading space, or empty, for appending to a number.
    pub fn unit_suffix(&self) -> String {
        unit_suffix(self.unit)
    }
}

/// `" mg/kg"` for `"mg/kg"`, empty for an empty unit.
pub fn unit_suffix(unit: &str) -> String {
    if unit.is_empty() {
        String::new()
    } else {
        format!(" {}", unit)
    }
}

// ============================================================================
// Feature Vectors
// ============================================================================

/// Validated measurements in canonical order, each inside its plausible range.
///
/// Only produced by [`crate::engine::Validator`], so holding one is proof the
/// bounds were checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputVector([f64; NUM_FEATURES]);

impl InputVector {
    pub(crate) const fn from_validated(values: [f64; NUM_FEATURES]) -> Self {
        Self(values)
    }

    pub fn get(&self, id: FeatureId) -> f64 {
        self.0[id.index()]
    }

    pub fn values(&self) -> &[f64; NUM_FEATURES] {
        &self.0
    }

    /// `(identifier, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, f64)> + '_ {
        FeatureId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

/// Serialized as a JSON object keyed by wire identifier, canonical key order.
impl Serialize for InputVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(NUM_FEATURES))?;
        for (id, value) in self.iter() {
            map.serialize_entry(id.as_str(), &value)?;
        }
        map.end()
    }
}

/// Model-space features: an [`InputVector`] after the preprocessing transform.
///
/// Same order and cardinality; no longer bounded by the physical ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformedVector([f64; NUM_FEATURES]);

impl TransformedVector {
    pub const fn from_values(values: [f64; NUM_FEATURES]) -> Self {
        Self(values)
    }

    pub fn get(&self, id: FeatureId) -> f64 {
        self.0[id.index()]
    }

    pub fn values(&self) -> &[f64; NUM_FEATURES] {
        &self.0
    }
}
