//! Feature schema: the static registry of the twelve soil measurements
//!
//! Ranges are derived from the training dataset and agricultural standards,
//! with some buffer around the observed values for edge cases.

use crate::types::{FeatureId, FeatureSpec, UnknownFeature, NUM_FEATURES};

/// Plausible ranges, indexed by [`FeatureId::index`].
static FEATURE_SPECS: [FeatureSpec; NUM_FEATURES] = [
    FeatureSpec { id: FeatureId::N, label: "Nitrogen (N)", min: 1.0, max: 500.0, unit: "mg/kg", typical_range: "6-383" },
    FeatureSpec { id: FeatureId::P, label: "Phosphorus (P)", min: 0.1, max: 150.0, unit: "mg/kg", typical_range: "3-125" },
    FeatureSpec { id: FeatureId::K, label: "Potassium (K)", min: 5.0, max: 1000.0, unit: "mg/kg", typical_range: "11-887" },
    FeatureSpec { id: FeatureId::Ph, label: "pH (0-14)", min: 0.5, max: 14.0, unit: "", typical_range: "0.9-11.2" },
    FeatureSpec { id: FeatureId::Ec, label: "Electrical Conductivity (EC)", min: 0.05, max: 3.0, unit: "dS/m", typical_range: "0.1-0.95" },
    FeatureSpec { id: FeatureId::Oc, label: "Organic Carbon (OC)", min: 0.05, max: 30.0, unit: "%", typical_range: "0.1-24" },
    FeatureSpec { id: FeatureId::S, label: "Sulfur (S)", min: 0.5, max: 50.0, unit: "mg/kg", typical_range: "0.6-31" },
    FeatureSpec { id: FeatureId::Zn, label: "Zinc (Zn)", min: 0.05, max: 50.0, unit: "mg/kg", typical_range: "0.07-42" },
    FeatureSpec { id: FeatureId::Fe, label: "Iron (Fe)", min: 0.1, max: 50.0, unit: "mg/kg", typical_range: "0.21-44" },
    FeatureSpec { id: FeatureId::Cu, label: "Copper (Cu)", min: 0.05, max: 5.0, unit: "mg/kg", typical_range: "0.09-3" },
    FeatureSpec { id: FeatureId::Mn, label: "Manganese (Mn)", min: 0.1, max: 40.0, unit: "mg/kg", typical_range: "0.11-31" },
    FeatureSpec { id: FeatureId::B, label: "Boron (B)", min: 0.05, max: 5.0, unit: "mg/kg", typical_range: "0.06-2.8" },
];

/// Read-only registry of measurement specs.
pub struct FeatureSchema;

impl FeatureSchema {
    /// Spec for a known identifier. Total over [`FeatureId`].
    pub fn spec(id: FeatureId) -> &'static FeatureSpec {
        &FEATURE_SPECS[id.index()]
    }

    /// Spec for a wire identifier such as `"pH"`.
    pub fn lookup(id: &str) -> Result<&'static FeatureSpec, UnknownFeature> {
        id.parse::<FeatureId>().map(Self::spec)
    }

    /// The fixed training order of the twelve identifiers.
    pub fn canonical_order() -> &'static [FeatureId; NUM_FEATURES] {
        &FeatureId::ALL
    }

    /// All specs in canonical order.
    pub fn specs() -> &'static [FeatureSpec; NUM_FEATURES] {
        &FEATURE_SPECS
    }
}
