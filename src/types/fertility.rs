//! Fertility classes and remediation plans

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal fertility outcome produced by the classifier.
///
/// Serialized as its integer class id (`0`, `1`, `2`), matching the labels the
/// model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum FertilityClass {
    LessFertile = 0,
    Fertile = 1,
    HighlyFertile = 2,
}

impl FertilityClass {
    pub const ALL: [FertilityClass; 3] = [
        FertilityClass::LessFertile,
        FertilityClass::Fertile,
        FertilityClass::HighlyFertile,
    ];

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            FertilityClass::LessFertile => "Less Fertile",
            FertilityClass::Fertile => "Fertile",
            FertilityClass::HighlyFertile => "Highly Fertile",
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(FertilityClass::LessFertile),
            1 => Some(FertilityClass::Fertile),
            2 => Some(FertilityClass::HighlyFertile),
            _ => None,
        }
    }
}

impl fmt::Display for FertilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<FertilityClass> for u8 {
    fn from(class: FertilityClass) -> Self {
        class.id()
    }
}

impl TryFrom<u8> for FertilityClass {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown fertility class id {}", id))
    }
}

/// Canned remediation plan attached to a fertility class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecommendationRecord {
    pub title: &'static str,
    pub description: &'static str,
    /// Ordered actions, never empty
    pub actions: &'static [&'static str],
}
