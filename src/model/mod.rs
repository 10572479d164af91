//! Pre-trained fertility classifier models
//!
//! ## Architecture
//! - `forest`: random forest inference over exported decision trees
//! - `artifact`: JSON artifact loading and compatibility checks
//!
//! The artifact is loaded once at start-up and never mutated afterwards, so
//! a loaded model is shared across requests without locking.

pub mod artifact;
pub mod forest;

pub use artifact::{load_from_disk, load_optional, ArtifactError, ArtifactMetadata, ForestArtifact};
pub use forest::{DecisionTree, RandomForest, TreeArrays, TreeError};

use crate::engine::InferenceFailure;
use crate::types::{FertilityClass, TransformedVector};

/// A loaded classifier mapping model-space features to a fertility class.
pub trait FertilityModel: Send + Sync + std::fmt::Debug {
    fn predict(&self, features: &TransformedVector) -> Result<FertilityClass, InferenceFailure>;

    /// One-line summary for logs and the `check-model` command.
    fn describe(&self) -> String;
}
