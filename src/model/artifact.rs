//! Classifier artifact loading.
//!
//! The training pipeline exports its random forest as JSON. The artifact is
//! read once at start-up and checked for compatibility with this build's
//! feature schema before any request is served.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::defaults::ARTIFACT_FORMAT_VERSION;
use crate::types::{FeatureId, FertilityClass, NUM_FEATURES};

use super::forest::{DecisionTree, RandomForest};

/// Model family this loader understands.
pub const MODEL_TYPE_RANDOM_FOREST: &str = "random_forest";

/// Transform names an exporter may record in [`ArtifactMetadata::transform`].
pub const TRANSFORM_LOG10_EPSILON: &str = "log10_epsilon";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not found at {0}")]
    Missing(PathBuf),

    #[error("model artifact I/O error ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("model artifact parse error ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("incompatible model artifact: {0}")]
    Incompatible(String),
}

/// On-disk artifact layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    /// Layout version for forward compatibility.
    pub format_version: u32,
    pub model_type: String,
    pub n_features: usize,
    /// Column names in training order, checked against the schema when present.
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    /// Class label for each column of a leaf's value row.
    pub classes: Vec<i64>,
    pub trees: Vec<DecisionTree>,
    #[serde(default)]
    pub metadata: ArtifactMetadata,
}

/// Provenance recorded by the exporter. Informational only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub trained_at: Option<String>,
    /// Preprocessing the training data went through, e.g. `"log10"`.
    #[serde(default)]
    pub transform: Option<String>,
}

impl ForestArtifact {
    /// Check compatibility and build the in-memory forest.
    pub fn into_forest(self) -> Result<RandomForest, ArtifactError> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactError::Incompatible(format!(
                "format_version {} is not supported (expected {})",
                self.format_version, ARTIFACT_FORMAT_VERSION
            )));
        }
        if self.model_type != MODEL_TYPE_RANDOM_FOREST {
            return Err(ArtifactError::Incompatible(format!(
                "model_type '{}' is not supported (expected '{}')",
                self.model_type, MODEL_TYPE_RANDOM_FOREST
            )));
        }
        if self.n_features != NUM_FEATURES {
            return Err(ArtifactError::Incompatible(format!(
                "artifact expects {} features, schema has {}",
                self.n_features, NUM_FEATURES
            )));
        }
        if let Some(names) = &self.feature_names {
            let expected: Vec<&str> = FeatureId::ALL.iter().map(|id| id.as_str()).collect();
            if names.iter().map(String::as_str).ne(expected.iter().copied()) {
                return Err(ArtifactError::Incompatible(format!(
                    "feature order {:?} does not match {:?}",
                    names, expected
                )));
            }
        }

        let mut classes = Vec::with_capacity(self.classes.len());
        for &label in &self.classes {
            let class = u8::try_from(label)
                .ok()
                .and_then(FertilityClass::from_id)
                .ok_or_else(|| ArtifactError::Incompatible(format!("unknown class label {label}")))?;
            if classes.contains(&class) {
                return Err(ArtifactError::Incompatible(format!("duplicate class label {label}")));
            }
            classes.push(class);
        }

        RandomForest::new(classes, self.trees).map_err(ArtifactError::Incompatible)
    }
}

/// Load and validate an artifact.
pub fn load_from_disk(path: &Path) -> Result<(RandomForest, ArtifactMetadata), ArtifactError> {
    let data = std::fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ArtifactError::Missing(path.to_path_buf())
        } else {
            ArtifactError::Io { path: path.to_path_buf(), source }
        }
    })?;
    let artifact: ForestArtifact = serde_json::from_slice(&data).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let metadata = artifact.metadata.clone();
    let forest = artifact.into_forest()?;
    Ok((forest, metadata))
}

/// Start-up load: a missing file means fallback mode unless `required`.
///
/// An artifact that exists but cannot be read or is incompatible is always an
/// error.
pub fn load_optional(path: &Path, required: bool) -> Result<Option<RandomForest>, ArtifactError> {
    match load_from_disk(path) {
        Ok((forest, metadata)) => {
            info!(
                path = %path.display(),
                trees = forest.n_trees(),
                nodes = forest.total_nodes(),
                source = metadata.source.as_deref().unwrap_or("unknown"),
                "Loaded classifier artifact"
            );
            check_transform(&metadata);
            Ok(Some(forest))
        }
        Err(ArtifactError::Missing(p)) if !required => {
            warn!(path = %p.display(), "No classifier artifact found, serving fallback predictions");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Warn when the recorded training transform differs from the serving one.
fn check_transform(metadata: &ArtifactMetadata) {
    match metadata.transform.as_deref() {
        None => {}
        Some(TRANSFORM_LOG10_EPSILON) => {}
        Some(other) => warn!(
            training_transform = other,
            serving_transform = TRANSFORM_LOG10_EPSILON,
            "Artifact was trained with a different preprocessing transform"
        ),
    }
}
