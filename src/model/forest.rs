//! Random forest inference over exported decision trees.
//!
//! Trees use the exporter's flat node-array layout: node `i` is a leaf when
//! `children_left[i] == -1`, otherwise samples go left when
//! `x[feature[i]] <= threshold[i]`. `value[i]` holds per-class weights.
//! The forest averages each tree's normalized leaf distribution and picks the
//! highest mean, first class on ties.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::InferenceFailure;
use crate::types::{FertilityClass, TransformedVector, NUM_FEATURES};

use super::FertilityModel;

/// Sentinel child index marking a leaf.
pub const TREE_LEAF: i64 = -1;

/// Structural problem in a tree or forest, found at load time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    #[error("tree has no nodes")]
    Empty,

    #[error("node arrays have different lengths: {0}")]
    LengthMismatch(String),

    #[error("node {node}: {reason}")]
    BadNode { node: usize, reason: String },
}

/// Raw node arrays as they appear in the artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArrays {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

/// A validated decision tree.
///
/// Every child index points strictly forward, so traversal always terminates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TreeArrays", into = "TreeArrays")]
pub struct DecisionTree {
    nodes: TreeArrays,
    n_outputs: usize,
}

impl DecisionTree {
    pub fn new(nodes: TreeArrays) -> Result<Self, TreeError> {
        let n = nodes.children_left.len();
        if n == 0 {
            return Err(TreeError::Empty);
        }
        let lengths = [
            nodes.children_right.len(),
            nodes.feature.len(),
            nodes.threshold.len(),
            nodes.value.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(TreeError::LengthMismatch(format!(
                "children_left={n}, children_right={}, feature={}, threshold={}, value={}",
                lengths[0], lengths[1], lengths[2], lengths[3]
            )));
        }

        let n_outputs = nodes.value[0].len();
        if n_outputs == 0 {
            return Err(TreeError::BadNode { node: 0, reason: "empty value row".into() });
        }

        for node in 0..n {
            let bad = |reason: String| TreeError::BadNode { node, reason };
            let left = nodes.children_left[node];
            let right = nodes.children_right[node];
            let row = &nodes.value[node];

            if row.len() != n_outputs {
                return Err(bad(format!("value row has {} entries, expected {n_outputs}", row.len())));
            }
            if row.iter().any(|w| !w.is_finite() || *w < 0.0) {
                return Err(bad("class weights must be finite and non-negative".into()));
            }

            if left == TREE_LEAF {
                if right != TREE_LEAF {
                    return Err(bad(format!("leaf has a right child {right}")));
                }
                continue;
            }

            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(bad(format!("child index {child} must be in ({node}, {n})")));
                }
            }
            let feature = nodes.feature[node];
            if feature < 0 || feature >= NUM_FEATURES as i64 {
                return Err(bad(format!("feature index {feature} outside 0..{NUM_FEATURES}")));
            }
            if !nodes.threshold[node].is_finite() {
                return Err(bad("split threshold must be finite".into()));
            }
        }

        Ok(Self { nodes, n_outputs })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.children_left.len()
    }

    /// Width of each leaf's class-weight row.
    pub fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    /// Index of the leaf reached by `x`.
    pub fn apply(&self, x: &[f64; NUM_FEATURES], tree: usize) -> Result<usize, InferenceFailure> {
        let oob = |node| InferenceFailure::NodeOutOfBounds { tree, node };
        let mut node = 0_usize;
        loop {
            let left = *self.nodes.children_left.get(node).ok_or_else(|| oob(node))?;
            if left == TREE_LEAF {
                return Ok(node);
            }
            let right = *self.nodes.children_right.get(node).ok_or_else(|| oob(node))?;
            let feature = *self.nodes.feature.get(node).ok_or_else(|| oob(node))?;
            let threshold = *self.nodes.threshold.get(node).ok_or_else(|| oob(node))?;
            let value = usize::try_from(feature)
                .ok()
                .and_then(|f| x.get(f))
                .ok_or_else(|| oob(node))?;

            // Split thresholds were fitted on float32 features
            let value = f64::from(*value as f32);
            let next = if value <= threshold { left } else { right };
            node = usize::try_from(next).map_err(|_| oob(node))?;
        }
    }

    /// Normalized class distribution at the leaf reached by `x`.
    pub fn predict_proba(&self, x: &[f64; NUM_FEATURES], tree: usize) -> Result<Vec<f64>, InferenceFailure> {
        let leaf = self.apply(x, tree)?;
        let row = self
            .nodes
            .value
            .get(leaf)
            .ok_or(InferenceFailure::NodeOutOfBounds { tree, node: leaf })?;
        let total: f64 = row.iter().sum();
        if total <= 0.0 {
            return Err(InferenceFailure::EmptyLeaf { tree, node: leaf });
        }
        Ok(row.iter().map(|w| w / total).collect())
    }
}

impl TryFrom<TreeArrays> for DecisionTree {
    type Error = TreeError;

    fn try_from(nodes: TreeArrays) -> Result<Self, Self::Error> {
        Self::new(nodes)
    }
}

impl From<DecisionTree> for TreeArrays {
    fn from(tree: DecisionTree) -> Self {
        tree.nodes
    }
}

/// Ensemble of decision trees voting by averaged leaf distributions.
#[derive(Debug, Clone)]
pub struct RandomForest {
    /// Class emitted for each column of a leaf's value row
    classes: Vec<FertilityClass>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Assemble a forest; every tree must emit one weight per class.
    pub fn new(classes: Vec<FertilityClass>, trees: Vec<DecisionTree>) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("forest has no classes".to_string());
        }
        if trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in trees.iter().enumerate() {
            if tree.n_outputs() != classes.len() {
                return Err(format!(
                    "tree {i} emits {} class weights, forest has {} classes",
                    tree.n_outputs(),
                    classes.len()
                ));
            }
        }
        Ok(Self { classes, trees })
    }

    pub fn classes(&self) -> &[FertilityClass] {
        &self.classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn total_nodes(&self) -> usize {
        self.trees.iter().map(DecisionTree::node_count).sum()
    }

    /// Mean class distribution across all trees, aligned with [`Self::classes`].
    pub fn predict_proba(&self, x: &[f64; NUM_FEATURES]) -> Result<Vec<f64>, InferenceFailure> {
        let mut mean = vec![0.0_f64; self.classes.len()];
        for (i, tree) in self.trees.iter().enumerate() {
            let proba = tree.predict_proba(x, i)?;
            if proba.len() != mean.len() {
                return Err(InferenceFailure::VoteWidthMismatch {
                    got: proba.len(),
                    expected: mean.len(),
                });
            }
            for (acc, p) in mean.iter_mut().zip(&proba) {
                *acc += p;
            }
        }
        let n = self.trees.len() as f64;
        for acc in &mut mean {
            *acc /= n;
        }
        Ok(mean)
    }
}

impl FertilityModel for RandomForest {
    fn predict(&self, features: &TransformedVector) -> Result<FertilityClass, InferenceFailure> {
        let proba = self.predict_proba(features.values())?;

        // argmax, keeping the first index on ties
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in proba.iter().enumerate() {
            if best.map_or(true, |(_, b)| p > b) {
                best = Some((i, p));
            }
        }
        let (idx, _) = best.ok_or(InferenceFailure::NoVote)?;
        self.classes.get(idx).copied().ok_or(InferenceFailure::NoVote)
    }

    fn describe(&self) -> String {
        format!(
            "random forest: {} trees, {} nodes, classes {:?}",
            self.n_trees(),
            self.total_nodes(),
            self.classes.iter().map(|c| c.id()).collect::<Vec<_>>()
        )
    }
}
