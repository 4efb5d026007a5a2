use ndarray::ArrayView1;
use serde::Deserialize;

use crate::error::{ModelErr, Result};

/// Node index marking a leaf in the flat child arrays.
const LEAF: i32 = -1;

/// A single decision tree stored as flat, index-linked node arrays.
///
/// The layout follows the exported training artifacts: node `i` splits on
/// `feature[i]` at `threshold[i]`, with `x[feature] <= threshold` taking the
/// left branch. A node with `children_left[i] == -1` is a leaf and
/// `value[i]` holds its per-class vote counts.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    children_left: Vec<i32>,
    children_right: Vec<i32>,
    feature: Vec<i32>,
    threshold: Vec<f32>,
    value: Vec<Vec<f32>>,
}

impl Tree {
    pub fn new(
        children_left: Vec<i32>,
        children_right: Vec<i32>,
        feature: Vec<i32>,
        threshold: Vec<f32>,
        value: Vec<Vec<f32>>,
    ) -> Self {
        Self {
            children_left,
            children_right,
            feature,
            threshold,
            value,
        }
    }

    /// Walks the tree from the root and returns the predicted class index.
    ///
    /// Only valid on a tree that passed [`Forest::validate`]; traversal
    /// assumes in-range node and feature indices.
    fn decide(&self, x: &ArrayView1<f32>) -> usize {
        let mut node = 0usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        argmax(&self.value[node])
    }

    fn validate(&self, index: usize, n_features: usize, n_classes: usize) -> Result<()> {
        let n = self.children_left.len();
        if n == 0 {
            return Err(ModelErr::Malformed(format!("tree {index} has no nodes")));
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err(ModelErr::Malformed(format!(
                "tree {index} has inconsistent node array lengths"
            )));
        }
        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if (left == LEAF) != (right == LEAF) {
                return Err(ModelErr::Malformed(format!(
                    "tree {index} node {node} has exactly one child"
                )));
            }
            if left != LEAF {
                let feature = self.feature[node];
                if left < 0 || left as usize >= n || right < 0 || right as usize >= n {
                    return Err(ModelErr::Malformed(format!(
                        "tree {index} node {node} has a child out of range"
                    )));
                }
                if feature < 0 || feature as usize >= n_features {
                    return Err(ModelErr::Malformed(format!(
                        "tree {index} node {node} splits on feature {feature}, \
                         but the forest has {n_features} features"
                    )));
                }
            }
            if self.value[node].len() != n_classes {
                return Err(ModelErr::Malformed(format!(
                    "tree {index} node {node} has {} class values, expected {n_classes}",
                    self.value[node].len()
                )));
            }
        }
        Ok(())
    }
}

/// A pre-trained random-forest classifier.
///
/// Deserialization goes through the checked constructor, so a decoded
/// forest always satisfies the structural invariants traversal relies on.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawForest")]
pub struct Forest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<Tree>,
}

/// Wire form of the forest artifact, before validation.
#[derive(Deserialize)]
struct RawForest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<Tree>,
}

impl TryFrom<RawForest> for Forest {
    type Error = ModelErr;

    fn try_from(raw: RawForest) -> Result<Self> {
        Self::new(raw.n_features, raw.n_classes, raw.trees)
    }
}

impl Forest {
    /// Creates a validated forest.
    ///
    /// # Errors
    /// Returns `ModelErr::Malformed` if any structural invariant fails.
    pub fn new(n_features: usize, n_classes: usize, trees: Vec<Tree>) -> Result<Self> {
        let forest = Self {
            n_features,
            n_classes,
            trees,
        };
        forest.validate()?;
        Ok(forest)
    }

    /// Checks structural invariants of every tree. Runs as part of
    /// construction and deserialization.
    ///
    /// # Errors
    /// Returns `ModelErr::Malformed` if the forest is empty, declares fewer
    /// than two classes, or any tree has out-of-range indices or ragged
    /// node arrays.
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(ModelErr::Malformed("forest has no trees".to_string()));
        }
        if self.n_classes < 2 {
            return Err(ModelErr::Malformed(format!(
                "forest declares {} classes, need at least 2",
                self.n_classes
            )));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.n_features, self.n_classes)?;
        }
        Ok(())
    }

    /// Returns the number of input features the forest was trained on.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Predicts the class index for a single feature vector by majority
    /// vote across trees. Ties resolve to the lower class index.
    ///
    /// # Errors
    /// Returns `ModelErr::DimensionMismatch` if `x` does not match the
    /// trained feature count.
    pub fn predict(&self, x: &ArrayView1<f32>) -> Result<usize> {
        if x.len() != self.n_features {
            return Err(ModelErr::DimensionMismatch {
                what: "feature vector",
                got: x.len(),
                expected: self.n_features,
            });
        }
        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            votes[tree.decide(x)] += 1;
        }
        Ok(argmax_usize(&votes))
    }
}

fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

fn argmax_usize(values: &[usize]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    /// Single split on feature 0 at 0.5; left leaf votes class 0, right
    /// leaf votes class 1.
    fn stump(flip: bool) -> Tree {
        let (lo, hi) = if flip {
            (vec![0.0, 5.0], vec![5.0, 0.0])
        } else {
            (vec![5.0, 0.0], vec![0.0, 5.0])
        };
        Tree::new(
            vec![1, -1, -1],
            vec![2, -1, -1],
            vec![0, -1, -1],
            vec![0.5, 0.0, 0.0],
            vec![vec![5.0, 5.0], lo, hi],
        )
    }

    #[test]
    fn decide_walks_to_the_correct_leaf() {
        let forest = Forest::new(2, 2, vec![stump(false)]).unwrap();
        assert_eq!(forest.predict(&arr1(&[0.0, 9.0]).view()).unwrap(), 0);
        assert_eq!(forest.predict(&arr1(&[1.0, 9.0]).view()).unwrap(), 1);
    }

    #[test]
    fn threshold_is_inclusive_on_the_left() {
        let forest = Forest::new(1, 2, vec![stump(false)]).unwrap();
        assert_eq!(forest.predict(&arr1(&[0.5]).view()).unwrap(), 0);
    }

    #[test]
    fn majority_vote_across_trees() {
        let trees = vec![stump(false), stump(false), stump(true)];
        let forest = Forest::new(1, 2, trees).unwrap();
        // Two trees vote class 1, one votes class 0.
        assert_eq!(forest.predict(&arr1(&[1.0]).view()).unwrap(), 1);
    }

    #[test]
    fn ties_resolve_to_the_lower_class() {
        let trees = vec![stump(false), stump(true)];
        let forest = Forest::new(1, 2, trees).unwrap();
        assert_eq!(forest.predict(&arr1(&[1.0]).view()).unwrap(), 0);
    }

    #[test]
    fn predict_rejects_wrong_vector_length() {
        let forest = Forest::new(2, 2, vec![stump(false)]).unwrap();
        let err = forest.predict(&arr1(&[1.0]).view()).unwrap_err();
        assert!(matches!(err, ModelErr::DimensionMismatch { .. }));
    }

    #[test]
    fn empty_forest_is_rejected() {
        assert!(Forest::new(1, 2, vec![]).is_err());
    }

    #[test]
    fn out_of_range_feature_index_is_rejected() {
        // The stump splits on feature 0, but the forest declares 0 features.
        assert!(Forest::new(0, 2, vec![stump(false)]).is_err());
    }

    #[test]
    fn out_of_range_child_index_is_rejected() {
        let tree = Tree::new(
            vec![1, -1, -1],
            vec![9, -1, -1],
            vec![0, -1, -1],
            vec![0.5, 0.0, 0.0],
            vec![vec![0.0, 0.0]; 3],
        );
        assert!(Forest::new(1, 2, vec![tree]).is_err());
    }

    #[test]
    fn deserialization_rejects_an_out_of_range_child_index() {
        // No validate() call; decoding alone must refuse the artifact.
        let json = r#"{
            "n_features": 1,
            "n_classes": 2,
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [9, -1, -1],
                "feature": [0, -1, -1],
                "threshold": [0.5, 0.0, 0.0],
                "value": [[0.0, 0.0], [0.0, 0.0], [0.0, 0.0]]
            }]
        }"#;
        let err = serde_json::from_str::<Forest>(json).unwrap_err();
        assert!(err.to_string().contains("child out of range"));
    }

    #[test]
    fn ragged_node_arrays_are_rejected() {
        let tree = Tree::new(
            vec![1, -1, -1],
            vec![2, -1, -1],
            vec![0, -1],
            vec![0.5, 0.0, 0.0],
            vec![vec![0.0, 0.0]; 3],
        );
        assert!(Forest::new(1, 2, vec![tree]).is_err());
    }
}
