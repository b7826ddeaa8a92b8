use ndarray::ArrayView1;

use crate::{ArtifactErr, Result};

/// Marks a node without children.
pub const LEAF: i64 = -1;

/// A fitted regression tree stored as parallel node arrays.
///
/// Node `0` is the root. An internal node sends a row to `children_left` when its `feature`
/// is less than or equal to `threshold`, otherwise to `children_right`. A leaf holds the
/// prediction in `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<f64>,
    n_features: usize,
}

impl Tree {
    /// Creates a new `Tree` checking its structure is traversable.
    ///
    /// # Arguments
    /// * `children_left` - The left child index of each node, `LEAF` for leaves.
    /// * `children_right` - The right child index of each node, `LEAF` for leaves.
    /// * `feature` - The feature index each internal node splits on.
    /// * `threshold` - The split threshold of each internal node.
    /// * `value` - The prediction of each node.
    /// * `n_features` - The amount of features of an input row.
    ///
    /// # Returns
    /// A new `Tree` or an error if the arrays are inconsistent.
    pub fn new(
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<i64>,
        threshold: Vec<f64>,
        value: Vec<f64>,
        n_features: usize,
    ) -> Result<Self> {
        let nodes = children_left.len();
        if nodes == 0 {
            return Err(ArtifactErr::Malformed("tree has no nodes".into()));
        }

        for (what, len) in [
            ("tree children_right", children_right.len()),
            ("tree feature", feature.len()),
            ("tree threshold", threshold.len()),
            ("tree value", value.len()),
        ] {
            if len != nodes {
                return Err(ArtifactErr::SizeMismatch {
                    what,
                    got: len,
                    expected: nodes,
                });
            }
        }

        for node in 0..nodes {
            let (left, right) = (children_left[node], children_right[node]);
            if left == LEAF && right == LEAF {
                continue;
            }

            // Children always come after their parent, which rules out cycles.
            let in_range = |child: i64| child > node as i64 && child < nodes as i64;
            if !in_range(left) || !in_range(right) {
                return Err(ArtifactErr::Malformed(format!(
                    "node {node} has invalid children ({left}, {right})"
                )));
            }

            let f = feature[node];
            if f < 0 || f as usize >= n_features {
                return Err(ArtifactErr::Malformed(format!(
                    "node {node} splits on feature {f} of {n_features}"
                )));
            }
        }

        Ok(Self {
            children_left,
            children_right,
            feature,
            threshold,
            value,
            n_features,
        })
    }

    /// Walks the tree from the root down to the leaf the given row falls into.
    ///
    /// Inputs are compared in single precision, as the trees were grown on `f32` data.
    pub fn predict(&self, x: ArrayView1<f64>) -> f64 {
        let mut node = 0;

        while self.children_left[node] != LEAF {
            let v = x[self.feature[node] as usize] as f32 as f64;
            node = if v <= self.threshold[node] {
                self.children_left[node]
            } else {
                self.children_right[node]
            } as usize;
        }

        self.value[node]
    }

    /// Returns the amount of features of an input row.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub(super) fn children_left(&self) -> &[i64] {
        &self.children_left
    }

    pub(super) fn children_right(&self) -> &[i64] {
        &self.children_right
    }

    pub(super) fn feature(&self) -> &[i64] {
        &self.feature
    }

    pub(super) fn threshold(&self) -> &[f64] {
        &self.threshold
    }

    pub(super) fn value(&self) -> &[f64] {
        &self.value
    }
}
