mod tensors;
mod tree;

use std::path::Path;

use ndarray::ArrayView1;

pub use tree::{LEAF, Tree};

use crate::{ArtifactErr, Regressor, Result, io};

/// An averaging ensemble of regression trees.
#[derive(Debug, Clone)]
pub struct RandomForest {
    feature_names: Vec<String>,
    trees: Vec<Tree>,
}

impl RandomForest {
    /// Creates a new `RandomForest`.
    ///
    /// # Arguments
    /// * `feature_names` - The ordered input feature names the trees were grown on.
    /// * `trees` - The estimators, at least one.
    ///
    /// # Returns
    /// A new `RandomForest` or an error if there are no trees or they disagree on the features.
    pub fn new(feature_names: Vec<String>, trees: Vec<Tree>) -> Result<Self> {
        if trees.is_empty() {
            return Err(ArtifactErr::Malformed("forest has no trees".into()));
        }

        if let Some(tree) = trees.iter().find(|t| t.n_features() != feature_names.len()) {
            return Err(ArtifactErr::SizeMismatch {
                what: "tree features",
                got: tree.n_features(),
                expected: feature_names.len(),
            });
        }

        Ok(Self {
            feature_names,
            trees,
        })
    }

    /// Decodes a forest out of a safetensors buffer.
    ///
    /// # Errors
    /// Returns an error if the buffer, its metadata or any tree is malformed.
    pub fn from_safetensors(bytes: &[u8]) -> Result<Self> {
        let (feature_names, trees) = tensors::decode(bytes)?;
        Self::new(feature_names, trees)
    }

    /// Encodes this forest as a safetensors buffer.
    ///
    /// # Errors
    /// Returns an error if the tensors can't be laid out.
    pub fn to_safetensors(&self) -> Result<Vec<u8>> {
        tensors::encode(&self.feature_names, &self.trees)
    }

    /// Reads a forest from a safetensors file.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or decoded.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = io::read_bytes(path)?;
        Self::from_safetensors(&bytes)
    }

    /// Returns the amount of estimators.
    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }
}

impl Regressor for RandomForest {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, x: ArrayView1<f64>) -> Result<f64> {
        if x.len() != self.feature_names.len() {
            return Err(ArtifactErr::SizeMismatch {
                what: "forest input",
                got: x.len(),
                expected: self.feature_names.len(),
            });
        }

        let total: f64 = self.trees.iter().map(|tree| tree.predict(x)).sum();
        Ok(total / self.trees.len() as f64)
    }
}
