use std::path::Path;

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::{ArtifactErr, Result, Scaler, io};

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// On-disk layout of a min-max scaler.
#[derive(Debug, Serialize, Deserialize)]
struct ScalerFile {
    feature_names_in: Vec<String>,
    min: Vec<f64>,
    scale: Vec<f64>,
    #[serde(default = "default_feature_range")]
    feature_range: (f64, f64),
    #[serde(default)]
    clip: bool,
}

/// Per column affine transform `x * scale + min` learned from the training data range.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    columns: Vec<String>,
    min: Array1<f64>,
    scale: Array1<f64>,
    feature_range: (f64, f64),
    clip: bool,
}

impl MinMaxScaler {
    /// Creates a new `MinMaxScaler` from its fitted coefficients.
    ///
    /// # Arguments
    /// * `columns` - The ordered column names.
    /// * `min` - The additive term of each column.
    /// * `scale` - The multiplicative term of each column.
    ///
    /// # Returns
    /// A new `MinMaxScaler` or an error if the lengths differ.
    pub fn new(columns: Vec<String>, min: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        for (what, len) in [("scaler min", min.len()), ("scaler scale", scale.len())] {
            if len != columns.len() {
                return Err(ArtifactErr::SizeMismatch {
                    what,
                    got: len,
                    expected: columns.len(),
                });
            }
        }

        Ok(Self {
            columns,
            min: Array1::from(min),
            scale: Array1::from(scale),
            feature_range: default_feature_range(),
            clip: false,
        })
    }

    /// Fits the coefficients that map each observed `(low, high)` data range onto `[0, 1]`.
    ///
    /// A column whose range is empty keeps a scale of one.
    pub fn from_ranges(columns: Vec<String>, ranges: &[(f64, f64)]) -> Result<Self> {
        let (lo, hi) = default_feature_range();
        let scale: Vec<f64> = ranges
            .iter()
            .map(|&(low, high)| {
                let span = high - low;
                if span == 0.0 { 1.0 } else { (hi - lo) / span }
            })
            .collect();

        let min = ranges
            .iter()
            .zip(&scale)
            .map(|(&(low, _), s)| lo - low * s)
            .collect();

        Self::new(columns, min, scale)
    }

    /// Clamps every scaled value to the feature range.
    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    /// Reads a scaler from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file can't be read, parsed or is inconsistent.
    pub fn load(path: &Path) -> Result<Self> {
        let file: ScalerFile = io::read_json(path)?;
        let (lo, hi) = file.feature_range;
        if !(lo < hi) {
            return Err(ArtifactErr::Malformed(format!(
                "scaler feature range ({lo}, {hi}) is empty"
            )));
        }

        let mut scaler = Self::new(file.feature_names_in, file.min, file.scale)?;
        scaler.feature_range = file.feature_range;
        scaler.clip = file.clip;
        Ok(scaler)
    }

    /// Serializes this scaler back to its JSON layout.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(&ScalerFile {
            feature_names_in: self.columns.clone(),
            min: self.min.to_vec(),
            scale: self.scale.to_vec(),
            feature_range: self.feature_range,
            clip: self.clip,
        })
    }
}

impl Scaler for MinMaxScaler {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn scale(&self, row: ArrayView1<f64>) -> Result<Array1<f64>> {
        if row.len() != self.columns.len() {
            return Err(ArtifactErr::SizeMismatch {
                what: "scaler input",
                got: row.len(),
                expected: self.columns.len(),
            });
        }

        let mut scaled = &row * &self.scale + &self.min;
        if self.clip {
            let (lo, hi) = self.feature_range;
            scaled.mapv_inplace(|x| x.clamp(lo, hi));
        }

        Ok(scaled)
    }
}
