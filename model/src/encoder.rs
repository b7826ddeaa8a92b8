use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ArtifactErr, Encoder, Result, io};

/// On-disk layout of an ordinal encoder.
#[derive(Debug, Serialize, Deserialize)]
struct EncoderFile {
    feature_names_in: Vec<String>,
    categories: Vec<Vec<String>>,
}

/// Assigns each category the index it has in its column's fitted category list.
#[derive(Debug, Clone)]
pub struct OrdinalEncoder {
    columns: Vec<String>,
    categories: Vec<Vec<String>>,
}

impl OrdinalEncoder {
    /// Creates a new `OrdinalEncoder`.
    ///
    /// # Arguments
    /// * `columns` - The ordered column names.
    /// * `categories` - The known categories of each column, same length as `columns`.
    ///
    /// # Returns
    /// A new `OrdinalEncoder` or an error if the lists are inconsistent.
    pub fn new(columns: Vec<String>, categories: Vec<Vec<String>>) -> Result<Self> {
        if columns.len() != categories.len() {
            return Err(ArtifactErr::SizeMismatch {
                what: "encoder categories",
                got: categories.len(),
                expected: columns.len(),
            });
        }

        if let Some(i) = categories.iter().position(|c| c.is_empty()) {
            return Err(ArtifactErr::Malformed(format!(
                "encoder column {} has no categories",
                columns[i]
            )));
        }

        Ok(Self {
            columns,
            categories,
        })
    }

    /// Reads an encoder from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file can't be read, parsed or is inconsistent.
    pub fn load(path: &Path) -> Result<Self> {
        let file: EncoderFile = io::read_json(path)?;
        Self::new(file.feature_names_in, file.categories)
    }

    /// Serializes this encoder back to its JSON layout.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(&EncoderFile {
            feature_names_in: self.columns.clone(),
            categories: self.categories.clone(),
        })
    }
}

impl Encoder for OrdinalEncoder {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn encode(&self, values: &[&str]) -> Result<Vec<f64>> {
        if values.len() != self.columns.len() {
            return Err(ArtifactErr::SizeMismatch {
                what: "encoder input",
                got: values.len(),
                expected: self.columns.len(),
            });
        }

        values
            .iter()
            .zip(&self.columns)
            .zip(&self.categories)
            .map(|((value, column), known)| {
                known
                    .iter()
                    .position(|c| c == value)
                    .map(|code| code as f64)
                    .ok_or_else(|| ArtifactErr::UnknownCategory {
                        column: column.clone(),
                        value: value.to_string(),
                    })
            })
            .collect()
    }
}
