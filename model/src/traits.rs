use ndarray::{Array1, ArrayView1};

use crate::Result;

/// Maps the categorical columns of a record to their learned ordinal codes.
pub trait Encoder: Send + Sync {
    /// The ordered column names this encoder was fitted on.
    fn columns(&self) -> &[String];

    /// Encodes one value per column, in `columns` order.
    ///
    /// # Errors
    /// Returns an error if the amount of values doesn't match the columns or if any of them
    /// wasn't seen at fit time.
    fn encode(&self, values: &[&str]) -> Result<Vec<f64>>;
}

/// Normalizes an all-numeric record to the range learned at fit time.
pub trait Scaler: Send + Sync {
    /// The ordered column names this scaler was fitted on.
    fn columns(&self) -> &[String];

    /// Scales a whole record, in `columns` order.
    ///
    /// # Errors
    /// Returns an error if the record length doesn't match the columns.
    fn scale(&self, row: ArrayView1<f64>) -> Result<Array1<f64>>;
}

/// A regression model producing a single scalar per input row.
pub trait Regressor: Send + Sync {
    /// The ordered input feature names recorded by the model at fit time.
    fn feature_names(&self) -> &[String];

    /// Predicts the raw, unclamped target for a single row.
    ///
    /// # Errors
    /// Returns an error if the row length doesn't match the recorded features.
    fn predict(&self, x: ArrayView1<f64>) -> Result<f64>;
}
