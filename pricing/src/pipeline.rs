use log::debug;
use model::{Encoder, Scaler};
use ndarray::{Array1, ArrayView1};

use crate::{
    FeatureRecord, PricingErr, Result,
    columns::{self, CATEGORICAL_COLUMNS, MODEL_COLUMNS, Projection, SCALER_COLUMNS},
    record::Cell,
};

/// The scaled record restricted to the columns the model consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFeatureSubset {
    columns: Vec<&'static str>,
    values: Array1<f64>,
}

impl ModelFeatureSubset {
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Asserts the columns are exactly the ones the model recorded at fit time, in order.
    ///
    /// # Errors
    /// Returns `SchemaDrift` on any difference.
    pub fn check_schema(&self, expected: &[String]) -> Result<()> {
        if columns::same_columns(expected, &self.columns) {
            return Ok(());
        }

        Err(PricingErr::SchemaDrift {
            input: columns::to_owned(&self.columns),
            model: expected.to_vec(),
        })
    }
}

/// Turns a validated record into model input: assemble, encode, scale and project, always in
/// that order.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    categorical: Projection,
    model: Projection,
}

impl FeaturePipeline {
    /// Creates a new `FeaturePipeline`, resolving the column positions once.
    ///
    /// # Returns
    /// A new `FeaturePipeline` or an error if the column lists are inconsistent.
    pub fn new() -> Result<Self> {
        Ok(Self {
            categorical: Projection::new(&SCALER_COLUMNS, &CATEGORICAL_COLUMNS)?,
            model: Projection::new(&SCALER_COLUMNS, &MODEL_COLUMNS)?,
        })
    }

    /// Runs the whole transform for a single record.
    ///
    /// # Arguments
    /// * `encoder` - The categorical encoder, fitted on `CATEGORICAL_COLUMNS`.
    /// * `scaler` - The numeric scaler, fitted on `SCALER_COLUMNS`.
    /// * `record` - The validated record.
    ///
    /// # Returns
    /// The projected features or an error if an artifact fails.
    pub fn transform<E, S>(
        &self,
        encoder: &E,
        scaler: &S,
        record: &FeatureRecord,
    ) -> Result<ModelFeatureSubset>
    where
        E: Encoder,
        S: Scaler,
    {
        let cells = Self::assemble(record)?;
        let encoded = self.encode(encoder, &cells)?;
        debug!("record before scaling: {encoded}");

        let scaled = scaler.scale(encoded.view())?;
        debug!("record after scaling: {scaled}");

        if scaled.len() != SCALER_COLUMNS.len() {
            return Err(PricingErr::Internal(format!(
                "the scaler returned {} columns, expected {}",
                scaled.len(),
                SCALER_COLUMNS.len()
            )));
        }

        Ok(self.project(scaled.view()))
    }

    /// Lays the record out in `SCALER_COLUMNS` order.
    fn assemble(record: &FeatureRecord) -> Result<Vec<Cell>> {
        SCALER_COLUMNS
            .iter()
            .map(|col| {
                record
                    .cell(col)
                    .ok_or_else(|| PricingErr::Internal(format!("record has no column {col}")))
            })
            .collect()
    }

    /// Replaces the categorical cells with their codes, leaving an all-numeric record.
    fn encode<E: Encoder>(&self, encoder: &E, cells: &[Cell]) -> Result<Array1<f64>> {
        let categories = self
            .categorical
            .indices()
            .iter()
            .map(|&i| match cells[i] {
                Cell::Cat(value) => Ok(value),
                Cell::Num(_) => Err(PricingErr::Internal(format!(
                    "column {} is not categorical",
                    SCALER_COLUMNS[i]
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        let codes = encoder.encode(&categories)?;
        if codes.len() != categories.len() {
            return Err(PricingErr::Internal(format!(
                "the encoder returned {} codes, expected {}",
                codes.len(),
                categories.len()
            )));
        }

        let mut row = Array1::<f64>::zeros(cells.len());
        for (i, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Num(x) => row[i] = *x,
                Cell::Cat(_) if self.categorical.indices().contains(&i) => {}
                Cell::Cat(_) => {
                    return Err(PricingErr::Internal(format!(
                        "column {} was left unencoded",
                        SCALER_COLUMNS[i]
                    )));
                }
            }
        }

        for (&i, code) in self.categorical.indices().iter().zip(codes) {
            row[i] = code;
        }

        Ok(row)
    }

    /// Picks the model columns out of the scaled record, in `MODEL_COLUMNS` order.
    fn project(&self, scaled: ArrayView1<f64>) -> ModelFeatureSubset {
        ModelFeatureSubset {
            columns: self.model.columns().to_vec(),
            values: self.model.indices().iter().map(|&i| scaled[i]).collect(),
        }
    }
}
