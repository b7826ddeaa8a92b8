use std::collections::HashMap;

use log::{debug, error, info};
use model::{
    ArtifactErr, ArtifactPaths, Artifacts, Encoder, MinMaxScaler, OrdinalEncoder, RandomForest,
    Regressor, Scaler,
};

use crate::{
    FeaturePipeline, FeatureRecord, Result,
    columns::{self, CATEGORICAL_COLUMNS, MODEL_COLUMNS, SCALER_COLUMNS},
    validation,
};

/// Negative prices are reported as zero. NaN also maps to zero.
pub fn clamp_price(raw: f64) -> f64 {
    raw.max(0.0)
}

/// Validates requests, prepares their features and runs the model on them.
///
/// Holds the artifacts read-only, so a single instance can serve concurrent requests.
#[derive(Debug)]
pub struct PricePredictor<M = RandomForest, E = OrdinalEncoder, S = MinMaxScaler> {
    artifacts: Artifacts<M, E, S>,
    pipeline: FeaturePipeline,
}

impl PricePredictor {
    /// Loads the artifacts from disk and checks they fit together.
    ///
    /// # Errors
    /// Returns an error if any artifact can't be loaded or was fitted on other columns.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let artifacts = Artifacts::load(paths)?;
        Self::new(artifacts)
    }
}

impl<M, E, S> PricePredictor<M, E, S>
where
    M: Regressor,
    E: Encoder,
    S: Scaler,
{
    /// Creates a new `PricePredictor`.
    ///
    /// The encoder and scaler must have been fitted on `CATEGORICAL_COLUMNS` and
    /// `SCALER_COLUMNS` respectively. A model fitted on other columns than `MODEL_COLUMNS` is
    /// accepted but every prediction will fail.
    ///
    /// # Arguments
    /// * `artifacts` - The loaded model, encoder and scaler.
    ///
    /// # Returns
    /// A new `PricePredictor` or an error if the preprocessors don't match the columns.
    pub fn new(artifacts: Artifacts<M, E, S>) -> Result<Self> {
        for (artifact, got, expected) in [
            ("encoder", artifacts.encoder.columns(), &CATEGORICAL_COLUMNS[..]),
            ("scaler", artifacts.scaler.columns(), &SCALER_COLUMNS[..]),
        ] {
            if !columns::same_columns(got, expected) {
                return Err(ArtifactErr::ColumnMismatch {
                    artifact,
                    got: got.to_vec(),
                    expected: columns::to_owned(expected),
                }
                .into());
            }
        }

        let model_columns = artifacts.model.feature_names();
        if columns::same_columns(model_columns, &MODEL_COLUMNS) {
            info!(columns = MODEL_COLUMNS.len(); "model input schema verified");
        } else {
            error!(
                "the model expects columns {model_columns:?} but the input is built as \
                 {MODEL_COLUMNS:?}, every prediction will fail"
            );
        }

        Ok(Self {
            artifacts,
            pipeline: FeaturePipeline::new()?,
        })
    }

    /// Validates the submitted fields and predicts the price they describe.
    ///
    /// # Arguments
    /// * `form` - The submitted field values by name.
    ///
    /// # Returns
    /// The non-negative predicted price, or an `Invalid` error for bad input and any other
    /// variant for a service side failure.
    pub fn predict(&self, form: &HashMap<String, String>) -> Result<f64> {
        let record = validation::validate(form)?;
        self.predict_record(&record)
    }

    /// Predicts the price of an already validated record.
    ///
    /// # Errors
    /// Returns `SchemaDrift` if the model was fitted on other columns, or the artifact's error.
    pub fn predict_record(&self, record: &FeatureRecord) -> Result<f64> {
        let Artifacts {
            model,
            encoder,
            scaler,
        } = &self.artifacts;

        let features = self.pipeline.transform(encoder, scaler, record)?;
        debug!("model expects columns {:?}", model.feature_names());
        features.check_schema(model.feature_names())?;

        let raw = model.predict(features.values())?;
        let price = clamp_price(raw);
        debug!(raw = raw, price = price; "prediction succeeded");
        Ok(price)
    }

    #[cfg(test)]
    pub(crate) fn artifacts(&self) -> &Artifacts<M, E, S> {
        &self.artifacts
    }
}
