use std::path::{Path, PathBuf};

use log::{error, info};

use crate::{MinMaxScaler, OrdinalEncoder, RandomForest, Result};

pub const MODEL_FILE: &str = "random_forest_model.safetensors";
pub const ENCODER_FILE: &str = "ordinal_encoder.json";
pub const SCALER_FILE: &str = "minmax_scaler.json";

/// Where each of the three artifacts lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub encoder: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    /// Points at the default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(MODEL_FILE),
            encoder: dir.join(ENCODER_FILE),
            scaler: dir.join(SCALER_FILE),
        }
    }
}

/// The pre-trained model, categorical encoder and numeric scaler, loaded once and shared
/// read-only for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Artifacts<M = RandomForest, E = OrdinalEncoder, S = MinMaxScaler> {
    pub model: M,
    pub encoder: E,
    pub scaler: S,
}

impl Artifacts {
    /// Loads all three artifacts, failing as a whole if any of them can't be loaded.
    ///
    /// # Arguments
    /// * `paths` - The location of each artifact.
    ///
    /// # Returns
    /// The loaded artifacts or the first error found.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let loaded = Self::try_load(paths);

        match &loaded {
            Ok(artifacts) => info!(
                trees = artifacts.model.n_estimators();
                "model and preprocessors loaded successfully"
            ),
            Err(e) => error!("failed to load the model or preprocessors: {e}"),
        }

        loaded
    }

    fn try_load(paths: &ArtifactPaths) -> Result<Self> {
        Ok(Self {
            model: RandomForest::load(&paths.model)?,
            encoder: OrdinalEncoder::load(&paths.encoder)?,
            scaler: MinMaxScaler::load(&paths.scaler)?,
        })
    }
}
