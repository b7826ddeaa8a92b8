use std::{env, path::PathBuf};

use model::{
    ArtifactPaths,
    artifacts::{ENCODER_FILE, MODEL_FILE, SCALER_FILE},
};

use crate::error::ConfigErr;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ARTIFACTS_DIR: &str = ".";

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub artifacts: ArtifactPaths,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// Returns a `ConfigErr` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `var`, falling back to the defaults for unset keys.
    ///
    /// # Arguments
    /// * `var` - Returns the value of a variable, if set.
    ///
    /// # Returns
    /// The configuration or an error if a variable is malformed.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigErr::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        let dir =
            PathBuf::from(var("ARTIFACTS_DIR").unwrap_or_else(|| DEFAULT_ARTIFACTS_DIR.into()));
        let file = |key: &str, default: &str| dir.join(var(key).unwrap_or_else(|| default.into()));

        let artifacts = ArtifactPaths {
            model: file("MODEL_FILE", MODEL_FILE),
            encoder: file("ENCODER_FILE", ENCODER_FILE),
            scaler: file("SCALER_FILE", SCALER_FILE),
        };

        Ok(Self {
            host,
            port,
            artifacts,
        })
    }

    /// The `host:port` address to listen at.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
