use std::{fs, path::Path};

use serde::de::DeserializeOwned;

use crate::{ArtifactErr, Result};

/// Reads the whole file at `path`.
pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| ArtifactErr::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses the JSON file at `path`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = read_bytes(path)?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactErr::Json {
        path: path.to_path_buf(),
        source,
    })
}
