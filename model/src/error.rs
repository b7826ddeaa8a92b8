use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

use safetensors::SafeTensorError;

/// The result type used in the entire model module.
pub type Result<T> = std::result::Result<T, ArtifactErr>;

/// Failures while loading or evaluating one of the pre-trained artifacts.
#[derive(Debug)]
pub enum ArtifactErr {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    SafeTensors(SafeTensorError),
    Malformed(String),
    ColumnMismatch {
        artifact: &'static str,
        got: Vec<String>,
        expected: Vec<String>,
    },
    UnknownCategory {
        column: String,
        value: String,
    },
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
}

impl Display for ArtifactErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactErr::Io { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            ArtifactErr::Json { path, source } => {
                write!(f, "invalid JSON in '{}': {source}", path.display())
            }
            ArtifactErr::SafeTensors(e) => write!(f, "invalid safetensors data: {e}"),
            ArtifactErr::Malformed(msg) => write!(f, "malformed artifact: {msg}"),
            ArtifactErr::ColumnMismatch {
                artifact,
                got,
                expected,
            } => write!(
                f,
                "the {artifact} was fitted on columns {got:?}, expected {expected:?}"
            ),
            ArtifactErr::UnknownCategory { column, value } => {
                write!(f, "found unknown category '{value}' in column {column}")
            }
            ArtifactErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "there's a size mismatch in {what}, got {got} and expected {expected}"
            ),
        }
    }
}

impl Error for ArtifactErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ArtifactErr::Io { source, .. } => Some(source),
            ArtifactErr::Json { source, .. } => Some(source),
            ArtifactErr::SafeTensors(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SafeTensorError> for ArtifactErr {
    fn from(value: SafeTensorError) -> Self {
        Self::SafeTensors(value)
    }
}
