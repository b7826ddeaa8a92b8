use std::{
    error::Error,
    fmt::{self, Display},
};

use model::ArtifactErr;

/// The result type used in the entire pricing module.
pub type Result<T> = std::result::Result<T, PricingErr>;

/// The pricing module's error type.
#[derive(Debug)]
pub enum PricingErr {
    /// A request field failed its declared rule. The caller can fix it and resubmit.
    Invalid { field: &'static str, msg: String },
    /// The projected columns disagree with the ones the model was fitted on.
    SchemaDrift {
        input: Vec<String>,
        model: Vec<String>,
    },
    Artifact(ArtifactErr),
    Internal(String),
}

impl PricingErr {
    /// Whether the error was caused by the request rather than by the service.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PricingErr::Invalid { .. })
    }

    /// The request field at fault, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PricingErr::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl Display for PricingErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingErr::Invalid { msg, .. } => write!(f, "{msg}"),
            PricingErr::SchemaDrift { input, model } => write!(
                f,
                "the input columns {input:?} don't match the ones expected by the model {model:?}"
            ),
            PricingErr::Artifact(e) => write!(f, "{e}"),
            PricingErr::Internal(msg) => write!(f, "{msg}"),
        }
    }
}

impl Error for PricingErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PricingErr::Artifact(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArtifactErr> for PricingErr {
    fn from(value: ArtifactErr) -> Self {
        Self::Artifact(value)
    }
}
