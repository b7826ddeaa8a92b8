use std::{
    error::Error,
    fmt::{self, Display},
    num::ParseIntError,
};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pricing::PricingErr;
use serde_json::json;

/// Generic message sent back for service side failures, the details only go to the log.
pub const INTERNAL_MSG: &str = "the prediction could not be computed";

/// Invalid process configuration.
#[derive(Debug)]
pub enum ConfigErr {
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
}

impl Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::InvalidPort { value, source } => {
                write!(f, "invalid PORT '{value}': {source}")
            }
        }
    }
}

impl Error for ConfigErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigErr::InvalidPort { source, .. } => Some(source),
        }
    }
}

/// A failed request, rendered as `{"error": ...}`.
#[derive(Debug)]
pub enum ApiErr {
    BadRequest(String),
    Internal,
}

impl ApiErr {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiErr::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiErr::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PricingErr> for ApiErr {
    fn from(value: PricingErr) -> Self {
        if value.is_invalid_input() {
            ApiErr::BadRequest(value.to_string())
        } else {
            ApiErr::Internal
        }
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            ApiErr::BadRequest(msg) => msg,
            ApiErr::Internal => INTERNAL_MSG.to_string(),
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}
