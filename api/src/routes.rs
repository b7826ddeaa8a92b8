use std::{collections::HashMap, sync::Arc};

use axum::{
    Form, Json, Router,
    extract::{FromRequest, Multipart, Request, State},
    http::header,
    routing::{get, post},
};
use log::{debug, error, warn};
use model::{Encoder, Regressor, Scaler};
use pricing::{CategoryRegistry, PricePredictor};
use serde::Serialize;

use crate::error::ApiErr;

#[derive(Debug, Serialize)]
pub struct Categories {
    pub categories: CategoryRegistry,
}

#[derive(Debug, Serialize)]
pub struct Prediction {
    pub prediction: f64,
}

/// The submitted key/value pairs, from either a urlencoded or a multipart body.
#[derive(Debug)]
pub struct FormFields(pub HashMap<String, String>);

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = ApiErr;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !multipart {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.body_text()))?;
            return Ok(Self(fields));
        }

        let mut parts = Multipart::from_request(req, state)
            .await
            .map_err(|e| rejected(e.body_text()))?;

        let mut fields = HashMap::new();
        while let Some(part) = parts.next_field().await.map_err(|e| rejected(e.body_text()))? {
            let Some(name) = part.name().map(str::to_owned) else {
                continue;
            };
            let value = part.text().await.map_err(|e| rejected(e.body_text()))?;

            // First value wins on repeated keys.
            fields.entry(name).or_insert(value);
        }

        Ok(Self(fields))
    }
}

fn rejected(msg: String) -> ApiErr {
    warn!("rejected request body: {msg}");
    ApiErr::BadRequest(msg)
}

/// Builds the HTTP routes around a shared predictor.
///
/// # Arguments
/// * `predictor` - The loaded predictor, shared read-only by every request.
///
/// # Returns
/// The router serving `GET /` and `POST /predict`.
pub fn router<M, E, S>(predictor: Arc<PricePredictor<M, E, S>>) -> Router
where
    M: Regressor + 'static,
    E: Encoder + 'static,
    S: Scaler + 'static,
{
    Router::new()
        .route("/", get(categories))
        .route("/predict", post(predict::<M, E, S>))
        .with_state(predictor)
}

async fn categories() -> Json<Categories> {
    debug!("GET /");
    Json(Categories {
        categories: CategoryRegistry,
    })
}

async fn predict<M, E, S>(
    State(predictor): State<Arc<PricePredictor<M, E, S>>>,
    FormFields(form): FormFields,
) -> Result<Json<Prediction>, ApiErr>
where
    M: Regressor,
    E: Encoder,
    S: Scaler,
{
    debug!("POST /predict");

    debug!(fields = form.len(); "received data: {form:?}");

    match predictor.predict(&form) {
        Ok(prediction) => {
            debug!(prediction = prediction; "prediction succeeded");
            Ok(Json(Prediction { prediction }))
        }
        Err(e) if e.is_invalid_input() => {
            warn!(field = e.field().unwrap_or_default(); "validation error: {e}");
            Err(e.into())
        }
        Err(e) => {
            error!("prediction error: {e}");
            Err(e.into())
        }
    }
}
