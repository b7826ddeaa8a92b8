pub mod config;
pub mod error;
mod routes;

use std::{io, sync::Arc};

use log::{info, warn};
use model::{Encoder, Regressor, Scaler};
use pricing::PricePredictor;
use tokio::{net::TcpListener, signal};

pub use config::Config;
pub use error::{ApiErr, ConfigErr};
pub use routes::{Categories, FormFields, Prediction, router};

/// Serves the prediction routes on `listener` until Ctrl-C is received.
///
/// # Errors
/// Returns an io error if the server fails.
pub async fn serve<M, E, S>(
    listener: TcpListener,
    predictor: Arc<PricePredictor<M, E, S>>,
) -> io::Result<()>
where
    M: Regressor + 'static,
    E: Encoder + 'static,
    S: Scaler + 'static,
{
    axum::serve(listener, router(predictor))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("received SIGINT, shutting down"),
        Err(e) => {
            warn!("cannot listen for SIGINT, serving until killed: {e}");
            std::future::pending::<()>().await;
        }
    }
}
