use std::sync::Arc;

use anyhow::Context;
use api::Config;
use log::info;
use pricing::PricePredictor;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    // No artifact, no server.
    let predictor =
        PricePredictor::load(&config.artifacts).context("cannot start without artifacts")?;

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("listening at {addr}");

    api::serve(listener, Arc::new(predictor)).await?;
    info!("wrapping up, bye");
    Ok(())
}
