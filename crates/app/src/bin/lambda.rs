//! Campus API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tracing::info;

use campus_app::{apply_layers, create_app, log_filter};
use campus_common::config::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config))
        .json()
        .without_time()
        .init();

    info!("Initializing Campus API Lambda");

    let app =
        create_app(&config).map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let app = apply_layers(app, &config);

    info!("Campus API Lambda ready to serve requests");

    run(app).await
}
