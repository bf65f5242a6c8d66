//! Insurance Premium Predictor - Main Entry Point

use api::{init_logging, run_server, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;
    init_logging(config.log_json);

    info!("=== Insurance Premium Predictor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Model: {} (manifest {})",
        config.model_path.display(),
        config.manifest_path.display()
    );

    run_server(config).await?;

    Ok(())
}
