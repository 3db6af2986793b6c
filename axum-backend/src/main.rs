use anyhow::Context;
use floorplan_backend::{create_app, AppState};
use floorplan_extractor::{ExtractorConfig, FloorPlanExtractor};
use std::path::PathBuf;
use tracing::info;

fn load_config() -> anyhow::Result<ExtractorConfig> {
    match std::env::var("FLOORPLAN_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading extractor configuration from {}", path.display());
            ExtractorConfig::from_path(&path)
                .with_context(|| format!("invalid configuration at {}", path.display()))
        }
        Err(_) => Ok(ExtractorConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Floorplan Extractor Server");

    let config = load_config()?;
    let app = create_app(AppState::new(FloorPlanExtractor::new(config)));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
