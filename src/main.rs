use std::error::Error;

use ai_gateway::{config::default_config::load_dotenv, telemetry};
use api::AppState;
use tracing::{Level, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Loaded before logging so RUST_LOG from .env applies; a malformed file is fatal.
    let dotenv = load_dotenv()?;

    telemetry::init(Level::INFO)?;
    match dotenv {
        Some(path) => info!(path = %path.display(), ".env loaded"),
        None => info!("no .env file found, using process environment"),
    }

    let state = AppState::from_env()?;
    info!(
        deep_model = %state.config.deep.model,
        fast_model = %state.config.fast.model,
        timeout_secs = state.config.timeout_secs,
        max_body_bytes = state.max_body_bytes,
        "model gateway configured"
    );

    api::start(state).await?;

    Ok(())
}
