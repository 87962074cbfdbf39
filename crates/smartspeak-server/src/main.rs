mod configuration;
mod error;
mod routes;
mod state;

use configuration::Settings;
use state::AppState;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load a local .env if present, then initialize tracing for logging
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new()?;
    let addr = settings.server.socket_addr();
    let provider_config = settings.provider.into_config();

    // A missing key is surfaced per request as a configuration error, not
    // at startup, so an operator can inject the key without a redeploy.
    if !provider_config.has_api_key() {
        warn!(
            "{} is not set; chat requests will fail until it is configured",
            provider_config.api_key_env()
        );
    }

    let state = AppState::new(provider_config);
    let app = routes::configure(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
