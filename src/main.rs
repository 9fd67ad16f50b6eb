use std::sync::Arc;

use clap::error::ErrorKind;

use monthlywrap::{
    api::AppState,
    config::{self, Config},
    error,
    management::MemoryStore,
    server, telemetry, warning,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match config::load_env() {
        Ok(true) => {}
        Ok(false) => warning!("No .env file found, using process environment only"),
        Err(e) => error!("Cannot load environment. Err: {}", e),
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };
    telemetry::init_tracing(config.server.log_format)?;

    let state = AppState::new(config, Arc::new(MemoryStore::new()));
    server::start_api_server(state).await
}
