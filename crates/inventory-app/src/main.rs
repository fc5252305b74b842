use inventory_hex::application::seed::load_sample_data;
use inventory_hex::config::Config;
use inventory_hex::inbound::http::{AppState, HttpServer, HttpServerConfig};
use inventory_repo::build_store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for SERVER_PORT / SEED_SAMPLE_DATA when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(build_store());
    if config.seed_sample_data {
        load_sample_data(&state.store, &state.catalog, &state.orders).await?;
    }

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
    };

    tracing::info!(port = %server_cfg.port, "inventory api at /api (products, suppliers, orders, health)");
    let http = HttpServer::new(state, server_cfg).await?;
    http.run().await
}
