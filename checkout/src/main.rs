mod web;

use checkout::card::StaticCatalog;
use env_logger::Env;
use log::{error, info};
use std::sync::Arc;
use web::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    let transport = config.services.transport()?;
    let state = web::router::AppState {
        config: config.clone(),
        transport,
        catalog: Arc::new(StaticCatalog::english()),
    };
    let app = web::router::build_router(state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on {}", addr);
    info!(
        "Connector at {}, card id at {}",
        config.services.connector_host, config.services.cardid_host
    );

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
