use crate::app_config::AppConfig;
use crate::command::{CommandDispatcher, UrlResolver};
use crate::gateway::CommandGateway;
use crate::metadata::HttpMetadataClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod app_config;
mod catalogue;
mod command;
mod domain;
mod gateway;
mod http;
mod metadata;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let metadata = HttpMetadataClient::new(&config)?;
    info!(url = config.metadata().url(), "✅  Initialized metadata client");

    let gateway = CommandGateway::new(
        Arc::new(metadata),
        UrlResolver::default(),
        CommandDispatcher::new(config.dispatch().timeout())?,
        config.catalogue().clone(),
    );

    let listener = TcpListener::bind(config.server().bind_address()).await?;
    info!("🔥 {} is up and running on {}", env!("CARGO_PKG_NAME"), listener.local_addr()?);

    axum::serve(listener, http::router(Arc::new(gateway))).await?;

    Ok(())
}
