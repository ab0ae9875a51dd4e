use hypermaze::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), HypermazeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        bind = %config.bind_addr,
        block_size = config.coordinator.block_size,
        max_members = config.coordinator.max_members,
        "starting hypermaze"
    );

    let server = HypermazeServer::builder()
        .config(config)
        .build(CarvedMazeEngine::new())
        .await?;
    server.run().await
}
