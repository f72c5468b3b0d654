use std::sync::Arc;

use anyhow::Result;
use hedy_content::{config::Config, context::AppContext, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hedy_content=info".parse()?),
        )
        .init();

    info!("Starting Hedy content service");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(
        "Content from {} ({} cache)",
        config.content_dir.display(),
        config.cache_strategy
    );

    // Registry, keywords, then every content store
    let port = config.port;
    let ctx = AppContext::build(config)?;

    server::serve(Arc::new(ctx), port).await
}
