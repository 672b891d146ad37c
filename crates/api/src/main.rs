use std::sync::Arc;

use anyhow::Context;

use supplyline_api::{ApiConfig, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    supplyline_observability::init(config.log_format);

    let services = Arc::new(app::services::build_services(&config)?);
    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
