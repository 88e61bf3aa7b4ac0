use anyhow::Result;
use scan_gateway::{bootstrap, config, http};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cfg = config::load()?;
    info!(?cfg, "config loaded");

    // no listener until the model is ready; a bootstrap failure exits non-zero
    let model = bootstrap::bootstrap(&cfg).await?;
    let app = http::router(Arc::new(model));

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    info!(addr = %cfg.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
