//! Startup sequencing: fill the artifact cache, then load the model.
//! Runs exactly once, before the listener is bound; any failure aborts
//! the process instead of serving without a model.

use crate::cache::{self, ArtifactDescriptor};
use crate::config::GatewayConfig;
use crate::error::BootstrapError;
use crate::model::ScanModel;
use std::time::Duration;
use tracing::info;

pub async fn bootstrap(cfg: &GatewayConfig) -> Result<ScanModel, BootstrapError> {
    let descriptor = ArtifactDescriptor {
        source_uri: cfg.model_url.clone(),
        local_path: cfg.model_path.clone(),
    };
    let path = cache::ensure_present(&descriptor, Duration::from_secs(cfg.fetch_timeout_secs)).await?;

    info!(path = %path.display(), "loading model");
    // deserialization is CPU-bound; run it off the reactor
    let model = tokio::task::spawn_blocking(move || ScanModel::load(&path))
        .await
        .map_err(|e| BootstrapError::Load(anyhow::anyhow!("load task aborted: {e}")))??;
    info!("model ready");
    Ok(model)
}
