//! Artifact cache: make sure the model file exists locally, fetching it
//! over HTTP at most once. Presence on disk short-circuits the network
//! entirely; there is no checksum and no expiry.

use crate::error::BootstrapError;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ArtifactDescriptor {
    pub source_uri: String,
    pub local_path: PathBuf,
}

/// Return the local path of the artifact, downloading it first if absent.
///
/// The body is buffered, written to a `.part` scratch file in the same
/// directory and then renamed: the cache path is either absent or a
/// complete artifact, never a partial write.
pub async fn ensure_present(
    descriptor: &ArtifactDescriptor,
    timeout: Duration,
) -> Result<PathBuf, BootstrapError> {
    if descriptor.local_path.exists() {
        debug!(path = %descriptor.local_path.display(), "artifact already cached, skipping fetch");
        return Ok(descriptor.local_path.clone());
    }

    info!(uri = %descriptor.source_uri, "fetching model artifact");
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(BootstrapError::Fetch)?;
    let body = client
        .get(&descriptor.source_uri)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(BootstrapError::Fetch)?
        .bytes()
        .await
        .map_err(BootstrapError::Fetch)?;

    if let Some(parent) = descriptor.local_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let part = descriptor.local_path.with_extension("part");
    tokio::fs::write(&part, &body).await?;
    tokio::fs::rename(&part, &descriptor.local_path).await?;
    info!(path = %descriptor.local_path.display(), bytes = body.len(), "artifact cached");
    Ok(descriptor.local_path.clone())
}
