//! Error taxonomies for the two phases of the service: startup failures
//! are fatal and abort the process, request failures are isolated to the
//! request that triggered them.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::warn;

/// Substring emitted by loaders when an artifact exported under a
/// GPU-only configuration is opened on a CPU-only host.
pub const GPU_EXPORT_SIGNATURE: &str = "CPU-only machine";

/// Remediation surfaced with [`BootstrapError::IncompatibleEnvironment`].
pub const REMEDIATION: &str =
    "re-export the model with a CPU-compatible configuration and redeploy the artifact";

/// Startup-phase failures. All of these abort bootstrap; none are retried.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("artifact fetch failed: {0}")]
    Fetch(#[source] reqwest::Error),

    #[error("artifact cache write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("model cannot run on this CPU-only host: {detail}; {}", REMEDIATION)]
    IncompatibleEnvironment { detail: String },

    #[error("model load failed: {0:#}")]
    Load(anyhow::Error),
}

/// Split a deserialization failure into the actionable hardware-mismatch
/// case and the generic one. The signature is matched against the whole
/// error chain, not just the top frame.
pub fn classify_load_error(err: anyhow::Error) -> BootstrapError {
    let detail = format!("{err:#}");
    if detail.contains(GPU_EXPORT_SIGNATURE) {
        BootstrapError::IncompatibleEnvironment { detail }
    } else {
        BootstrapError::Load(err)
    }
}

/// Request-phase failures on `/analyze`. Each maps to an HTTP status and
/// a JSON body; none of them touch the shared model handle.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("multipart form did not contain a 'file' field")]
    MissingFile,

    #[error("malformed multipart request: {0}")]
    Multipart(#[from] MultipartError),

    #[error("uploaded bytes are not a decodable image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl AnalyzeError {
    fn status(&self) -> StatusCode {
        match self {
            AnalyzeError::MissingFile | AnalyzeError::Multipart(_) => StatusCode::BAD_REQUEST,
            AnalyzeError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AnalyzeError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
