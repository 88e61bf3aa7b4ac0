//! HTTP surface: the upload page, a readiness probe and the `/analyze`
//! classification endpoint. The router is built from an already-loaded
//! model handle, so the endpoint cannot exist before bootstrap finished.

use crate::error::AnalyzeError;
use crate::model::Classifier;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, HeaderName};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn Classifier>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: String,
}

pub fn router(model: Arc<dyn Classifier>) -> Router {
    // callable from arbitrary web front-ends: any origin, the two
    // headers browsers send with the upload form
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-requested-with")]);
    Router::new()
        .route("/", get(homepage))
        .route("/healthz", get(healthz))
        .route("/analyze", post(analyze))
        // scan exports can exceed axum's 2 MiB default
        .layer(DefaultBodyLimit::max(32 * 1024 * 1024))
        .layer(cors)
        .with_state(AppState { model })
}

async fn homepage() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn healthz() -> Json<serde_json::Value> {
    // the router only exists once bootstrap returned a model
    Json(serde_json::json!({ "ready": true }))
}

async fn analyze(
    State(state): State<AppState>,
    mut form: Multipart,
) -> Result<Json<AnalyzeResponse>, AnalyzeError> {
    let mut upload = None;
    while let Some(field) = form.next_field().await? {
        if field.name() == Some("file") {
            upload = Some(field.bytes().await?);
            break;
        }
    }
    let bytes = upload.ok_or(AnalyzeError::MissingFile)?;
    let image = image::load_from_memory(&bytes)?;

    // predict is synchronous and CPU-bound; keep it off the reactor
    let model = Arc::clone(&state.model);
    let label = tokio::task::spawn_blocking(move || model.predict(&image))
        .await
        .map_err(|e| AnalyzeError::Inference(format!("prediction task aborted: {e}")))?
        .map_err(|e| AnalyzeError::Inference(format!("{e:#}")))?;
    Ok(Json(AnalyzeResponse { result: label }))
}
