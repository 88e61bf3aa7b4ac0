//! Drives the router in-process with a fake classifier behind the
//! `Classifier` seam, so no model artifact is needed.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use scan_gateway::http::router;
use scan_gateway::model::Classifier;
use std::sync::Arc;
use tower::util::ServiceExt;

struct FixedLabel(&'static str);

impl Classifier for FixedLabel {
    fn predict(&self, _image: &image::DynamicImage) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

struct FailingModel;

impl Classifier for FailingModel {
    fn predict(&self, _image: &image::DynamicImage) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("tensor shape mismatch"))
    }
}

const BOUNDARY: &str = "scan-gateway-test-boundary";

fn multipart_body(field: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"scan.png\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn analyze_request(field: &str, bytes: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::ORIGIN, "http://example.com")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(field, bytes)))
        .unwrap()
}

fn sample_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(16, 16, image::Rgb([120, 120, 120]));
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn valid_image_returns_the_predicted_label() {
    let app = router(Arc::new(FixedLabel("2019-nCoV-Negative")));
    let resp = app.oneshot(analyze_request("file", &sample_png())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["result"], "2019-nCoV-Negative");
}

#[tokio::test]
async fn garbage_bytes_fail_decode_without_poisoning_the_model() {
    let app = router(Arc::new(FixedLabel("Mild")));

    let resp = app
        .clone()
        .oneshot(analyze_request("file", b"definitely not an image"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(resp).await["error"].is_string());

    // the shared handle still serves the next valid request
    let resp = app.oneshot(analyze_request("file", &sample_png())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["result"], "Mild");
}

#[tokio::test]
async fn missing_file_field_is_a_client_error() {
    let app = router(Arc::new(FixedLabel("Mild")));
    let resp = app.oneshot(analyze_request("upload", &sample_png())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_multipart_body_is_a_client_error() {
    let app = router(Arc::new(FixedLabel("Mild")));
    let req = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn inference_failure_is_a_server_error_for_that_request_only() {
    let app = router(Arc::new(FailingModel));
    let resp = app
        .clone()
        .oneshot(analyze_request("file", &sample_png()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // the process keeps serving; a second request gets the same answer
    let resp = app.oneshot(analyze_request("file", &sample_png())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn analyze_is_callable_cross_origin() {
    let app = router(Arc::new(FixedLabel("Mild")));

    let resp = app
        .clone()
        .oneshot(analyze_request("file", &sample_png()))
        .await
        .unwrap();
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/analyze")
        .header(header::ORIGIN, "http://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            "content-type,x-requested-with",
        )
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(preflight).await.unwrap();
    let allowed = resp
        .headers()
        .get("access-control-allow-headers")
        .unwrap()
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(allowed.contains("content-type"));
    assert!(allowed.contains("x-requested-with"));
}

#[tokio::test]
async fn readiness_probe_reports_ready() {
    let app = router(Arc::new(FixedLabel("Mild")));
    let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["ready"], true);
}

#[tokio::test]
async fn homepage_serves_the_upload_form() {
    let app = router(Arc::new(FixedLabel("Mild")));
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("/analyze"));
}
