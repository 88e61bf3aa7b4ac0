//! CT-scan classification gateway.
//!
//! On startup the service downloads a pre-trained model artifact into a
//! local cache (at most once), loads it, and only then binds the HTTP
//! listener. `POST /analyze` accepts a multipart image upload and returns
//! the predicted class label as JSON.

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod labels;
pub mod model;
