//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  #[error(transparent)]
  Sync(#[from] shelf_sync::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": "unauthorized" }))).into_response()
      }
      Error::Sync(e) => {
        let status = match e {
          shelf_sync::Error::NotConfigured | shelf_sync::Error::AlreadyRunning => {
            StatusCode::SERVICE_UNAVAILABLE
          }
          shelf_sync::Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "success": false, "error": e.to_string() }))).into_response()
      }
    }
  }
}
