//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use cardex_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  /// The remote store rejected or failed the call.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response(),
      ApiError::Validation(e) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "field": e.field, "error": e.message })),
      )
        .into_response(),
      ApiError::Store(e) => {
        tracing::warn!(error = %e, "store call failed");
        (StatusCode::BAD_GATEWAY, Json(json!({ "error": e.to_string() }))).into_response()
      }
    }
  }
}
