//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Classroom(#[from] stance_core::Error),

  /// The body was not JSON or did not match the expected shape.
  #[error("{}", .0.body_text())]
  Body(#[from] JsonRejection),

  #[error("{}", .0.body_text())]
  Path(#[from] PathRejection),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Classroom(e) => match e {
        stance_core::Error::UnknownTopic(_) => StatusCode::NOT_FOUND,
        e if e.is_validation() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
      },
      ApiError::Body(rejection) => rejection.status(),
      ApiError::Path(rejection) => rejection.status(),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
