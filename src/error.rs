//! Backend error type and its HTTP mapping.

use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde_json::json;
use thiserror::Error;

use crate::import::NotReady;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  /// History file or config file I/O
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Configuration error: {0}")]
  Config(#[from] toml::de::Error),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Invalid input: {0}")]
  InvalidInput(String),

  #[error("Import not ready: {0}")]
  ImportNotReady(#[from] NotReady),

  /// Body that is not JSON, or JSON of the wrong shape
  #[error("Invalid request body: {0}")]
  Body(#[from] JsonRejection),
}

impl Error {
  pub fn status(&self) -> StatusCode {
    match self {
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::InvalidInput(_) | Error::ImportNotReady(_) => StatusCode::UNPROCESSABLE_ENTITY,
      Error::Body(rejection) => rejection.status(),
      Error::Io(_) | Error::Json(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(target: "wippf_backend", error = %self, "Request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
