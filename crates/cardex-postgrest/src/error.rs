//! Error type for `cardex-postgrest`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The endpoint answered with a non-success status. `message` is taken
  /// from the `{"message": ...}` error body when there is one.
  #[error("{message}")]
  Remote { status: StatusCode, message: String },

  /// The request never completed, or the response body was not the
  /// expected JSON.
  #[error("{0}")]
  Http(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
