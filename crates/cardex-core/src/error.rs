//! Error types for `cardex-core`.

use thiserror::Error;

use crate::contact::Field;

/// A failure reported by the remote store.
///
/// Carries the backend's message verbatim. Network failures and constraint
/// violations are not distinguished.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
  pub message: String,
}

impl RemoteError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }

  /// Flatten any store backend error into its display text.
  pub fn from_store<E: std::error::Error>(err: &E) -> Self { Self::new(err.to_string()) }
}

/// A local field-rule failure. Never reaches the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
  pub field:   Field,
  pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error(transparent)]
  Remote(#[from] RemoteError),

  #[error(transparent)]
  Validation(#[from] ValidationError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
