//! The `ContactStore` trait: the data access seam.
//!
//! Implemented by `cardex-postgrest` against a hosted database and by
//! [`MemoryStore`](crate::memory::MemoryStore) for tests. Front ends receive
//! a constructed store at composition time; there is no global client.

use std::future::Future;

use crate::contact::{Contact, ContactFields, ContactId, ContactPatch};

/// Abstraction over the remote `contacts` collection.
///
/// No method retries. Failures are reported through `Self::Error`, whose
/// display text is the backend's own message.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All contacts, newest `created_at` first.
  fn list(&self) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Insert one record. Returns the inserted rows as the store reports them.
  fn create(
    &self,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Apply `patch` to the record with `id` and return the affected rows.
  ///
  /// An `id` matching nothing is not an error; the result is simply empty.
  fn update(
    &self,
    id: ContactId,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Remove the record with `id` and return the removed rows.
  ///
  /// Like [`update`](Self::update), a missing `id` yields an empty result.
  fn delete(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;
}
