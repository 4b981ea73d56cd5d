//! JSON REST API for Cardex.
//!
//! Exposes an axum [`Router`] backed by any [`cardex_core::store::ContactStore`].
//! Writes are checked against the same field rules the form uses before they
//! reach the store.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", cardex_api::api_router(store.clone()))
//! ```

pub mod contacts;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch},
};
use cardex_core::store::ContactStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route("/contacts/{id}", patch(contacts::update::<S>).delete(contacts::delete::<S>))
    .with_state(store)
}
