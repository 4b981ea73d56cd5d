//! PostgREST backend for the Cardex contact store.
//!
//! Speaks the REST dialect exposed by hosted Postgres services such as
//! Supabase (`/rest/v1/{table}` with `apikey` auth). One HTTP round trip per
//! store call; no retries.

mod config;
mod store;

pub mod error;

pub use config::PostgrestConfig;
pub use error::{Error, Result};
pub use store::PostgrestStore;
