//! Core types and trait definitions for the Cardex contact manager.
//!
//! This crate is deliberately free of HTTP dependencies. The remote store
//! (`cardex-postgrest`) and every front end depend on it.

pub mod contact;
pub mod controller;
pub mod error;
pub mod memory;
pub mod store;
pub mod validate;

pub use error::{Error, RemoteError, Result, ValidationError};
