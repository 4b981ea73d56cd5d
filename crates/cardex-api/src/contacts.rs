//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | Newest first |
//! | `POST`   | `/contacts` | Body: [`ContactFields`]; 201 + inserted rows |
//! | `PATCH`  | `/contacts/{id}` | Body: [`ContactPatch`]; affected rows, possibly none |
//! | `DELETE` | `/contacts/{id}` | Removed rows, possibly none |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use cardex_core::{
  contact::{Contact, ContactFields, ContactId, ContactPatch},
  store::ContactStore,
  validate,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = store
    .list()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — missing fields are treated as empty and fail
/// validation like any other empty value.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<ContactFields>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  validate::contact(&body)?;
  let inserted = store
    .create(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(inserted)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /contacts/{id}`: only the fields present in the body are checked
/// and written.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<ContactPatch>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  if body.is_empty() {
    return Err(ApiError::BadRequest("no fields to update".into()));
  }
  validate::patch(&body)?;
  let affected = store
    .update(ContactId::from(id), body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(affected))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let removed = store
    .delete(ContactId::from(id))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(removed))
}
