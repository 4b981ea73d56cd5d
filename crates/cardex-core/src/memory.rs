//! [`MemoryStore`] — an in-process [`ContactStore`] for tests and demos.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use crate::{
  contact::{Contact, ContactFields, ContactId, ContactPatch},
  error::RemoteError,
  store::ContactStore,
};

#[derive(Default)]
struct Inner {
  /// Insertion order.
  rows:      Vec<Contact>,
  fail_next: Option<String>,
  mutations: usize,
}

/// A contact store held entirely in memory.
///
/// Cloning is cheap and clones share the same rows.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Seed the store with existing records.
  pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
    let store = Self::new();
    store.lock().rows.extend(contacts);
    store
  }

  /// Make the next store call fail with `message`.
  pub fn fail_next(&self, message: impl Into<String>) {
    self.lock().fail_next = Some(message.into());
  }

  /// Number of create, update, and delete calls that reached the store.
  pub fn mutations(&self) -> usize { self.lock().mutations }

  pub fn len(&self) -> usize { self.lock().rows.len() }

  pub fn is_empty(&self) -> bool { self.lock().rows.is_empty() }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Lock, consuming any pending injected failure.
  fn enter(&self, mutating: bool) -> Result<MutexGuard<'_, Inner>, RemoteError> {
    let mut inner = self.lock();
    if mutating {
      inner.mutations += 1;
    }
    match inner.fail_next.take() {
      Some(message) => Err(RemoteError::new(message)),
      None => Ok(inner),
    }
  }
}

impl ContactStore for MemoryStore {
  type Error = RemoteError;

  async fn list(&self) -> Result<Vec<Contact>, RemoteError> {
    let inner = self.enter(false)?;
    // Newest insert first, then a stable sort keeps that order on ties.
    let mut rows: Vec<Contact> = inner.rows.iter().rev().cloned().collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(rows)
  }

  async fn create(&self, fields: ContactFields) -> Result<Vec<Contact>, RemoteError> {
    let mut inner = self.enter(true)?;
    let contact = Contact {
      id:           ContactId::from(Uuid::new_v4()),
      first_name:   fields.first_name,
      last_name:    fields.last_name,
      email:        fields.email,
      phone_number: fields.phone_number,
      created_at:   Utc::now(),
    };
    inner.rows.push(contact.clone());
    Ok(vec![contact])
  }

  async fn update(
    &self,
    id: ContactId,
    patch: ContactPatch,
  ) -> Result<Vec<Contact>, RemoteError> {
    let mut inner = self.enter(true)?;
    let mut affected = Vec::new();
    for row in inner.rows.iter_mut().filter(|r| r.id == id) {
      patch.apply_to(row);
      affected.push(row.clone());
    }
    Ok(affected)
  }

  async fn delete(&self, id: ContactId) -> Result<Vec<Contact>, RemoteError> {
    let mut inner = self.enter(true)?;
    let (removed, kept): (Vec<Contact>, Vec<Contact>) = std::mem::take(&mut inner.rows)
      .into_iter()
      .partition(|r| r.id == id);
    inner.rows = kept;
    Ok(removed)
  }
}
