//! Form controller shared by every front end.
//!
//! Holds the list as last read from the store, the draft bound to the form,
//! and a single error slot. Every successful mutation is followed by a full
//! re-read of the list; local state is never patched in place.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
  contact::{Contact, ContactFields, ContactId, ContactPatch, Field},
  error::{Error, RemoteError, Result, ValidationError},
  store::ContactStore,
  validate,
};

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Whether submitting the draft creates a record or updates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  Create,
  Editing(ContactId),
}

/// The in-progress field values bound to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
  /// Set while editing an existing record.
  pub id:     Option<ContactId>,
  pub fields: ContactFields,
}

impl Draft {
  pub fn mode(&self) -> Mode {
    match &self.id {
      Some(id) => Mode::Editing(id.clone()),
      None => Mode::Create,
    }
  }

  fn from_contact(contact: &Contact) -> Self {
    Self {
      id:     Some(contact.id.clone()),
      fields: contact.fields(),
    }
  }
}

/// What a successful [`FormController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
  /// Rows reported by the store's insert.
  Created(Vec<Contact>),
  /// Rows the update touched; empty when the id no longer matched.
  Updated(Vec<Contact>),
}

// ─── Controller ──────────────────────────────────────────────────────────────

pub struct FormController<S> {
  store:       Arc<S>,
  contacts:    Vec<Contact>,
  draft:       Draft,
  error:       Option<Error>,
  /// The error slot holds a failed list read, which the next successful
  /// read clears. Mutation failures stay until the user acts again.
  list_failed: bool,
}

impl<S: ContactStore> FormController<S> {
  /// Create a controller with an empty list. Call [`reload`](Self::reload)
  /// to populate it.
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      contacts: Vec::new(),
      draft: Draft::default(),
      error: None,
      list_failed: false,
    }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn contacts(&self) -> &[Contact] { &self.contacts }

  pub fn draft(&self) -> &Draft { &self.draft }

  pub fn mode(&self) -> Mode { self.draft.mode() }

  pub fn error(&self) -> Option<&Error> { self.error.as_ref() }

  /// Text for the form's error line, if any.
  pub fn error_message(&self) -> Option<String> { self.error.as_ref().map(ToString::to_string) }

  // ── Draft editing ─────────────────────────────────────────────────────────

  /// Replace one draft field, as a form input change does.
  pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
    self.draft.fields.set(field, value);
  }

  /// Replace all four draft fields at once, keeping the current mode.
  pub fn set_fields(&mut self, fields: ContactFields) { self.draft.fields = fields; }

  /// Copy the listed contact with `id` into the draft and enter edit mode.
  ///
  /// Returns `false`, leaving the draft untouched, if `id` is not listed.
  pub fn edit(&mut self, id: &ContactId) -> bool {
    match self.contacts.iter().find(|c| &c.id == id) {
      Some(contact) => {
        self.draft = Draft::from_contact(contact);
        self.error = None;
        true
      }
      None => false,
    }
  }

  /// Drop the draft and any message with it, returning to create mode.
  pub fn cancel(&mut self) {
    self.draft = Draft::default();
    self.error = None;
  }

  /// Run the field rules over the draft, updating the error slot.
  pub fn validate(&mut self) -> Result<(), ValidationError> {
    match validate::contact(&self.draft.fields) {
      Ok(()) => {
        self.error = None;
        self.list_failed = false;
        Ok(())
      }
      Err(e) => {
        self.error = Some(e.into());
        self.list_failed = false;
        Err(e)
      }
    }
  }

  // ── Store round trips ─────────────────────────────────────────────────────

  /// Replace the list with a fresh read from the store.
  ///
  /// On failure the previous list is kept and the message is surfaced.
  /// A message from an earlier failed create, update, or delete survives a
  /// successful read.
  pub async fn reload(&mut self) -> Result<()> {
    let store = Arc::clone(&self.store);
    match store.list().await {
      Ok(contacts) => {
        debug!(count = contacts.len(), "contacts reloaded");
        self.contacts = contacts;
        if self.list_failed {
          self.error = None;
          self.list_failed = false;
        }
        Ok(())
      }
      Err(e) => Err(self.remote_failure("list", &e)),
    }
  }

  /// Validate the draft and send it to the store.
  ///
  /// Updates when the draft's id names a listed contact, otherwise creates.
  /// On success the draft resets to create mode and the list is re-read.
  /// On any failure the draft is kept as it was.
  pub async fn submit(&mut self) -> Result<Submitted> {
    self.validate()?;

    let store = Arc::clone(&self.store);
    let fields = self.draft.fields.clone();
    let submitted = match self.update_target() {
      Some(id) => {
        debug!(%id, "updating contact");
        let rows = store
          .update(id, ContactPatch::from(fields))
          .await
          .map_err(|e| self.remote_failure("update", &e))?;
        Submitted::Updated(rows)
      }
      None => {
        debug!("creating contact");
        let rows = store
          .create(fields)
          .await
          .map_err(|e| self.remote_failure("create", &e))?;
        Submitted::Created(rows)
      }
    };

    self.draft = Draft::default();
    self.reload().await?;
    Ok(submitted)
  }

  /// Delete the contact with `id`, then re-read the list.
  pub async fn delete(&mut self, id: &ContactId) -> Result<Vec<Contact>> {
    let store = Arc::clone(&self.store);
    debug!(%id, "deleting contact");
    let removed = store
      .delete(id.clone())
      .await
      .map_err(|e| self.remote_failure("delete", &e))?;
    self.error = None;
    self.reload().await?;
    Ok(removed)
  }

  /// The id to update, if the draft is editing a contact that is still
  /// listed. A stale id falls back to creating a new record.
  fn update_target(&self) -> Option<ContactId> {
    self
      .draft
      .id
      .as_ref()
      .filter(|id| self.contacts.iter().any(|c| &c.id == *id))
      .cloned()
  }

  fn remote_failure(&mut self, op: &str, err: &S::Error) -> Error {
    let err = Error::from(RemoteError::from_store(err));
    warn!(op, error = %err, "store call failed");
    self.error = Some(err.clone());
    self.list_failed = op == "list";
    err
  }
}
