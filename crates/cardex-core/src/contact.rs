//! The single record type held by the remote store.
//!
//! The store assigns `id` and `created_at`. Everything a user can type lives
//! in [`ContactFields`]; partial updates travel as a [`ContactPatch`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque, server-assigned contact identifier.
///
/// Backends key contacts by either a uuid or an integer identity column, so
/// the id deserializes from a JSON string or number and is always held as
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<String> for ContactId {
  fn from(id: String) -> Self { Self(id) }
}

impl From<&str> for ContactId {
  fn from(id: &str) -> Self { Self(id.to_owned()) }
}

impl From<Uuid> for ContactId {
  fn from(id: Uuid) -> Self { Self(id.to_string()) }
}

impl<'de> Deserialize<'de> for ContactId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Text(String),
      Signed(i64),
      Unsigned(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
      Raw::Text(s) => Self(s),
      Raw::Signed(n) => Self(n.to_string()),
      Raw::Unsigned(n) => Self(n.to_string()),
    })
  }
}

// ─── Fields ──────────────────────────────────────────────────────────────────

/// One of the four user-editable contact fields, in form order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
  FirstName,
  LastName,
  Email,
  PhoneNumber,
}

impl Field {
  /// Human-readable label, used as the form placeholder.
  pub fn label(self) -> &'static str {
    match self {
      Self::FirstName => "First Name",
      Self::LastName => "Last Name",
      Self::Email => "Email",
      Self::PhoneNumber => "Phone Number",
    }
  }
}

/// The editable part of a contact; also the create payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
  #[serde(default)]
  pub first_name:   String,
  #[serde(default)]
  pub last_name:    String,
  #[serde(default)]
  pub email:        String,
  #[serde(default)]
  pub phone_number: String,
}

impl ContactFields {
  pub fn get(&self, field: Field) -> &str {
    match field {
      Field::FirstName => &self.first_name,
      Field::LastName => &self.last_name,
      Field::Email => &self.email,
      Field::PhoneNumber => &self.phone_number,
    }
  }

  pub fn get_mut(&mut self, field: Field) -> &mut String {
    match field {
      Field::FirstName => &mut self.first_name,
      Field::LastName => &mut self.last_name,
      Field::Email => &mut self.email,
      Field::PhoneNumber => &mut self.phone_number,
    }
  }

  pub fn set(&mut self, field: Field, value: impl Into<String>) {
    *self.get_mut(field) = value.into();
  }
}

/// A partial update. Absent fields are left untouched by the store and are
/// not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub first_name:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_name:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone_number: Option<String>,
}

impl ContactPatch {
  pub fn get(&self, field: Field) -> Option<&str> {
    match field {
      Field::FirstName => self.first_name.as_deref(),
      Field::LastName => self.last_name.as_deref(),
      Field::Email => self.email.as_deref(),
      Field::PhoneNumber => self.phone_number.as_deref(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.first_name.is_none()
      && self.last_name.is_none()
      && self.email.is_none()
      && self.phone_number.is_none()
  }

  /// Overwrite the fields of `contact` that this patch carries.
  pub fn apply_to(&self, contact: &mut Contact) {
    if let Some(v) = &self.first_name {
      contact.first_name.clone_from(v);
    }
    if let Some(v) = &self.last_name {
      contact.last_name.clone_from(v);
    }
    if let Some(v) = &self.email {
      contact.email.clone_from(v);
    }
    if let Some(v) = &self.phone_number {
      contact.phone_number.clone_from(v);
    }
  }
}

impl From<ContactFields> for ContactPatch {
  fn from(f: ContactFields) -> Self {
    Self {
      first_name:   Some(f.first_name),
      last_name:    Some(f.last_name),
      email:        Some(f.email),
      phone_number: Some(f.phone_number),
    }
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A persisted contact as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:           ContactId,
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  pub phone_number: String,
  pub created_at:   DateTime<Utc>,
}

impl Contact {
  pub fn full_name(&self) -> String { format!("{} {}", self.first_name, self.last_name) }

  /// Copy the editable fields out of this record.
  pub fn fields(&self) -> ContactFields {
    ContactFields {
      first_name:   self.first_name.clone(),
      last_name:    self.last_name.clone(),
      email:        self.email.clone(),
      phone_number: self.phone_number.clone(),
    }
  }
}
