//! The PostgREST implementation of [`ContactStore`].

use std::time::Duration;

use cardex_core::{
  contact::{Contact, ContactFields, ContactId, ContactPatch},
  store::ContactStore,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Error, PostgrestConfig, Result};

/// Ask PostgREST to echo the rows a write touched.
const RETURN_REPRESENTATION: &str = "return=representation";

/// Error body shape returned by PostgREST on failure. `code`, `details`,
/// and `hint` are also sent but only the message is surfaced.
#[derive(Deserialize)]
struct ErrorBody {
  message: String,
}

/// A contact store backed by a hosted PostgREST collection.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct PostgrestStore {
  client:   Client,
  endpoint: String,
  api_key:  String,
}

impl PostgrestStore {
  pub fn new(config: &PostgrestConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    Ok(Self {
      client,
      endpoint: config.endpoint(),
      api_key: config.api_key.clone(),
    })
  }

  pub fn endpoint(&self) -> &str { &self.endpoint }

  fn request(&self, method: Method) -> RequestBuilder {
    self
      .client
      .request(method, &self.endpoint)
      .header("apikey", &self.api_key)
      .bearer_auth(&self.api_key)
  }

  /// Send `req` and decode the JSON row array it answers with.
  async fn rows(&self, op: &'static str, req: RequestBuilder) -> Result<Vec<Contact>> {
    debug!(op, endpoint = %self.endpoint, "postgrest request");
    let resp = req.send().await.inspect_err(|e| {
      warn!(op, error = %e, "postgrest request failed");
    })?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      let message = error_message(status, &body);
      warn!(op, %status, %message, "postgrest rejected request");
      return Err(Error::Remote { status, message });
    }

    if status == StatusCode::NO_CONTENT {
      return Ok(Vec::new());
    }
    Ok(resp.json().await?)
  }
}

/// Pull the backend's message out of an error body, falling back to the
/// status line and raw text.
fn error_message(status: StatusCode, body: &str) -> String {
  if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
    return parsed.message;
  }
  let body = body.trim();
  if body.is_empty() {
    status.to_string()
  } else {
    format!("{status}: {body}")
  }
}

fn id_filter(id: &ContactId) -> [(&'static str, String); 1] { [("id", format!("eq.{id}"))] }

impl ContactStore for PostgrestStore {
  type Error = Error;

  async fn list(&self) -> Result<Vec<Contact>> {
    let req = self
      .request(Method::GET)
      .query(&[("select", "*"), ("order", "created_at.desc")]);
    self.rows("list", req).await
  }

  async fn create(&self, fields: ContactFields) -> Result<Vec<Contact>> {
    let req = self
      .request(Method::POST)
      .header("Prefer", RETURN_REPRESENTATION)
      .json(&[fields]);
    self.rows("create", req).await
  }

  async fn update(&self, id: ContactId, patch: ContactPatch) -> Result<Vec<Contact>> {
    let req = self
      .request(Method::PATCH)
      .query(&id_filter(&id))
      .header("Prefer", RETURN_REPRESENTATION)
      .json(&patch);
    self.rows("update", req).await
  }

  async fn delete(&self, id: ContactId) -> Result<Vec<Contact>> {
    let req = self
      .request(Method::DELETE)
      .query(&id_filter(&id))
      .header("Prefer", RETURN_REPRESENTATION);
    self.rows("delete", req).await
  }
}

#[cfg(test)]
mod unit {
  use super::*;

  #[test]
  fn message_prefers_json_body() {
    let body = r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key"}"#;
    assert_eq!(error_message(StatusCode::CONFLICT, body), "duplicate key");
  }

  #[test]
  fn message_falls_back_to_status_and_text() {
    assert_eq!(
      error_message(StatusCode::BAD_GATEWAY, "upstream down\n"),
      "502 Bad Gateway: upstream down"
    );
    assert_eq!(
      error_message(StatusCode::SERVICE_UNAVAILABLE, ""),
      "503 Service Unavailable"
    );
  }
}
