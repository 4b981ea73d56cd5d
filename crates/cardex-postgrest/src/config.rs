//! Connection settings for a PostgREST endpoint.

use serde::Deserialize;

/// Where the `contacts` collection lives and how to reach it.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgrestConfig {
  /// Project base URL, e.g. `https://xyz.supabase.co`.
  pub url:          String,
  /// Sent as both the `apikey` header and the bearer token.
  pub api_key:      String,
  #[serde(default = "default_table")]
  pub table:        String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl PostgrestConfig {
  pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
    Self {
      url:          url.into(),
      api_key:      api_key.into(),
      table:        default_table(),
      timeout_secs: default_timeout_secs(),
    }
  }

  /// Full collection endpoint, `{url}/rest/v1/{table}`.
  pub fn endpoint(&self) -> String {
    format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
  }
}

fn default_table() -> String { "contacts".to_owned() }

fn default_timeout_secs() -> u64 { 30 }
