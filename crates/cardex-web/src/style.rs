//! Presentation settings for the contact page.
//!
//! One page component renders every variant; the differences live here
//! instead of in separate page copies.

use serde::Deserialize;
use strum::AsRefStr;

/// How the draft form's inputs are arranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
  /// All inputs and the submit button on one row.
  #[default]
  Inline,
  /// One input per row, submit button underneath.
  Stacked,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageStyle {
  #[serde(default = "default_title")]
  pub title:  String,
  #[serde(default)]
  pub layout: Layout,
  /// CSS colour used for the submit and delete buttons.
  #[serde(default = "default_accent")]
  pub accent: String,
}

impl Default for PageStyle {
  fn default() -> Self {
    Self {
      title:  default_title(),
      layout: Layout::default(),
      accent: default_accent(),
    }
  }
}

fn default_title() -> String { "Contact List".to_owned() }

fn default_accent() -> String { "#ef4444".to_owned() }
