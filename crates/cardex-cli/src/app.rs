//! Application state machine and event dispatcher.

use std::sync::Arc;

use cardex_core::{
  contact::{Contact, ContactId, Field},
  controller::{FormController, Mode, Submitted},
  store::ContactStore,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use strum::IntoEnumIterator;

// ─── Focus ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  /// Keyboard drives the contact list.
  List,
  /// Keyboard types into one draft field.
  Form(Field),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  /// Current keyboard focus.
  pub focus: Focus,

  /// Draft, list, and error slot shared with the web page's logic.
  pub ctl: FormController<S>,

  /// Current fuzzy-filter string (only active when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* contact list.
  pub list_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl<S: ContactStore> App<S> {
  /// Create an [`App`] with an empty contact list.
  pub fn new(store: Arc<S>) -> Self {
    Self {
      focus: Focus::List,
      ctl: FormController::new(store),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      status_msg: String::new(),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Re-read all contacts. Failures land in the form's error line.
  pub async fn reload(&mut self) {
    self.status_msg = "Loading contacts…".into();
    if self.ctl.reload().await.is_ok() {
      self.status_msg.clear();
    } else {
      self.status_msg = "Could not load contacts".into();
    }
    self.clamp_cursor();
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Returns contacts that match the current filter query.
  pub fn filtered_contacts(&self) -> Vec<&Contact> {
    if self.filter.is_empty() {
      return self.ctl.contacts().iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .ctl
      .contacts()
      .iter()
      .filter(|c| {
        matcher.fuzzy_match(&c.full_name(), &self.filter).is_some()
          || matcher.fuzzy_match(&c.email, &self.filter).is_some()
          || matcher.fuzzy_match(&c.phone_number, &self.filter).is_some()
      })
      .collect()
  }

  /// The id of the contact under the list cursor in the filtered view.
  pub fn cursor_id(&self) -> Option<ContactId> {
    self
      .filtered_contacts()
      .get(self.list_cursor)
      .map(|c| c.id.clone())
  }

  fn clamp_cursor(&mut self) {
    let len = self.filtered_contacts().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return true;
    }

    match self.focus {
      Focus::List => self.handle_list_key(key).await,
      Focus::Form(field) => {
        self.handle_form_key(field, key).await;
        true
      }
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
      }
      KeyCode::Enter => self.filter_active = false,
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => self.filter.push(c),
      _ => {}
    }
    self.list_cursor = 0;
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      // Quit
      KeyCode::Char('q') => return false,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_contacts().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Edit selected
      KeyCode::Enter | KeyCode::Char('e') => {
        if let Some(id) = self.cursor_id()
          && self.ctl.edit(&id)
        {
          self.focus = Focus::Form(Field::FirstName);
          self.status_msg.clear();
        }
      }

      // Delete selected, no confirmation
      KeyCode::Char('d') => {
        if let Some(id) = self.cursor_id() {
          match self.ctl.delete(&id).await {
            Ok(_) => self.status_msg = "Contact deleted".into(),
            Err(_) => self.status_msg = "Delete failed".into(),
          }
          self.clamp_cursor();
        }
      }

      // New contact
      KeyCode::Char('n') | KeyCode::Tab => {
        if key.code == KeyCode::Char('n') {
          self.ctl.cancel();
        }
        self.focus = Focus::Form(Field::FirstName);
      }

      KeyCode::Char('r') => self.reload().await,

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      _ => {}
    }
    true
  }

  async fn handle_form_key(&mut self, field: Field, key: KeyEvent) {
    match key.code {
      KeyCode::Tab | KeyCode::Down => self.focus = Focus::Form(next_field(field)),
      KeyCode::BackTab | KeyCode::Up => self.focus = Focus::Form(prev_field(field)),

      KeyCode::Esc => {
        if matches!(self.ctl.mode(), Mode::Editing(_)) {
          self.ctl.cancel();
          self.status_msg = "Edit cancelled".into();
        }
        self.focus = Focus::List;
      }

      KeyCode::Enter => self.submit().await,

      KeyCode::Backspace => {
        let mut value = self.ctl.draft().fields.get(field).to_owned();
        value.pop();
        self.ctl.set_field(field, value);
      }
      KeyCode::Char(c) => {
        let mut value = self.ctl.draft().fields.get(field).to_owned();
        value.push(c);
        self.ctl.set_field(field, value);
      }

      _ => {}
    }
  }

  async fn submit(&mut self) {
    match self.ctl.submit().await {
      Ok(Submitted::Created(_)) => {
        self.status_msg = "Contact added".into();
        self.focus = Focus::Form(Field::FirstName);
      }
      Ok(Submitted::Updated(_)) => {
        self.status_msg = "Contact saved".into();
        self.focus = Focus::List;
      }
      // The controller's error slot carries the message.
      Err(_) => self.status_msg.clear(),
    }
    self.clamp_cursor();
  }
}

fn next_field(field: Field) -> Field {
  Field::iter()
    .cycle()
    .skip_while(|f| *f != field)
    .nth(1)
    .unwrap_or(field)
}

fn prev_field(field: Field) -> Field {
  Field::iter()
    .rev()
    .cycle()
    .skip_while(|f| *f != field)
    .nth(1)
    .unwrap_or(field)
}

#[cfg(test)]
mod tests {
  use cardex_core::memory::MemoryStore;

  use super::*;

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  async fn type_str(app: &mut App<MemoryStore>, s: &str) {
    for c in s.chars() {
      app.handle_key(key(KeyCode::Char(c))).await;
    }
  }

  async fn fill_jo(app: &mut App<MemoryStore>) {
    app.handle_key(key(KeyCode::Char('n'))).await;
    for value in ["Jo", "Lee", "a@b.co", "1234567890"] {
      type_str(app, value).await;
      app.handle_key(key(KeyCode::Tab)).await;
    }
  }

  async fn app() -> (MemoryStore, App<MemoryStore>) {
    let store = MemoryStore::new();
    let mut app = App::new(Arc::new(store.clone()));
    app.reload().await;
    (store, app)
  }

  #[test]
  fn field_focus_wraps() {
    assert_eq!(next_field(Field::PhoneNumber), Field::FirstName);
    assert_eq!(prev_field(Field::FirstName), Field::PhoneNumber);
    assert_eq!(next_field(Field::FirstName), Field::LastName);
  }

  #[tokio::test]
  async fn typing_and_enter_creates_contact() {
    let (store, mut app) = app().await;
    fill_jo(&mut app).await;
    assert_eq!(app.focus, Focus::Form(Field::FirstName));

    app.handle_key(key(KeyCode::Enter)).await;
    assert_eq!(store.len(), 1);
    assert_eq!(app.ctl.contacts().len(), 1);
    assert_eq!(app.status_msg, "Contact added");
    assert!(app.ctl.draft().fields.first_name.is_empty());
  }

  #[tokio::test]
  async fn invalid_form_shows_error_without_store_call() {
    let (store, mut app) = app().await;
    app.handle_key(key(KeyCode::Tab)).await;
    type_str(&mut app, "Jo").await;
    app.handle_key(key(KeyCode::Enter)).await;

    assert_eq!(store.mutations(), 0);
    assert_eq!(
      app.ctl.error_message().as_deref(),
      Some("Last name is required")
    );
  }

  #[tokio::test]
  async fn edit_and_save_updates_selected() {
    let (store, mut app) = app().await;
    fill_jo(&mut app).await;
    app.handle_key(key(KeyCode::Enter)).await;
    app.handle_key(key(KeyCode::Esc)).await;
    assert_eq!(app.focus, Focus::List);

    app.handle_key(key(KeyCode::Char('e'))).await;
    assert!(matches!(app.ctl.mode(), Mode::Editing(_)));
    type_str(&mut app, "anne").await;
    app.handle_key(key(KeyCode::Enter)).await;

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].first_name, "Joanne");
    assert_eq!(app.focus, Focus::List);
    assert_eq!(app.ctl.mode(), Mode::Create);
  }

  #[tokio::test]
  async fn esc_cancels_edit() {
    let (_store, mut app) = app().await;
    fill_jo(&mut app).await;
    app.handle_key(key(KeyCode::Enter)).await;
    app.handle_key(key(KeyCode::Esc)).await;
    app.handle_key(key(KeyCode::Char('e'))).await;

    app.handle_key(key(KeyCode::Esc)).await;
    assert_eq!(app.ctl.mode(), Mode::Create);
    assert_eq!(app.status_msg, "Edit cancelled");
  }

  #[tokio::test]
  async fn delete_removes_selected() {
    let (store, mut app) = app().await;
    fill_jo(&mut app).await;
    app.handle_key(key(KeyCode::Enter)).await;
    app.handle_key(key(KeyCode::Esc)).await;

    app.handle_key(key(KeyCode::Char('d'))).await;
    assert!(store.is_empty());
    assert!(app.ctl.contacts().is_empty());
    assert_eq!(app.list_cursor, 0);
  }

  #[tokio::test]
  async fn filter_narrows_list() {
    let store = MemoryStore::new();
    for (first, email) in [("Jo", "jo@b.co"), ("Alice", "alice@b.co")] {
      store
        .create(cardex_core::contact::ContactFields {
          first_name:   first.into(),
          last_name:    "Lee".into(),
          email:        email.into(),
          phone_number: "1234567890".into(),
        })
        .await
        .unwrap();
    }
    let mut app = App::new(Arc::new(store));
    app.reload().await;

    app.handle_key(key(KeyCode::Char('/'))).await;
    type_str(&mut app, "alic").await;
    app.handle_key(key(KeyCode::Enter)).await;

    let names: Vec<_> = app
      .filtered_contacts()
      .iter()
      .map(|c| c.first_name.clone())
      .collect();
    assert_eq!(names, ["Alice"]);
  }

  #[tokio::test]
  async fn q_quits_from_list_but_types_in_form() {
    let (_store, mut app) = app().await;
    app.handle_key(key(KeyCode::Tab)).await;
    assert!(app.handle_key(key(KeyCode::Char('q'))).await);
    assert_eq!(app.ctl.draft().fields.first_name, "q");

    app.handle_key(key(KeyCode::Esc)).await;
    assert!(!app.handle_key(key(KeyCode::Char('q'))).await);
  }
}
