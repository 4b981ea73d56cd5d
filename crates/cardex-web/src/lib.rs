//! Single-page web UI for Cardex.
//!
//! Serves the contact page as plain HTML forms driven by one shared
//! [`FormController`], and nests the JSON API under `/api`.

pub mod handlers;
pub mod page;
pub mod style;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use cardex_core::{controller::FormController, store::ContactStore};
use cardex_postgrest::PostgrestConfig;
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub use style::{Layout, PageStyle};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CARDEX__*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:  String,
  #[serde(default = "default_port")]
  pub port:  u16,
  pub store: PostgrestConfig,
  #[serde(default)]
  pub page:  PageStyle,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
///
/// The page is a single-user tool: one controller holds the draft, and its
/// lock serializes page actions.
pub struct AppState<S: ContactStore> {
  pub store:      Arc<S>,
  pub controller: Arc<Mutex<FormController<S>>>,
  pub style:      Arc<PageStyle>,
}

impl<S: ContactStore> AppState<S> {
  pub fn new(store: Arc<S>, style: PageStyle) -> Self {
    Self {
      controller: Arc::new(Mutex::new(FormController::new(Arc::clone(&store)))),
      store,
      style: Arc::new(style),
    }
  }
}

impl<S: ContactStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:      Arc::clone(&self.store),
      controller: Arc::clone(&self.controller),
      style:      Arc::clone(&self.style),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the page and the nested JSON API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContactStore + 'static,
{
  let api = cardex_api::api_router(Arc::clone(&state.store));
  Router::new()
    .route("/", get(handlers::index::<S>))
    .route("/contacts", post(handlers::submit::<S>))
    .route("/contacts/{id}/edit", post(handlers::edit::<S>))
    .route("/contacts/{id}/delete", post(handlers::delete::<S>))
    .route("/draft/cancel", post(handlers::cancel::<S>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use cardex_core::memory::MemoryStore;
  use tower::ServiceExt as _;

  const JO: &str = "first_name=Jo&last_name=Lee&email=a%40b.co&phone_number=1234567890";

  fn app(store: &MemoryStore, style: PageStyle) -> Router {
    router(AppState::new(Arc::new(store.clone()), style))
  }

  async fn post_form(app: &Router, uri: &str, body: &str) -> axum::response::Response {
    let req = Request::builder()
      .method("POST")
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from(body.to_owned()))
      .unwrap();
    app.clone().oneshot(req).await.unwrap()
  }

  async fn page(app: &Router) -> String {
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  #[tokio::test]
  async fn empty_page_renders_form() {
    let store = MemoryStore::new();
    let html = page(&app(&store, PageStyle::default())).await;
    assert!(html.contains("<h1>Contact List</h1>"));
    assert!(html.contains("name=\"phone_number\""));
    assert!(html.contains("No contacts yet."));
    assert!(html.contains("draft-inline"));
  }

  #[tokio::test]
  async fn submit_redirects_and_lists_contact() {
    let store = MemoryStore::new();
    let app = app(&store, PageStyle::default());

    let resp = post_form(&app, "/contacts", JO).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/");

    let html = page(&app).await;
    assert!(html.contains("<strong>Jo Lee</strong>"));
    assert_eq!(store.len(), 1);
  }

  #[tokio::test]
  async fn invalid_submit_shows_error_and_keeps_input() {
    let store = MemoryStore::new();
    let app = app(&store, PageStyle::default());

    let body = "first_name=Jo&last_name=Lee&email=bad-email&phone_number=1234567890";
    post_form(&app, "/contacts", body).await;

    let html = page(&app).await;
    assert!(html.contains("Please enter a valid email address"));
    assert!(html.contains("value=\"bad-email\""));
    assert_eq!(store.mutations(), 0);
  }

  #[tokio::test]
  async fn edit_then_submit_updates() {
    let store = MemoryStore::new();
    let app = app(&store, PageStyle::default());
    post_form(&app, "/contacts", JO).await;
    let id = store.list().await.unwrap()[0].id.clone();

    // The page must have listed the contact for edit to find it.
    page(&app).await;
    post_form(&app, &format!("/contacts/{id}/edit"), "").await;
    let html = page(&app).await;
    assert!(html.contains("Save contact"));
    assert!(html.contains("Cancel edit"));
    assert!(html.contains("value=\"Jo\""));

    let changed = "first_name=Jo&last_name=Park&email=a%40b.co&phone_number=1234567890";
    post_form(&app, "/contacts", changed).await;

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].last_name, "Park");
    assert!(page(&app).await.contains("Add contact"));
  }

  #[tokio::test]
  async fn cancel_leaves_edit_mode() {
    let store = MemoryStore::new();
    let app = app(&store, PageStyle::default());
    post_form(&app, "/contacts", JO).await;
    let id = store.list().await.unwrap()[0].id.clone();

    post_form(&app, &format!("/contacts/{id}/edit"), "").await;
    post_form(&app, "/draft/cancel", "").await;
    let html = page(&app).await;
    assert!(html.contains("Add contact"));
    assert!(!html.contains("Cancel edit"));
  }

  #[tokio::test]
  async fn delete_removes_from_page() {
    let store = MemoryStore::new();
    let app = app(&store, PageStyle::default());
    post_form(&app, "/contacts", JO).await;
    let id = store.list().await.unwrap()[0].id.clone();

    let resp = post_form(&app, &format!("/contacts/{id}/delete"), "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(store.is_empty());
    assert!(page(&app).await.contains("No contacts yet."));
  }

  #[tokio::test]
  async fn store_failure_is_shown_on_page() {
    let store = MemoryStore::new();
    let app = app(&store, PageStyle::default());
    store.fail_next("permission denied for table contacts");
    let html = page(&app).await;
    assert!(html.contains("permission denied for table contacts"));
  }

  #[tokio::test]
  async fn failed_create_is_shown_after_redirect() {
    let store = MemoryStore::new();
    let app = app(&store, PageStyle::default());
    page(&app).await;

    store.fail_next("duplicate key value violates unique constraint");
    let resp = post_form(&app, "/contacts", JO).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let html = page(&app).await;
    assert!(html.contains("duplicate key value violates unique constraint"));
    assert!(html.contains("value=\"Jo\""));
    assert!(store.is_empty());

    // Leaving the draft drops the message.
    post_form(&app, "/draft/cancel", "").await;
    assert!(!page(&app).await.contains("duplicate key"));
  }

  #[tokio::test]
  async fn failed_delete_is_shown_after_redirect() {
    let store = MemoryStore::new();
    let app = app(&store, PageStyle::default());
    post_form(&app, "/contacts", JO).await;
    let id = store.list().await.unwrap()[0].id.clone();

    store.fail_next("permission denied for table contacts");
    post_form(&app, &format!("/contacts/{id}/delete"), "").await;

    let html = page(&app).await;
    assert!(html.contains("permission denied for table contacts"));
    assert!(html.contains("<strong>Jo Lee</strong>"));
    assert_eq!(store.len(), 1);
  }

  #[tokio::test]
  async fn user_text_is_escaped() {
    let store = MemoryStore::new();
    let app = app(&store, PageStyle::default());
    let body = "first_name=%3Cb%3E&last_name=Lee&email=a%40b.co&phone_number=1234567890";
    post_form(&app, "/contacts", body).await;

    let html = page(&app).await;
    assert!(html.contains("&lt;b&gt; Lee"));
    assert!(!html.contains("<b> Lee"));
  }

  #[tokio::test]
  async fn style_controls_layout_and_title() {
    let store = MemoryStore::new();
    let style = PageStyle {
      title: "Friends".into(),
      layout: Layout::Stacked,
      ..PageStyle::default()
    };
    let html = page(&app(&store, style)).await;
    assert!(html.contains("<h1>Friends</h1>"));
    assert!(html.contains("draft-stacked"));
  }

  #[tokio::test]
  async fn api_is_nested() {
    let store = MemoryStore::new();
    let app = app(&store, PageStyle::default());
    let req = Request::builder().uri("/api/contacts").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
