//! Page handlers. Every form post answers with a 303 back to `/`; outcomes
//! are carried by the shared controller's state, not by the redirect.

use axum::{
  Form,
  extract::{Path, State},
  response::{Html, Redirect},
};
use cardex_core::{
  contact::{ContactFields, ContactId},
  controller::Submitted,
  store::ContactStore,
};
use tracing::{debug, info};

use crate::{AppState, page};

/// `GET /` — re-read the list and render the page.
pub async fn index<S>(State(state): State<AppState<S>>) -> Html<String>
where
  S: ContactStore + 'static,
{
  let mut ctl = state.controller.lock().await;
  if let Err(e) = ctl.reload().await {
    debug!(error = %e, "rendering page with stale list");
  }
  Html(page::render(&*ctl, &state.style))
}

/// `POST /contacts`: bind the posted values to the draft and submit it.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Form(fields): Form<ContactFields>,
) -> Redirect
where
  S: ContactStore + 'static,
{
  let mut ctl = state.controller.lock().await;
  ctl.set_fields(fields);
  match ctl.submit().await {
    Ok(Submitted::Created(rows)) => info!(rows = rows.len(), "contact created"),
    Ok(Submitted::Updated(rows)) => info!(rows = rows.len(), "contact updated"),
    Err(e) => debug!(error = %e, "draft not submitted"),
  }
  Redirect::to("/")
}

/// `POST /contacts/{id}/edit`
pub async fn edit<S>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Redirect
where
  S: ContactStore + 'static,
{
  let mut ctl = state.controller.lock().await;
  if !ctl.edit(&ContactId::from(id)) {
    debug!("edit requested for a contact that is not listed");
  }
  Redirect::to("/")
}

/// `POST /contacts/{id}/delete` — no confirmation step.
pub async fn delete<S>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Redirect
where
  S: ContactStore + 'static,
{
  let id = ContactId::from(id);
  let mut ctl = state.controller.lock().await;
  match ctl.delete(&id).await {
    Ok(rows) => info!(%id, rows = rows.len(), "contact deleted"),
    Err(e) => debug!(%id, error = %e, "delete failed"),
  }
  Redirect::to("/")
}

/// `POST /draft/cancel`
pub async fn cancel<S>(State(state): State<AppState<S>>) -> Redirect
where
  S: ContactStore + 'static,
{
  state.controller.lock().await.cancel();
  Redirect::to("/")
}
