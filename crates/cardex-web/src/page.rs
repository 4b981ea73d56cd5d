//! Server-rendered contact page: draft form, error line, contact list.

use std::{borrow::Cow, fmt::Write as _};

use cardex_core::{
  contact::{Contact, Field},
  controller::{FormController, Mode},
  store::ContactStore,
};
use quick_xml::escape::escape;
use strum::IntoEnumIterator;

use crate::style::{Layout, PageStyle};

/// Render the full page for the controller's current state.
pub fn render<S: ContactStore>(ctl: &FormController<S>, style: &PageStyle) -> String {
  let mut html = String::with_capacity(4096);
  let title = escape(style.title.as_str());

  let _ = write!(
    html,
    "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
     <title>{title}</title>\n<style>{css}</style>\n</head>\n<body>\n<main class=\"container\">\n\
     <h1>{title}</h1>\n",
    css = stylesheet(style),
  );

  draft_form(&mut html, ctl, style.layout);
  contact_list(&mut html, ctl.contacts());

  html.push_str("</main>\n</body>\n</html>\n");
  html
}

fn draft_form<S: ContactStore>(html: &mut String, ctl: &FormController<S>, layout: Layout) {
  let draft = ctl.draft();
  let _ = writeln!(
    html,
    "<form method=\"post\" action=\"/contacts\" class=\"draft draft-{}\">",
    layout.as_ref()
  );

  for field in Field::iter() {
    let input_type = if field == Field::Email { "email" } else { "text" };
    let _ = writeln!(
      html,
      "  <input type=\"{input_type}\" name=\"{name}\" placeholder=\"{label}\" value=\"{value}\">",
      name = field,
      label = field.label(),
      value = escape(draft.fields.get(field)),
    );
  }

  let (symbol, label) = match ctl.mode() {
    Mode::Create => ("+", "Add contact"),
    Mode::Editing(_) => ("&#10003;", "Save contact"),
  };
  let _ = writeln!(
    html,
    "  <button type=\"submit\" class=\"accent\" title=\"{label}\" aria-label=\"{label}\">{symbol}</button>"
  );

  if let Some(message) = ctl.error_message() {
    let _ = writeln!(html, "  <p class=\"error\" role=\"alert\">{}</p>", escape(message.as_str()));
  }
  html.push_str("</form>\n");

  if matches!(ctl.mode(), Mode::Editing(_)) {
    html.push_str(
      "<form method=\"post\" action=\"/draft/cancel\" class=\"cancel\">\
       <button type=\"submit\">Cancel edit</button></form>\n",
    );
  }
}

fn contact_list(html: &mut String, contacts: &[Contact]) {
  if contacts.is_empty() {
    html.push_str("<p class=\"empty\">No contacts yet.</p>\n");
    return;
  }

  html.push_str("<ul class=\"contacts\">\n");
  for contact in contacts {
    let id = path_segment(contact.id.as_str());
    let _ = write!(
      html,
      "  <li>\n    <div class=\"details\"><strong>{first} {last}</strong>\
       <p>{email}</p><p>{phone}</p></div>\n    <div class=\"actions\">\
       <form method=\"post\" action=\"/contacts/{id}/edit\">\
       <button type=\"submit\" class=\"edit\" title=\"Edit\">&#9998;</button></form>\
       <form method=\"post\" action=\"/contacts/{id}/delete\">\
       <button type=\"submit\" class=\"accent\" title=\"Delete\">&#128465;</button></form>\
       </div>\n  </li>\n",
      first = escape(contact.first_name.as_str()),
      last = escape(contact.last_name.as_str()),
      email = escape(contact.email.as_str()),
      phone = escape(contact.phone_number.as_str()),
    );
  }
  html.push_str("</ul>\n");
}

/// Ids are opaque; keep anything outside the unreserved set out of the URL
/// path.
fn path_segment(id: &str) -> Cow<'_, str> {
  if id.bytes().all(|b| b.is_ascii_alphanumeric() || b"-_.~".contains(&b)) {
    return Cow::Borrowed(id);
  }
  let mut out = String::with_capacity(id.len() * 3);
  for b in id.bytes() {
    if b.is_ascii_alphanumeric() || b"-_.~".contains(&b) {
      out.push(char::from(b));
    } else {
      let _ = write!(out, "%{b:02X}");
    }
  }
  Cow::Owned(out)
}

fn stylesheet(style: &PageStyle) -> String {
  let accent = escape(style.accent.as_str());
  format!(
    "body{{font-family:system-ui,sans-serif;margin:0}}\
     .container{{max-width:60rem;margin:0 auto;padding:1rem}}\
     h1{{text-align:center;font-weight:600}}\
     .draft{{display:flex;gap:1rem;justify-content:center;position:relative;margin-bottom:2.5rem}}\
     .draft-stacked{{flex-direction:column;max-width:24rem;margin-left:auto;margin-right:auto}}\
     .draft input{{padding:.75rem;border:1px solid #ccc;border-radius:.25rem}}\
     .draft-inline input{{width:20%}}\
     .error{{color:{accent};position:absolute;bottom:-2rem;width:100%;text-align:center}}\
     .draft-stacked .error{{position:static}}\
     .cancel{{text-align:center;margin-bottom:1rem}}\
     button{{border:0;border-radius:.25rem;padding:.75rem;cursor:pointer}}\
     .accent{{background:{accent};color:#fff}}\
     .edit{{background:#eab308;color:#fff}}\
     .contacts{{list-style:none;padding:0}}\
     .contacts li{{display:flex;justify-content:space-between;align-items:center;\
     padding:1rem;margin-bottom:1rem;box-shadow:0 1px 4px rgba(0,0,0,.15);border-radius:.375rem}}\
     .details p{{margin:.25rem 0}}\
     .actions{{display:flex;gap:1rem}}\
     .empty{{text-align:center;color:#666}}"
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn path_segment_encodes_reserved_bytes() {
    assert_eq!(path_segment("a1-b_c"), "a1-b_c");
    assert_eq!(path_segment("a/b c"), "a%2Fb%20c");
  }
}
