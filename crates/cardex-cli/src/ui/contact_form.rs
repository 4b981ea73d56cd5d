//! Draft form pane (right).

use cardex_core::{contact::Field, controller::Mode, store::ContactStore};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

use crate::app::{App, Focus};

/// Render the draft form into `area`.
pub fn draw<S: ContactStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let draft = app.ctl.draft();

  let title = match app.ctl.mode() {
    Mode::Create => " New contact ".to_string(),
    Mode::Editing(_) => format!(
      " Editing {} {} ",
      draft.fields.first_name, draft.fields.last_name
    ),
  };
  let border = if matches!(app.focus, Focus::Form(_)) {
    Color::Cyan
  } else {
    Color::DarkGray
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let mut lines: Vec<Line> = Vec::new();
  for field in Field::iter() {
    let focused = app.focus == Focus::Form(field);
    let label_style = if focused {
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };

    let value = draft.fields.get(field);
    let mut spans = vec![Span::styled(format!("{:<14}", field.label()), label_style)];
    if value.is_empty() && !focused {
      spans.push(Span::styled("—", Style::default().fg(Color::DarkGray)));
    } else {
      spans.push(Span::raw(value.to_string()));
    }
    if focused {
      spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
    }
    lines.push(Line::from(spans));
  }

  if let Some(message) = app.ctl.error_message() {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      message,
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    )));
  }

  f.render_widget(
    Paragraph::new(lines)
      .block(block)
      .wrap(Wrap { trim: false }),
    area,
  );
}
