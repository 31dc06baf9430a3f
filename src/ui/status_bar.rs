use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::App;
use crate::event::InputMode;
use crate::fs::format_size;
use crate::theme::Theme;

const CONTROLS_HINT: &str = " ↑↓ move  Enter open  Esc back  s select  d switch  e copy  ? help  q quit";

pub fn render_status_bar(app: &App, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let line = match app.input_mode {
    InputMode::Help => Line::from(Span::styled(
      " Press q, ? or Esc to close help",
      Style::default().fg(theme.text_dim),
    )),
    InputMode::Report => Line::from(Span::styled(
      " [Enter] / [Esc] dismiss",
      Style::default().fg(theme.text_dim),
    )),
    InputMode::Normal => {
      let pane = app.active_pane();
      let mut spans = if let Some(ref msg) = app.status_message {
        vec![Span::styled(format!(" {msg}"), Style::default().fg(theme.info))]
      } else if let Some(entry) = pane.selected() {
        let mut spans = vec![Span::styled(
          format!(" {}", entry.name),
          Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )];
        if !entry.is_dir && entry.size > 0 {
          spans.push(Span::styled(
            format!(" | {}", format_size(entry.size)),
            Style::default().fg(theme.text_dim),
          ));
        }
        spans.push(Span::styled(CONTROLS_HINT, Style::default().fg(theme.text_muted)));
        spans
      } else {
        vec![Span::styled(CONTROLS_HINT, Style::default().fg(theme.text_muted))]
      };

      if !pane.entries.is_empty() {
        spans.push(Span::styled(
          format!("  {}/{} ", pane.cursor + 1, pane.entries.len()),
          Style::default().fg(theme.text_dim),
        ));
      }
      Line::from(spans)
    }
  };

  let paragraph = Paragraph::new(line).style(Style::default().bg(theme.bg_bar));
  paragraph.render(area, buf);
}
