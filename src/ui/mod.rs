pub mod help;
pub mod pane;
pub mod report;
pub mod status_bar;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use ratatui::Frame;

use crate::app::App;
use crate::config::Config;
use crate::pane::Side;
use crate::theme::Theme;
use crate::transfer::Progress;

pub fn draw(frame: &mut Frame, app: &mut App, config: &Config) {
  let area = frame.area();
  let theme = &config.theme;

  // Vertical layout: header, main, status bar
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(3),   // panes
      Constraint::Length(1), // status bar
    ])
    .split(area);

  render_header(app, chunks[0], frame.buffer_mut(), theme);

  // Device on the left, destination on the right
  let panes = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(chunks[1]);

  app.viewport_height = panes[0].height as usize;

  pane::render_pane(app, Side::Remote, panes[0], frame.buffer_mut(), theme);
  pane::render_pane(app, Side::Local, panes[1], frame.buffer_mut(), theme);

  status_bar::render_status_bar(app, chunks[2], frame.buffer_mut(), theme);

  // Overlays
  if app.show_help {
    help::render_help(config, area, frame.buffer_mut(), theme);
  }
  if let Some(ref overlay) = app.overlay {
    report::render_overlay(overlay, area, frame.buffer_mut(), theme);
  }
}

/// Full-screen frame shown while a transfer batch blocks the loop.
pub fn draw_progress(frame: &mut Frame, progress: Progress<'_>, theme: &Theme) {
  let area = frame.area();
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(3)])
    .split(area);

  let title = Line::from(Span::styled(
    " \u{f0b2} Transferring",
    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
  ));
  Paragraph::new(title)
    .style(Style::default().bg(theme.bg_bar))
    .render(chunks[0], frame.buffer_mut());

  report::render_progress(progress, chunks[1], frame.buffer_mut(), theme);
}

/// Placeholder frame shown while the first listings load.
pub fn draw_loading(frame: &mut Frame, message: &str, theme: &Theme) {
  let area = frame.area();
  render_loading(message, area, frame.buffer_mut(), theme);
}

fn render_loading(message: &str, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0)])
    .split(area);

  let line = Line::from(vec![
    Span::styled(" \u{f011b} ", Style::default().fg(theme.accent)),
    Span::styled(message.to_string(), Style::default().fg(theme.text)),
  ]);
  Paragraph::new(line)
    .style(Style::default().bg(theme.bg_bar))
    .render(chunks[0], buf);
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let mut spans = vec![
    Span::styled(" \u{f011b} ", Style::default().fg(theme.accent)),
    Span::styled(
      "adb pull",
      Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    ),
  ];

  if let Some(ref serial) = app.device {
    spans.push(Span::styled(format!("  {serial}"), Style::default().fg(theme.success)));
  }

  let count = app.selection.len();
  let selected_color = if count > 0 { theme.marked } else { theme.text_dim };
  spans.push(Span::styled(
    format!("  Selected files: {count}"),
    Style::default().fg(selected_color),
  ));

  let line = Line::from(spans);
  let paragraph = Paragraph::new(line).style(Style::default().bg(theme.bg_bar));
  paragraph.render(area, buf);
}
