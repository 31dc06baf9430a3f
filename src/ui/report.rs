use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap};

use crate::app::Overlay;
use crate::theme::Theme;
use crate::transfer::{Progress, TransferReport};

/// Destination and per-item lines of the transfer report.
pub fn report_lines(report: &TransferReport, theme: &Theme) -> Vec<Line<'static>> {
  let mut lines = vec![Line::from(vec![
    Span::styled(" Destination: ", Style::default().fg(theme.text_dim)),
    Span::styled(
      report.destination.display().to_string(),
      Style::default().fg(theme.text),
    ),
  ])];
  lines.push(Line::from(""));

  for item in &report.items {
    let line = match item.error {
      None => Line::from(vec![
        Span::styled(" ✓ ", Style::default().fg(theme.success)),
        Span::styled(item.remote.clone(), Style::default().fg(theme.text)),
      ]),
      Some(ref err) => Line::from(vec![
        Span::styled(" ✗ ", Style::default().fg(theme.error)),
        Span::styled(item.remote.clone(), Style::default().fg(theme.text)),
        Span::styled(format!(": {err}"), Style::default().fg(theme.text_dim)),
      ]),
    };
    lines.push(line);
  }
  lines
}

/// Aggregate counts, pinned below the item list.
pub fn summary_lines(report: &TransferReport, theme: &Theme) -> Vec<Line<'static>> {
  let failed_color = if report.failed > 0 { theme.error } else { theme.text_dim };
  let mut lines = vec![
    Line::from(""),
    Line::from(vec![
      Span::styled(
        format!(" Successful: {}", report.succeeded),
        Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
      ),
      Span::styled(" | ", Style::default().fg(theme.text_dim)),
      Span::styled(
        format!("Failed: {}", report.failed),
        Style::default().fg(failed_color).add_modifier(Modifier::BOLD),
      ),
    ]),
  ];
  if report.succeeded > 0 {
    lines.push(Line::from(Span::styled(
      " Selected files cleared",
      Style::default().fg(theme.text_dim),
    )));
  }
  lines
}

pub fn render_overlay(overlay: &Overlay, area: Rect, buf: &mut Buffer, theme: &Theme) {
  match overlay {
    Overlay::Transfer(report) => {
      let border = if report.failed > 0 { theme.warning } else { theme.success };
      let body = report_lines(report, theme);
      let footer = summary_lines(report, theme);
      render_popup(" Transfer complete ", body, footer, border, area, buf, theme);
    }
    Overlay::Message { title, lines } => {
      let lines = lines
        .iter()
        .map(|msg| Line::from(Span::styled(format!(" {msg}"), Style::default().fg(theme.text))))
        .collect();
      render_popup(&format!(" {title} "), lines, Vec::new(), theme.error, area, buf, theme);
    }
  }
}

/// Centered popup. `footer` and the dismiss hint always keep their rows; the body is
/// cut short with a "more" line when it does not fit.
fn render_popup(
  title: &str,
  mut body: Vec<Line<'static>>,
  mut footer: Vec<Line<'static>>,
  border: Color,
  area: Rect,
  buf: &mut Buffer,
  theme: &Theme,
) {
  let width = 72.min(area.width.saturating_sub(4));
  let inner_width = width.saturating_sub(2) as usize;

  footer.push(Line::from(""));
  footer.push(Line::from(Span::styled(
    " [Enter] / [Esc] dismiss",
    Style::default().fg(theme.text_muted),
  )));

  // Estimate line count with word-wrapping
  let mut line_count: u16 = 0;
  for line in &body {
    line_count += ((line.width() / inner_width.max(1)) as u16) + 1;
  }
  // +2 for borders
  let footer_rows = footer.len() as u16;
  let height = (line_count + footer_rows + 2).min(area.height.saturating_sub(2));

  if width < 10 || height < footer_rows + 3 {
    return;
  }

  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;
  let popup = Rect::new(x, y, width, height);

  Clear.render(popup, buf);

  let block = Block::default()
    .borders(Borders::ALL)
    .title(title.to_string())
    .border_style(Style::default().fg(border))
    .style(Style::default().bg(theme.bg_overlay));
  let inner = block.inner(popup);
  block.render(popup, buf);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(1), Constraint::Length(footer_rows)])
    .split(inner);

  let body_rows = rows[0].height as usize;
  if body.len() > body_rows {
    let keep = body_rows.saturating_sub(1);
    let hidden = body.len() - keep;
    body.truncate(keep);
    body.push(Line::from(Span::styled(
      format!(" … and {hidden} more"),
      Style::default().fg(theme.text_dim),
    )));
  }

  Paragraph::new(body).wrap(Wrap { trim: false }).render(rows[0], buf);
  Paragraph::new(footer).render(rows[1], buf);
}

pub fn render_progress(progress: Progress<'_>, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let width = 60.min(area.width.saturating_sub(4));
  let height = 6.min(area.height);
  if width < 10 || height < 4 {
    return;
  }

  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;
  let popup = Rect::new(x, y, width, height);

  Clear.render(popup, buf);

  let block = Block::default()
    .borders(Borders::ALL)
    .title(format!(" Copying {}/{} ", progress.index + 1, progress.total))
    .border_style(Style::default().fg(theme.accent))
    .style(Style::default().bg(theme.bg_overlay));
  let inner = block.inner(popup);
  block.render(popup, buf);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
    .split(inner);

  Paragraph::new(Line::from(Span::styled(
    format!(" {}", progress.name),
    Style::default().fg(theme.text),
  )))
  .render(rows[0], buf);

  // index is zero-based, so it equals the number of finished pulls
  let done = progress.index;
  let ratio = if progress.total == 0 {
    0.0
  } else {
    (done as f64 / progress.total as f64).clamp(0.0, 1.0)
  };
  Gauge::default()
    .gauge_style(Style::default().fg(theme.accent).bg(theme.bg_bar))
    .ratio(ratio)
    .label(format!("{done}/{}", progress.total))
    .render(rows[1], buf);
}
