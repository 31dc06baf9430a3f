use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;
use crate::fs::format_size;
use crate::icons::entry_icon;
use crate::pane::Side;
use crate::theme::Theme;

/// Cuts `s` to at most `width` columns, marking the cut with an ellipsis.
pub fn truncate(s: &str, width: usize) -> String {
  if s.width() <= width {
    return s.to_string();
  }
  if width == 0 {
    return String::new();
  }
  let mut out = String::new();
  let mut used = 0;
  for c in s.chars() {
    let w = c.width().unwrap_or(0);
    if used + w > width - 1 {
      break;
    }
    out.push(c);
    used += w;
  }
  out.push('…');
  out
}

pub fn render_pane(app: &App, side: Side, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let pane = app.pane(side);
  let is_active = app.active == side;
  let inner_height = area.height.saturating_sub(2) as usize; // borders
  let inner_width = area.width.saturating_sub(2) as usize;

  let mut lines: Vec<Line> = Vec::with_capacity(inner_height);

  if pane.entries.is_empty() {
    let (msg, color) = if pane.error.is_some() {
      ("Unable to access directory", theme.error)
    } else {
      ("Directory is empty", theme.text_dim)
    };
    lines.push(Line::from(Span::styled(format!(" {msg}"), Style::default().fg(color))));
    lines.push(Line::from(Span::styled(
      " Press Esc to go back",
      Style::default().fg(theme.text_muted),
    )));
  }

  let start = pane.scroll_offset.min(pane.entries.len());
  let end = (start + inner_height).min(pane.entries.len());

  for (view_idx, entry) in pane.entries[start..end].iter().enumerate() {
    let is_cursor = start + view_idx == pane.cursor;
    let icon = entry_icon(entry);

    let marker = match side {
      Side::Remote if app.is_selected(entry) => "[✓] ",
      Side::Remote => "[ ] ",
      Side::Local => "",
    };
    let size = if entry.is_dir { String::new() } else { format_size(entry.size) };
    let size_col = if size.is_empty() { String::new() } else { format!(" {size} ") };

    let fixed = 1 + marker.width() + icon.glyph.width() + size_col.width();
    let name_width = inner_width.saturating_sub(fixed);
    let name = truncate(&entry.name, name_width);
    let pad = " ".repeat(name_width.saturating_sub(name.width()));

    let name_color = if entry.is_dir { theme.directory } else { theme.text };
    let marker_color = if app.is_selected(entry) { theme.marked } else { theme.text_muted };

    let (base, icon_style, name_style, marker_style, size_style) = if is_cursor && is_active {
      let sel = Style::default()
        .fg(theme.bg_overlay)
        .bg(theme.accent)
        .add_modifier(Modifier::BOLD);
      (sel, sel, sel, sel, sel)
    } else if is_cursor {
      // Inactive pane keeps a dimmer cursor so the position is not lost
      let sel = Style::default().fg(theme.bg_overlay).bg(theme.bg_cursor_inactive);
      (sel, sel, sel, sel, sel)
    } else {
      (
        Style::default(),
        Style::default().fg(icon.color),
        Style::default().fg(name_color),
        Style::default().fg(marker_color),
        Style::default().fg(theme.text_dim),
      )
    };

    lines.push(Line::from(vec![
      Span::styled(" ", base),
      Span::styled(marker, marker_style),
      Span::styled(icon.glyph, icon_style),
      Span::styled(name, name_style),
      Span::styled(pad, base),
      Span::styled(size_col, size_style),
    ]));
  }

  let label = match side {
    Side::Remote => "Device",
    Side::Local => "Destination",
  };
  let title = truncate(&format!(" {label}: {} ", pane.path), inner_width);

  let (border_color, title_color) = if is_active {
    (theme.accent, theme.accent)
  } else {
    (theme.border, theme.title_inactive)
  };

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border_color))
    .title(title)
    .title_style(Style::default().fg(title_color));

  let paragraph = Paragraph::new(lines).block(block);
  paragraph.render(area, buf);
}
