use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::action::Action;
use crate::config::Config;
use crate::theme::Theme;

fn section_line(title: &str, section_style: Style) -> Line<'static> {
  Line::from(Span::styled(
    format!(" {title}"),
    section_style.add_modifier(Modifier::DIM),
  ))
}

fn entry_line(lookup: &HashMap<Action, Vec<String>>, action: Action, desc: &str, key_style: Style, desc_style: Style) -> Line<'static> {
  let keys = lookup
    .get(&action)
    .map(|v| v.join(" / "))
    .unwrap_or_else(|| "-".to_string());
  Line::from(vec![
    Span::styled(
      format!("  {keys:<18}"),
      key_style.add_modifier(Modifier::BOLD),
    ),
    Span::styled(desc.to_string(), desc_style),
  ])
}

pub fn render_help(config: &Config, area: Rect, buf: &mut Buffer, theme: &Theme) {
  let width = 52.min(area.width.saturating_sub(4));
  let height = 20.min(area.height.saturating_sub(2));

  if width < 10 || height < 5 {
    return;
  }

  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;
  let popup = Rect::new(x, y, width, height);

  Clear.render(popup, buf);

  let lookup = config.reverse_lookup();

  let key_style = Style::default().fg(theme.accent);
  let desc_style = Style::default().fg(theme.text);
  let section_style = Style::default().fg(theme.title_inactive);

  let lines: Vec<Line> = vec![
    section_line("Navigation", section_style),
    entry_line(&lookup, Action::MoveDown, "Move down", key_style, desc_style),
    entry_line(&lookup, Action::MoveUp, "Move up", key_style, desc_style),
    entry_line(&lookup, Action::EnterDir, "Enter directory", key_style, desc_style),
    entry_line(&lookup, Action::GoParent, "Parent directory", key_style, desc_style),
    entry_line(&lookup, Action::SwitchPane, "Switch pane", key_style, desc_style),
    section_line("Copying", section_style),
    entry_line(&lookup, Action::ToggleSelect, "Select / deselect (device)", key_style, desc_style),
    entry_line(&lookup, Action::Transfer, "Copy selected here", key_style, desc_style),
    section_line("Other", section_style),
    entry_line(&lookup, Action::ToggleHelp, "Toggle help", key_style, desc_style),
    entry_line(&lookup, Action::Quit, "Quit", key_style, desc_style),
    Line::from(""),
    Line::from(Span::styled(
      " Press q, ? or Esc to close".to_string(),
      Style::default().fg(theme.text_muted),
    )),
  ];

  let block = Block::default()
    .borders(Borders::ALL)
    .title(" Help ")
    .border_style(Style::default().fg(theme.title_inactive))
    .style(Style::default().bg(theme.bg_overlay));

  let paragraph = Paragraph::new(lines).block(block);
  paragraph.render(popup, buf);
}
