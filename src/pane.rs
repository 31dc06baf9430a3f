use crate::fs::DirEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
  Remote,
  Local,
}

impl Side {
  pub fn other(self) -> Side {
    match self {
      Side::Remote => Side::Local,
      Side::Local => Side::Remote,
    }
  }
}

/// Location, latest listing and cursor of one side of the browser.
#[derive(Debug, Clone)]
pub struct PaneState {
  pub path: String,
  pub entries: Vec<DirEntry>,
  pub cursor: usize,
  pub scroll_offset: usize,
  /// Why the last listing came back empty, if it failed.
  pub error: Option<String>,
}

impl PaneState {
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      entries: Vec::new(),
      cursor: 0,
      scroll_offset: 0,
      error: None,
    }
  }

  /// Replaces the listing. Failures leave the pane empty with the reason recorded.
  pub fn set_listing<E: std::fmt::Display>(&mut self, listing: Result<Vec<DirEntry>, E>) {
    match listing {
      Ok(entries) => {
        self.entries = entries;
        self.error = None;
      }
      Err(e) => {
        self.entries.clear();
        self.error = Some(e.to_string());
      }
    }
    self.cursor = 0;
    self.scroll_offset = 0;
  }

  pub fn selected(&self) -> Option<&DirEntry> {
    self.entries.get(self.cursor)
  }

  pub fn move_cursor(&mut self, delta: isize) {
    if self.entries.is_empty() {
      return;
    }
    let last = self.entries.len() - 1;
    self.cursor = self.cursor.saturating_add_signed(delta).min(last);
  }

  pub fn adjust_scroll(&mut self, visible: usize) {
    if visible == 0 {
      return;
    }
    if self.cursor < self.scroll_offset {
      self.scroll_offset = self.cursor;
    } else if self.cursor >= self.scroll_offset + visible {
      self.scroll_offset = self.cursor - visible + 1;
    }
  }
}
