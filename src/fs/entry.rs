use std::cmp::Ordering;
use std::path::PathBuf;

/// One row of a pane listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
  pub name: String,
  pub is_dir: bool,
  pub size: u64,
  /// Where Enter leads, when that differs from joining `name` onto the pane path.
  pub target: Option<PathBuf>,
}

impl DirEntry {
  pub fn dir(name: impl Into<String>) -> Self {
    Self { name: name.into(), is_dir: true, size: 0, target: None }
  }

  pub fn file(name: impl Into<String>, size: u64) -> Self {
    Self { name: name.into(), is_dir: false, size, target: None }
  }

  pub fn shortcut(name: impl Into<String>, target: PathBuf) -> Self {
    Self { name: name.into(), is_dir: true, size: 0, target: Some(target) }
  }
}

/// Directories first, then case-insensitive name.
pub fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
  b.is_dir
    .cmp(&a.is_dir)
    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

pub fn sort_entries(entries: &mut [DirEntry]) {
  entries.sort_by(compare_entries);
}

/// Human readable size; empty for zero so directories and unknown sizes stay blank.
pub fn format_size(bytes: u64) -> String {
  const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

  if bytes == 0 {
    return String::new();
  }
  let mut size = bytes as f64;
  let mut unit = 0;
  while size >= 1024.0 && unit < UNITS.len() - 1 {
    size /= 1024.0;
    unit += 1;
  }
  format!("{size:.1}{}", UNITS[unit])
}
