use std::io;
use std::path::{Path, PathBuf};

use super::entry::{DirEntry, sort_entries};

/// Lists a local directory. The home directory gets a fixed shortcut view instead
/// of its real contents.
pub fn list_local(dir: &Path, home: &Path) -> io::Result<Vec<DirEntry>> {
  if !dir.is_dir() {
    return Err(io::Error::new(
      io::ErrorKind::NotFound,
      format!("{} is not a directory", dir.display()),
    ));
  }
  if dir == home {
    return Ok(home_shortcuts(home));
  }

  let mut entries = Vec::new();
  for entry in std::fs::read_dir(dir)? {
    // Unreadable children are skipped rather than failing the whole listing.
    let Ok(entry) = entry else { continue };
    let Ok(metadata) = std::fs::metadata(entry.path()) else { continue };
    let name = entry.file_name().to_string_lossy().to_string();
    entries.push(if metadata.is_dir() {
      DirEntry::dir(name)
    } else {
      DirEntry::file(name, metadata.len())
    });
  }

  sort_entries(&mut entries);
  Ok(entries)
}

fn home_shortcuts(home: &Path) -> Vec<DirEntry> {
  let mut entries = Vec::new();
  for name in ["Downloads", "Desktop"] {
    let path = home.join(name);
    if path.exists() {
      entries.push(DirEntry::shortcut(name, path));
    }
  }
  entries.extend(root_shortcuts());
  entries.sort_by_key(|e| e.name.to_lowercase());
  entries
}

#[cfg(windows)]
fn root_shortcuts() -> Vec<DirEntry> {
  ["C:", "D:", "E:", "F:", "G:", "H:"]
    .iter()
    .map(|drive| PathBuf::from(format!("{drive}\\")))
    .filter(|path| path.exists())
    .map(|path| DirEntry::shortcut(path.display().to_string(), path))
    .collect()
}

#[cfg(not(windows))]
fn root_shortcuts() -> Vec<DirEntry> {
  vec![DirEntry::shortcut("/ (Root)", PathBuf::from("/"))]
}

/// Where Enter on `entry` leads from `dir`.
pub fn entry_target(dir: &Path, entry: &DirEntry) -> PathBuf {
  entry.target.clone().unwrap_or_else(|| dir.join(&entry.name))
}
