use std::collections::BTreeSet;

/// Remote paths marked for the next transfer. Membership does not depend on where
/// the panes are pointed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
  paths: BTreeSet<String>,
}

impl Selection {
  /// Returns true if `path` is selected after the toggle.
  pub fn toggle(&mut self, path: &str) -> bool {
    if self.paths.remove(path) {
      false
    } else {
      self.paths.insert(path.to_string());
      true
    }
  }

  pub fn contains(&self, path: &str) -> bool {
    self.paths.contains(path)
  }

  pub fn len(&self) -> usize {
    self.paths.len()
  }

  pub fn is_empty(&self) -> bool {
    self.paths.is_empty()
  }

  pub fn clear(&mut self) {
    self.paths.clear();
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.paths.iter().map(String::as_str)
  }
}
