use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::action::Action;
use crate::bridge::Bridge;
use crate::config::{BridgeSettings, Config};
use crate::event::InputMode;
use crate::fs::local::{entry_target, list_local};
use crate::fs::remote::{join_remote, list_remote, parent_remote};
use crate::fs::DirEntry;
use crate::pane::{PaneState, Side};
use crate::selection::Selection;
use crate::transfer::{self, Progress, TransferError, TransferReport};

/// Ticks a status message stays visible.
const STATUS_TICKS: u16 = 30;

/// Modal content drawn over the panes until dismissed.
#[derive(Debug, Clone)]
pub enum Overlay {
  Transfer(TransferReport),
  Message { title: String, lines: Vec<String> },
}

pub struct App {
  pub remote: PaneState,
  pub local: PaneState,
  pub active: Side,
  pub selection: Selection,
  pub input_mode: InputMode,
  pub show_help: bool,
  pub overlay: Option<Overlay>,
  pub should_quit: bool,
  /// Set by `Action::Transfer`; the main loop runs the batch so it can draw progress.
  pub transfer_requested: bool,
  pub status_message: Option<String>,
  pub status_ticks: u16,
  pub viewport_height: usize,
  pub device: Option<String>,
  home: PathBuf,
  bridge: Box<dyn Bridge>,
  settings: BridgeSettings,
}

impl App {
  pub fn new(config: &Config, bridge: Box<dyn Bridge>, home: PathBuf) -> Self {
    let mut app = Self {
      remote: PaneState::new(config.bridge.remote_home.clone()),
      local: PaneState::new(home.to_string_lossy()),
      active: Side::Remote,
      selection: Selection::default(),
      input_mode: InputMode::Normal,
      show_help: false,
      overlay: None,
      should_quit: false,
      transfer_requested: false,
      status_message: None,
      status_ticks: 0,
      viewport_height: 20,
      device: None,
      home,
      bridge,
      settings: config.bridge.clone(),
    };
    app.refresh(Side::Remote);
    app.refresh(Side::Local);
    app
  }

  pub fn update(&mut self, action: Action) -> Result<()> {
    match action {
      Action::Quit => self.should_quit = true,
      Action::MoveDown => self.move_cursor(1),
      Action::MoveUp => self.move_cursor(-1),
      Action::EnterDir => self.enter_directory(),
      Action::GoParent => self.go_parent(),
      Action::ToggleSelect => self.toggle_select(),
      Action::SwitchPane => {
        self.active = self.active.other();
        self.refresh(self.active);
      }
      Action::Transfer => {
        if self.selection.is_empty() {
          self.set_status(TransferError::NothingSelected.to_string());
        } else {
          self.transfer_requested = true;
        }
      }
      Action::ToggleHelp => {
        self.show_help = !self.show_help;
        self.input_mode = if self.show_help { InputMode::Help } else { InputMode::Normal };
      }
      Action::Dismiss => {
        self.overlay = None;
        self.input_mode = InputMode::Normal;
      }
      Action::Resize(_, h) => {
        self.viewport_height = h.saturating_sub(2) as usize;
      }
      Action::Tick => {
        if self.status_ticks > 0 {
          self.status_ticks -= 1;
        } else {
          self.status_message = None;
        }
      }
      Action::None => {}
    }
    Ok(())
  }

  pub fn pane(&self, side: Side) -> &PaneState {
    match side {
      Side::Remote => &self.remote,
      Side::Local => &self.local,
    }
  }

  fn pane_mut(&mut self, side: Side) -> &mut PaneState {
    match side {
      Side::Remote => &mut self.remote,
      Side::Local => &mut self.local,
    }
  }

  pub fn active_pane(&self) -> &PaneState {
    self.pane(self.active)
  }

  /// Fully-qualified device path of a remote pane entry.
  pub fn remote_path(&self, entry: &DirEntry) -> String {
    join_remote(&self.remote.path, &entry.name)
  }

  pub fn is_selected(&self, entry: &DirEntry) -> bool {
    self.selection.contains(&self.remote_path(entry))
  }

  pub fn set_status(&mut self, msg: String) {
    self.status_message = Some(msg);
    self.status_ticks = STATUS_TICKS;
  }

  pub fn show_message(&mut self, title: &str, lines: Vec<String>) {
    self.overlay = Some(Overlay::Message { title: title.to_string(), lines });
    self.input_mode = InputMode::Report;
  }

  /// Re-lists one pane from its stored path. Failures leave it empty.
  fn refresh(&mut self, side: Side) {
    match side {
      Side::Remote => {
        let listing = list_remote(self.bridge.as_ref(), &self.remote.path, self.settings.remote_timeouts());
        if let Err(e) = &listing {
          warn!(path = %self.remote.path, error = %e, "remote listing failed");
        }
        self.remote.set_listing(listing);
      }
      Side::Local => {
        let listing = list_local(Path::new(&self.local.path), &self.home);
        if let Err(e) = &listing {
          warn!(path = %self.local.path, error = %e, "local listing failed");
        }
        self.local.set_listing(listing);
      }
    }
  }

  fn move_cursor(&mut self, delta: isize) {
    let visible = self.viewport_height.saturating_sub(2);
    let pane = self.pane_mut(self.active);
    pane.move_cursor(delta);
    pane.adjust_scroll(visible);
  }

  fn enter_directory(&mut self) {
    let pane = self.active_pane();
    let Some(entry) = pane.selected() else { return };
    if !entry.is_dir {
      return;
    }
    let next = match self.active {
      Side::Remote => join_remote(&pane.path, &entry.name),
      Side::Local => entry_target(Path::new(&pane.path), entry).to_string_lossy().into_owned(),
    };
    self.pane_mut(self.active).path = next;
    self.refresh(self.active);
  }

  fn go_parent(&mut self) {
    let current = &self.active_pane().path;
    let parent = match self.active {
      Side::Remote if self.settings.is_remote_root(current) => return,
      Side::Remote => parent_remote(current),
      Side::Local => match Path::new(current).parent() {
        Some(p) => p.to_string_lossy().into_owned(),
        None => return,
      },
    };
    if parent == *current {
      return;
    }
    self.pane_mut(self.active).path = parent;
    self.refresh(self.active);
  }

  fn toggle_select(&mut self) {
    if self.active != Side::Remote {
      return;
    }
    let Some(entry) = self.remote.selected() else { return };
    let path = self.remote_path(entry);
    self.selection.toggle(&path);
  }

  /// Runs the pending transfer batch into the local pane's directory.
  pub fn run_transfer(&mut self, on_progress: &mut dyn FnMut(Progress<'_>)) {
    self.transfer_requested = false;
    let dest = PathBuf::from(&self.local.path);
    let result = transfer::transfer(
      self.bridge.as_ref(),
      &self.selection,
      &dest,
      self.settings.pull_timeout,
      on_progress,
    );

    match result {
      Ok(report) => {
        if report.succeeded > 0 {
          self.selection.clear();
          info!("selection cleared after transfer");
        }
        self.refresh(Side::Local);
        self.overlay = Some(Overlay::Transfer(report));
        self.input_mode = InputMode::Report;
      }
      Err(TransferError::NothingSelected) => {
        self.set_status(TransferError::NothingSelected.to_string());
      }
      Err(e) => {
        warn!(error = %e, "transfer batch aborted");
        self.show_message("Transfer aborted", vec![e.to_string()]);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bridge::{BridgeError, BridgeOutput, fake};
  use std::cell::{Cell, RefCell};
  use std::fs;
  use std::rc::Rc;
  use std::sync::atomic::{AtomicU32, Ordering};
  use std::time::Duration;

  static COUNTER: AtomicU32 = AtomicU32::new(0);

  const ROOT: &str = "/storage/emulated/0";

  fn temp_dir() -> PathBuf {
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("apull_app_{id}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  /// Path between the first pair of single quotes in a device shell script.
  fn quoted(script: &str) -> &str {
    let start = script.find('\'').map_or(0, |i| i + 1);
    let end = script[start..].find('\'').map_or(script.len(), |i| start + i);
    &script[start..end]
  }

  struct Device {
    calls: Rc<Cell<usize>>,
    pulls: Rc<RefCell<Vec<String>>>,
  }

  /// A fake phone: a few directories plus files with sizes. Pulls of `*.fail` time out.
  fn device() -> (Box<dyn Bridge>, Device) {
    let calls = Rc::new(Cell::new(0));
    let pulls = Rc::new(RefCell::new(Vec::new()));
    let dirs: Vec<(String, Vec<&'static str>)> = vec![
      (ROOT.to_string(), vec!["b.txt", "Alpha", "a.txt", "DCIM"]),
      (format!("{ROOT}/Alpha"), vec!["inner.txt"]),
      (format!("{ROOT}/DCIM"), vec!["photo.jpg", "broken.fail"]),
      ("/storage/emulated".to_string(), vec!["0"]),
    ];
    let sizes = [("b.txt", 100), ("a.txt", 50), ("inner.txt", 7), ("photo.jpg", 2048)];

    let bridge = {
      let calls = calls.clone();
      let pulls = pulls.clone();
      move |args: &[String], _: Duration| -> Result<BridgeOutput, BridgeError> {
        calls.set(calls.get() + 1);
        if args[0] == "pull" {
          pulls.borrow_mut().push(args[1].clone());
          return if args[1].ends_with(".fail") { fake::timeout() } else { fake::ok("") };
        }
        let script = args[1].as_str();
        let path = quoted(script);
        if script.starts_with("ls") || script.starts_with("find") {
          return match dirs.iter().find(|(d, _)| d == path) {
            Some((_, names)) => fake::ok(&names.join("\n")),
            None => fake::exit(1),
          };
        }
        if script.starts_with("test -d") {
          let is_dir = dirs.iter().any(|(d, _)| d == path);
          return fake::ok(if is_dir { "DIR" } else { "FILE" });
        }
        let name = path.rsplit('/').next().unwrap_or(path);
        match sizes.iter().find(|(n, _)| *n == name) {
          Some((_, size)) => fake::ok(&size.to_string()),
          None => fake::exit(1),
        }
      }
    };
    (Box::new(bridge), Device { calls, pulls })
  }

  fn app() -> (App, Device, PathBuf) {
    let home = temp_dir();
    let (bridge, dev) = device();
    let app = App::new(&Config::default(), bridge, home.clone());
    (app, dev, home)
  }

  fn names(pane: &PaneState) -> Vec<&str> {
    pane.entries.iter().map(|e| e.name.as_str()).collect()
  }

  fn select_named(app: &mut App, name: &str) {
    while app.active_pane().selected().is_some_and(|e| e.name != name) {
      let before = app.active_pane().cursor;
      app.update(Action::MoveDown).unwrap();
      assert_ne!(before, app.active_pane().cursor, "{name} not found");
    }
  }

  #[test]
  fn test_app_creation() {
    let (app, _, home) = app();
    assert_eq!(app.active, Side::Remote);
    assert_eq!(app.remote.path, ROOT);
    assert_eq!(names(&app.remote), vec!["Alpha", "DCIM", "a.txt", "b.txt"]);
    assert_eq!(app.remote.entries[2].size, 50);
    assert_eq!(app.local.path, home.to_string_lossy());
    assert!(app.selection.is_empty());
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_move_down_clamps() {
    let (mut app, _, home) = app();
    for _ in 0..10 {
      app.update(Action::MoveDown).unwrap();
    }
    assert_eq!(app.remote.cursor, 3);
    app.update(Action::MoveUp).unwrap();
    assert_eq!(app.remote.cursor, 2);
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_enter_remote_dir() {
    let (mut app, _, home) = app();
    app.update(Action::EnterDir).unwrap();
    assert_eq!(app.remote.path, format!("{ROOT}/Alpha"));
    assert_eq!(names(&app.remote), vec!["inner.txt"]);
    assert_eq!(app.remote.cursor, 0);
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_enter_on_file_is_noop() {
    let (mut app, dev, home) = app();
    select_named(&mut app, "a.txt");
    let calls = dev.calls.get();
    app.update(Action::EnterDir).unwrap();
    assert_eq!(app.remote.path, ROOT);
    assert_eq!(dev.calls.get(), calls);
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_enter_resets_cursor_from_last_index() {
    let (mut app, _, home) = app();
    let dir = temp_dir();
    for d in ["a", "b", "c"] {
      fs::create_dir_all(dir.join(d)).unwrap();
    }
    fs::write(dir.join("c").join("one.txt"), "1").unwrap();
    fs::write(dir.join("c").join("two.txt"), "22").unwrap();

    app.update(Action::SwitchPane).unwrap();
    app.local.path = dir.to_string_lossy().into_owned();
    app.refresh(Side::Local);
    app.update(Action::MoveDown).unwrap();
    app.update(Action::MoveDown).unwrap();
    assert_eq!(app.local.cursor, 2);

    app.update(Action::EnterDir).unwrap();
    assert_eq!(PathBuf::from(&app.local.path), dir.join("c"));
    assert_eq!(app.local.cursor, 0);
    assert_eq!(names(&app.local), vec!["one.txt", "two.txt"]);

    let _ = fs::remove_dir_all(&dir);
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_go_parent_from_remote_root_is_noop() {
    let (mut app, dev, home) = app();
    app.update(Action::MoveDown).unwrap();
    let calls = dev.calls.get();
    app.update(Action::GoParent).unwrap();
    assert_eq!(app.remote.path, ROOT);
    assert_eq!(app.remote.cursor, 1);
    assert_eq!(dev.calls.get(), calls);
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_go_parent_from_remote_subdir() {
    let (mut app, _, home) = app();
    select_named(&mut app, "DCIM");
    app.update(Action::EnterDir).unwrap();
    assert_eq!(app.remote.path, format!("{ROOT}/DCIM"));
    app.update(Action::GoParent).unwrap();
    assert_eq!(app.remote.path, ROOT);
    assert_eq!(app.remote.cursor, 0);
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_unreadable_remote_dir_is_empty() {
    let (mut app, _, home) = app();
    app.remote.path = "/data/secret".to_string();
    app.refresh(Side::Remote);
    assert!(app.remote.entries.is_empty());
    assert!(app.remote.error.is_some());
    // Navigation still works from an empty pane.
    app.update(Action::EnterDir).unwrap();
    app.update(Action::GoParent).unwrap();
    assert_eq!(app.remote.path, "/data");
    let _ = fs::remove_dir_all(&home);
  }

  #[cfg(unix)]
  #[test]
  fn test_local_go_parent_at_root_is_noop() {
    let (mut app, _, home) = app();
    app.update(Action::SwitchPane).unwrap();
    app.local.path = "/".to_string();
    app.update(Action::GoParent).unwrap();
    assert_eq!(app.local.path, "/");
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_local_home_shortcuts_navigate_to_target() {
    let (mut app, _, home) = app();
    fs::create_dir_all(home.join("Downloads")).unwrap();
    app.update(Action::SwitchPane).unwrap();
    assert!(app.local.entries.iter().any(|e| e.name == "Downloads"));

    select_named(&mut app, "Downloads");
    app.update(Action::EnterDir).unwrap();
    assert_eq!(PathBuf::from(&app.local.path), home.join("Downloads"));
    app.update(Action::GoParent).unwrap();
    assert_eq!(PathBuf::from(&app.local.path), home);
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_switch_pane_relists() {
    let (mut app, dev, home) = app();
    app.update(Action::MoveDown).unwrap();
    app.update(Action::SwitchPane).unwrap();
    assert_eq!(app.active, Side::Local);
    let calls = dev.calls.get();
    app.update(Action::SwitchPane).unwrap();
    assert_eq!(app.active, Side::Remote);
    assert!(dev.calls.get() > calls);
    assert_eq!(app.remote.cursor, 0);
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_toggle_select_is_involution() {
    let (mut app, _, home) = app();
    select_named(&mut app, "a.txt");
    app.update(Action::ToggleSelect).unwrap();
    assert!(app.selection.contains(&format!("{ROOT}/a.txt")));
    assert!(app.is_selected(&app.remote.entries[2]));
    app.update(Action::ToggleSelect).unwrap();
    assert!(app.selection.is_empty());
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_selection_survives_navigation() {
    let (mut app, _, home) = app();
    select_named(&mut app, "b.txt");
    app.update(Action::ToggleSelect).unwrap();
    app.update(Action::GoParent).unwrap();
    app.remote.cursor = 0;
    select_named(&mut app, "DCIM");
    app.update(Action::EnterDir).unwrap();
    select_named(&mut app, "photo.jpg");
    app.update(Action::ToggleSelect).unwrap();

    assert_eq!(app.selection.len(), 2);
    assert!(app.selection.contains(&format!("{ROOT}/b.txt")));
    assert!(app.selection.contains(&format!("{ROOT}/DCIM/photo.jpg")));
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_toggle_select_in_local_pane_is_noop() {
    let (mut app, _, home) = app();
    app.update(Action::SwitchPane).unwrap();
    app.update(Action::ToggleSelect).unwrap();
    assert!(app.selection.is_empty());
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_transfer_with_empty_selection() {
    let (mut app, dev, home) = app();
    app.update(Action::Transfer).unwrap();
    assert!(!app.transfer_requested);
    assert!(app.status_message.as_deref().unwrap().contains("No files selected"));

    app.run_transfer(&mut |_| {});
    assert!(app.overlay.is_none());
    assert!(dev.pulls.borrow().is_empty());
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_transfer_partial_failure_clears_selection() {
    let (mut app, dev, home) = app();
    let dest = home.join("Pulled");
    select_named(&mut app, "a.txt");
    app.update(Action::ToggleSelect).unwrap();
    app.remote.cursor = 0;
    select_named(&mut app, "DCIM");
    app.update(Action::EnterDir).unwrap();
    select_named(&mut app, "broken.fail");
    app.update(Action::ToggleSelect).unwrap();

    app.local.path = dest.to_string_lossy().into_owned();
    app.update(Action::Transfer).unwrap();
    assert!(app.transfer_requested);
    let mut steps = 0;
    app.run_transfer(&mut |_| steps += 1);

    assert_eq!(steps, 2);
    assert!(!app.transfer_requested);
    assert!(dest.is_dir());
    assert_eq!(dev.pulls.borrow().len(), 2);
    assert!(app.selection.is_empty());
    assert_eq!(app.input_mode, InputMode::Report);
    match &app.overlay {
      Some(Overlay::Transfer(report)) => {
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
      }
      other => panic!("expected transfer report, got {other:?}"),
    }

    app.update(Action::Dismiss).unwrap();
    assert!(app.overlay.is_none());
    assert_eq!(app.input_mode, InputMode::Normal);
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_transfer_all_failed_keeps_selection() {
    let (mut app, _, home) = app();
    select_named(&mut app, "DCIM");
    app.update(Action::EnterDir).unwrap();
    select_named(&mut app, "broken.fail");
    app.update(Action::ToggleSelect).unwrap();
    app.local.path = home.to_string_lossy().into_owned();

    app.run_transfer(&mut |_| {});
    assert_eq!(app.selection.len(), 1);
    assert!(matches!(&app.overlay, Some(Overlay::Transfer(r)) if r.failed == 1 && r.succeeded == 0));
    let _ = fs::remove_dir_all(&home);
  }

  #[cfg(unix)]
  #[test]
  fn test_transfer_destination_failure_reported() {
    let (mut app, dev, home) = app();
    select_named(&mut app, "a.txt");
    app.update(Action::ToggleSelect).unwrap();
    fs::write(home.join("blocker"), "x").unwrap();
    app.local.path = home.join("blocker").join("sub").to_string_lossy().into_owned();

    app.run_transfer(&mut |_| {});
    assert!(dev.pulls.borrow().is_empty());
    assert_eq!(app.selection.len(), 1);
    assert!(matches!(&app.overlay, Some(Overlay::Message { title, .. }) if title == "Transfer aborted"));
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_help_toggle() {
    let (mut app, _, home) = app();
    app.update(Action::ToggleHelp).unwrap();
    assert!(app.show_help);
    assert_eq!(app.input_mode, InputMode::Help);
    app.update(Action::ToggleHelp).unwrap();
    assert!(!app.show_help);
    assert_eq!(app.input_mode, InputMode::Normal);
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_status_expires_after_ticks() {
    let (mut app, _, home) = app();
    app.set_status("hello".to_string());
    for _ in 0..STATUS_TICKS {
      app.update(Action::Tick).unwrap();
    }
    assert!(app.status_message.is_some());
    app.update(Action::Tick).unwrap();
    assert!(app.status_message.is_none());
    let _ = fs::remove_dir_all(&home);
  }

  #[test]
  fn test_quit() {
    let (mut app, _, home) = app();
    app.update(Action::Quit).unwrap();
    assert!(app.should_quit);
    let _ = fs::remove_dir_all(&home);
  }
}
