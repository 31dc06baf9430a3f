use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, normalize_key_event};

pub enum Event {
  Key(KeyEvent),
  Resize(u16, u16),
  Tick,
}

/// Forwards terminal input from a polling thread so the main loop can block on one
/// event at a time.
pub struct EventLoop {
  rx: mpsc::Receiver<Event>,
}

impl EventLoop {
  pub fn new(tick_rate: Duration) -> Self {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
      if event::poll(tick_rate).unwrap_or(false) {
        match event::read() {
          // Windows reports both press and release
          Ok(CrosstermEvent::Key(key)) if key.kind != KeyEventKind::Release => {
            if tx.send(Event::Key(key)).is_err() {
              break;
            }
          }
          Ok(CrosstermEvent::Resize(w, h)) => {
            if tx.send(Event::Resize(w, h)).is_err() {
              break;
            }
          }
          _ => {}
        }
      } else if tx.send(Event::Tick).is_err() {
        break;
      }
    });

    Self { rx }
  }

  pub fn next(&self) -> Result<Event> {
    Ok(self.rx.recv()?)
  }

  /// Throws away input typed while a blocking operation had the screen.
  pub fn drain(&self) {
    while self.rx.try_recv().is_ok() {}
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
  Normal,
  Help,
  /// A transfer report or message is on screen.
  Report,
}

pub fn map_key(key: KeyEvent, mode: InputMode, config: &Config) -> Action {
  match mode {
    InputMode::Help => match key.code {
      KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::ToggleHelp,
      _ => Action::None,
    },
    InputMode::Report => match key.code {
      KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ') => Action::Dismiss,
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
      _ => Action::None,
    },
    InputMode::Normal => {
      let kb = normalize_key_event(key);
      config.normal_keys.get(&kb).cloned().unwrap_or(Action::None)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  fn key_with_mod(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
      code,
      modifiers,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  fn cfg() -> Config {
    Config::default()
  }

  #[test]
  fn test_normal_mode_navigation() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Char('j')), InputMode::Normal, &c), Action::MoveDown);
    assert_eq!(map_key(key(KeyCode::Char('k')), InputMode::Normal, &c), Action::MoveUp);
    assert_eq!(map_key(key(KeyCode::Down), InputMode::Normal, &c), Action::MoveDown);
    assert_eq!(map_key(key(KeyCode::Up), InputMode::Normal, &c), Action::MoveUp);
    assert_eq!(map_key(key(KeyCode::Enter), InputMode::Normal, &c), Action::EnterDir);
    assert_eq!(map_key(key(KeyCode::Esc), InputMode::Normal, &c), Action::GoParent);
  }

  #[test]
  fn test_normal_mode_actions() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Char('s')), InputMode::Normal, &c), Action::ToggleSelect);
    assert_eq!(map_key(key(KeyCode::Char('d')), InputMode::Normal, &c), Action::SwitchPane);
    assert_eq!(map_key(key(KeyCode::Char('e')), InputMode::Normal, &c), Action::Transfer);
    assert_eq!(map_key(key(KeyCode::Char('q')), InputMode::Normal, &c), Action::Quit);
    assert_eq!(map_key(key(KeyCode::Char('x')), InputMode::Normal, &c), Action::None);
  }

  #[test]
  fn test_ctrl_c_quits() {
    let c = cfg();
    let ctrl_c = key_with_mod(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(map_key(ctrl_c, InputMode::Normal, &c), Action::Quit);
    assert_eq!(map_key(ctrl_c, InputMode::Report, &c), Action::Quit);
  }

  #[test]
  fn test_help_mode_only_closes() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Char('?')), InputMode::Help, &c), Action::ToggleHelp);
    assert_eq!(map_key(key(KeyCode::Esc), InputMode::Help, &c), Action::ToggleHelp);
    assert_eq!(map_key(key(KeyCode::Char('j')), InputMode::Help, &c), Action::None);
  }

  #[test]
  fn test_report_mode_dismisses() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Enter), InputMode::Report, &c), Action::Dismiss);
    assert_eq!(map_key(key(KeyCode::Esc), InputMode::Report, &c), Action::Dismiss);
    assert_eq!(map_key(key(KeyCode::Char('e')), InputMode::Report, &c), Action::None);
  }

  #[test]
  fn test_custom_config_remaps_key() {
    let mut c = cfg();
    let kb = crate::config::KeyBinding {
      code: KeyCode::Char('j'),
      modifiers: KeyModifiers::NONE,
    };
    c.normal_keys.insert(kb, Action::Quit);
    assert_eq!(map_key(key(KeyCode::Char('j')), InputMode::Normal, &c), Action::Quit);
  }
}
