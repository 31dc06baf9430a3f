use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::action::Action;
use crate::fs::remote::RemoteTimeouts;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
  pub code: KeyCode,
  pub modifiers: KeyModifiers,
}

impl KeyBinding {
  pub fn display_key(&self) -> String {
    let key_name = match self.code {
      KeyCode::Char(' ') => "Space".to_string(),
      KeyCode::Char(c) => c.to_string(),
      KeyCode::Enter => "Enter".to_string(),
      KeyCode::Esc => "Esc".to_string(),
      KeyCode::Backspace => "Backspace".to_string(),
      KeyCode::Tab => "Tab".to_string(),
      KeyCode::Up => "Up".to_string(),
      KeyCode::Down => "Down".to_string(),
      KeyCode::Left => "Left".to_string(),
      KeyCode::Right => "Right".to_string(),
      KeyCode::F(n) => format!("F{n}"),
      _ => format!("{:?}", self.code),
    };

    if self.modifiers.contains(KeyModifiers::CONTROL) {
      format!("Ctrl+{key_name}")
    } else if self.modifiers.contains(KeyModifiers::ALT) {
      format!("Alt+{key_name}")
    } else {
      key_name
    }
  }
}

/// Device bridge program, remote roots and per-call time budgets.
#[derive(Debug, Clone)]
pub struct BridgeSettings {
  pub program: String,
  pub remote_home: String,
  /// Paths the remote pane refuses to go above.
  pub remote_roots: Vec<String>,
  pub device_timeout: Duration,
  pub list_timeout: Duration,
  pub probe_timeout: Duration,
  pub pull_timeout: Duration,
}

impl BridgeSettings {
  pub fn remote_timeouts(&self) -> RemoteTimeouts {
    RemoteTimeouts { list: self.list_timeout, probe: self.probe_timeout }
  }

  pub fn is_remote_root(&self, path: &str) -> bool {
    self.remote_roots.iter().any(|r| r == path)
  }
}

pub struct Config {
  pub tick_rate_ms: u64,
  pub theme: Theme,
  pub bridge: BridgeSettings,
  pub normal_keys: HashMap<KeyBinding, Action>,
}

#[derive(Deserialize, Default)]
struct TomlConfig {
  general: Option<GeneralConfig>,
  bridge: Option<BridgeConfig>,
  keys: Option<KeysConfig>,
}

#[derive(Deserialize, Default)]
struct GeneralConfig {
  tick_rate_ms: Option<u64>,
  theme: Option<String>,
}

#[derive(Deserialize, Default)]
struct BridgeConfig {
  program: Option<String>,
  remote_home: Option<String>,
  remote_roots: Option<Vec<String>>,
  device_timeout_secs: Option<u64>,
  list_timeout_secs: Option<u64>,
  probe_timeout_secs: Option<u64>,
  pull_timeout_secs: Option<u64>,
}

#[derive(Deserialize, Default)]
struct KeysConfig {
  normal: Option<HashMap<String, String>>,
}

pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
  if s.is_empty() {
    return None;
  }

  let parts: Vec<&str> = s.split('+').collect();

  if parts.len() == 1 {
    let key = parts[0];
    if let Some(code) = named_key(key) {
      return Some(KeyBinding { code, modifiers: KeyModifiers::NONE });
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() == 1 {
      return Some(KeyBinding { code: KeyCode::Char(chars[0]), modifiers: KeyModifiers::NONE });
    }
    return None;
  }

  if parts.len() == 2 {
    let modifier_str = parts[0].to_lowercase();
    let key_str = parts[1];

    let modifiers = match modifier_str.as_str() {
      "ctrl" => KeyModifiers::CONTROL,
      "shift" => {
        let chars: Vec<char> = key_str.chars().collect();
        if chars.len() == 1 {
          let c = chars[0].to_uppercase().next().unwrap_or(chars[0]);
          return Some(KeyBinding { code: KeyCode::Char(c), modifiers: KeyModifiers::NONE });
        }
        if let Some(code) = named_key(key_str) {
          return Some(KeyBinding { code, modifiers: KeyModifiers::SHIFT });
        }
        return None;
      }
      "alt" => KeyModifiers::ALT,
      _ => return None,
    };

    if let Some(code) = named_key(key_str) {
      return Some(KeyBinding { code, modifiers });
    }
    let chars: Vec<char> = key_str.chars().collect();
    if chars.len() == 1 {
      return Some(KeyBinding { code: KeyCode::Char(chars[0]), modifiers });
    }
    return None;
  }

  None
}

fn named_key(s: &str) -> Option<KeyCode> {
  match s.to_lowercase().as_str() {
    "enter" => Some(KeyCode::Enter),
    "space" => Some(KeyCode::Char(' ')),
    "esc" => Some(KeyCode::Esc),
    "up" => Some(KeyCode::Up),
    "down" => Some(KeyCode::Down),
    "left" => Some(KeyCode::Left),
    "right" => Some(KeyCode::Right),
    "backspace" => Some(KeyCode::Backspace),
    "tab" => Some(KeyCode::Tab),
    s if s.starts_with('f') && s.len() > 1 => {
      s[1..].parse::<u8>().ok().filter(|&n| (1..=24).contains(&n)).map(KeyCode::F)
    }
    _ => None,
  }
}

pub fn normalize_key_event(key: KeyEvent) -> KeyBinding {
  let mut modifiers = key.modifiers;
  if let KeyCode::Char(c) = key.code
    && c.is_uppercase()
  {
    modifiers -= KeyModifiers::SHIFT;
  }
  KeyBinding { code: key.code, modifiers }
}

impl Default for Config {
  fn default() -> Self {
    let mut config = Config::empty();
    let mut errors = Vec::new();
    config.apply_toml_str(Config::default_toml(), &mut errors);
    config
  }
}

impl Config {
  fn empty() -> Self {
    Config {
      tick_rate_ms: 100,
      theme: Theme::default(),
      bridge: BridgeSettings {
        program: "adb".to_string(),
        remote_home: "/storage/emulated/0".to_string(),
        remote_roots: Vec::new(),
        device_timeout: Duration::from_secs(10),
        list_timeout: Duration::from_secs(10),
        probe_timeout: Duration::from_secs(5),
        pull_timeout: Duration::from_secs(300),
      },
      normal_keys: HashMap::new(),
    }
  }

  fn apply_toml_str(&mut self, s: &str, errors: &mut Vec<String>) {
    let toml_config: TomlConfig = match toml::from_str(s) {
      Ok(c) => c,
      Err(e) => {
        errors.push(format!("failed to parse config.toml: {e}"));
        return;
      }
    };

    if let Some(general) = toml_config.general {
      if let Some(tick) = general.tick_rate_ms {
        self.tick_rate_ms = tick;
      }
      if let Some(name) = general.theme {
        match Theme::from_name(&name) {
          Some(theme) => self.theme = theme,
          None => errors.push(format!(
            "unknown theme {name:?} (available: {})",
            Theme::available_themes().join(", ")
          )),
        }
      }
    }

    if let Some(bridge) = toml_config.bridge {
      let b = &mut self.bridge;
      if let Some(program) = bridge.program {
        b.program = program;
      }
      if let Some(home) = bridge.remote_home {
        b.remote_home = home;
      }
      if let Some(roots) = bridge.remote_roots {
        b.remote_roots = roots;
      }
      let secs = [
        (bridge.device_timeout_secs, &mut b.device_timeout, "device_timeout_secs"),
        (bridge.list_timeout_secs, &mut b.list_timeout, "list_timeout_secs"),
        (bridge.probe_timeout_secs, &mut b.probe_timeout, "probe_timeout_secs"),
        (bridge.pull_timeout_secs, &mut b.pull_timeout, "pull_timeout_secs"),
      ];
      for (value, slot, key) in secs {
        match value {
          Some(0) => errors.push(format!("{key} must be greater than zero")),
          Some(n) => *slot = Duration::from_secs(n),
          None => {}
        }
      }
    }

    if let Some(keys) = toml_config.keys
      && let Some(normal) = keys.normal
    {
      self.normal_keys.clear();
      for (key_str, action_str) in &normal {
        let Some(kb) = parse_key_binding(key_str) else {
          errors.push(format!("invalid key binding: {key_str:?}"));
          continue;
        };
        let Some(action) = Action::from_name(action_str) else {
          errors.push(format!("invalid action: {action_str:?}"));
          continue;
        };
        self.normal_keys.insert(kb, action);
      }
    }
  }

  pub fn default_toml() -> &'static str {
    r#"[general]
tick_rate_ms = 100          # event loop tick rate in ms
theme = "dark"              # dark | light

[bridge]
program = "adb"
remote_home = "/storage/emulated/0"
remote_roots = ["/storage/emulated/0", "/sdcard", "/"]
device_timeout_secs = 10    # `adb devices` at startup
list_timeout_secs = 10      # each directory listing attempt
probe_timeout_secs = 5      # each type / size query
pull_timeout_secs = 300     # each file pull

[keys.normal]
j = "move_down"
k = "move_up"
down = "move_down"
up = "move_up"
enter = "enter_dir"
right = "enter_dir"
esc = "go_parent"
left = "go_parent"
backspace = "go_parent"
s = "toggle_select"
space = "toggle_select"
d = "switch_pane"
tab = "switch_pane"
e = "transfer"
"?" = "toggle_help"
q = "quit"
"ctrl+c" = "quit"
"#
  }

  pub fn reverse_lookup(&self) -> HashMap<Action, Vec<String>> {
    let mut map: HashMap<Action, Vec<String>> = HashMap::new();
    for (kb, action) in &self.normal_keys {
      map.entry(action.clone()).or_default().push(kb.display_key());
    }
    // Sort keys for deterministic display
    for keys in map.values_mut() {
      keys.sort();
    }
    map
  }

  pub fn config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
      .map(|d| d.join("apull").join("config.toml"))
      .ok_or_else(|| "could not determine config directory".to_string())
  }

  pub fn dump_default_config(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }

    std::fs::write(path, Self::default_toml())
      .map_err(|e| format!("failed to write {}: {e}", path.display()))?;

    Ok(())
  }

  pub fn load() -> (Config, Vec<String>) {
    let mut errors = Vec::new();
    let content = Self::config_path()
      .ok()
      .and_then(|p| std::fs::read_to_string(p).ok());

    let config = match content {
      Some(s) => Self::load_from_str_with_errors(&s, &mut errors),
      None => Config::default(),
    };
    (config, errors)
  }

  #[cfg(test)]
  pub fn load_from_str(s: &str) -> Config {
    let mut errors = Vec::new();
    Self::load_from_str_with_errors(s, &mut errors)
  }

  fn load_from_str_with_errors(s: &str, errors: &mut Vec<String>) -> Config {
    let mut config = Config::default();
    config.apply_toml_str(s, errors);
    config
  }
}
