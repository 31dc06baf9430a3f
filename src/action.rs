#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
  Quit,
  MoveUp,
  MoveDown,
  EnterDir,
  GoParent,
  ToggleSelect,
  SwitchPane,
  Transfer,
  ToggleHelp,
  Dismiss,
  Resize(u16, u16),
  Tick,
  None,
}

impl Action {
  pub fn from_name(name: &str) -> Option<Action> {
    match name {
      "quit" => Some(Action::Quit),
      "move_up" => Some(Action::MoveUp),
      "move_down" => Some(Action::MoveDown),
      "enter_dir" => Some(Action::EnterDir),
      "go_parent" => Some(Action::GoParent),
      "toggle_select" => Some(Action::ToggleSelect),
      "switch_pane" => Some(Action::SwitchPane),
      "transfer" => Some(Action::Transfer),
      "toggle_help" => Some(Action::ToggleHelp),
      "none" => Some(Action::None),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_name_bindable_actions() {
    assert_eq!(Action::from_name("quit"), Some(Action::Quit));
    assert_eq!(Action::from_name("move_up"), Some(Action::MoveUp));
    assert_eq!(Action::from_name("move_down"), Some(Action::MoveDown));
    assert_eq!(Action::from_name("enter_dir"), Some(Action::EnterDir));
    assert_eq!(Action::from_name("go_parent"), Some(Action::GoParent));
    assert_eq!(Action::from_name("toggle_select"), Some(Action::ToggleSelect));
    assert_eq!(Action::from_name("switch_pane"), Some(Action::SwitchPane));
    assert_eq!(Action::from_name("transfer"), Some(Action::Transfer));
    assert_eq!(Action::from_name("toggle_help"), Some(Action::ToggleHelp));
  }

  #[test]
  fn test_from_name_none() {
    assert_eq!(Action::from_name("none"), Some(Action::None));
  }

  #[test]
  fn test_from_name_invalid() {
    assert_eq!(Action::from_name("garbage"), None);
    assert_eq!(Action::from_name(""), None);
  }

  #[test]
  fn test_from_name_unbindable() {
    assert_eq!(Action::from_name("dismiss"), None);
    assert_eq!(Action::from_name("resize"), None);
    assert_eq!(Action::from_name("tick"), None);
  }
}
