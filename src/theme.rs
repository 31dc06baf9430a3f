use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
  pub accent: Color,
  pub text: Color,
  pub text_dim: Color,
  pub text_muted: Color,
  pub border: Color,
  pub title_inactive: Color,
  pub bg_cursor_inactive: Color,
  pub bg_overlay: Color,
  pub bg_bar: Color,
  pub directory: Color,
  pub success: Color,
  pub warning: Color,
  pub error: Color,
  pub marked: Color,
  pub info: Color,
}

impl Theme {
  pub fn dark() -> Self {
    Self {
      accent: Color::Indexed(75),
      text: Color::Indexed(252),
      text_dim: Color::DarkGray,
      text_muted: Color::Indexed(241),
      border: Color::Indexed(240),
      title_inactive: Color::Indexed(245),
      bg_cursor_inactive: Color::Indexed(240),
      bg_overlay: Color::Indexed(235),
      bg_bar: Color::Indexed(236),
      directory: Color::Indexed(75),
      success: Color::Indexed(114),
      warning: Color::Indexed(214),
      error: Color::Indexed(167),
      marked: Color::Indexed(208),
      info: Color::Indexed(150),
    }
  }

  pub fn light() -> Self {
    Self {
      accent: Color::Indexed(27),
      text: Color::Indexed(235),
      text_dim: Color::Indexed(243),
      text_muted: Color::Indexed(245),
      border: Color::Indexed(250),
      title_inactive: Color::Indexed(243),
      bg_cursor_inactive: Color::Indexed(250),
      bg_overlay: Color::Indexed(255),
      bg_bar: Color::Indexed(253),
      directory: Color::Indexed(27),
      success: Color::Indexed(28),
      warning: Color::Indexed(172),
      error: Color::Indexed(124),
      marked: Color::Indexed(166),
      info: Color::Indexed(30),
    }
  }

  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "dark" => Some(Self::dark()),
      "light" => Some(Self::light()),
      _ => None,
    }
  }

  pub fn available_themes() -> &'static [&'static str] {
    &["dark", "light"]
  }
}

impl Default for Theme {
  fn default() -> Self {
    Self::dark()
  }
}
