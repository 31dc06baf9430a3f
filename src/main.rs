mod action;
mod app;
mod bridge;
mod config;
mod event;
mod fs;
mod icons;
mod logging;
mod pane;
mod selection;
mod theme;
mod transfer;
mod ui;

use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
  EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};

use crate::app::App;
use crate::bridge::{AdbBridge, check_device};
use crate::event::{Event, EventLoop, map_key};

fn main() -> Result<()> {
  let args: Vec<String> = std::env::args().skip(1).collect();

  let mut show_help = false;
  let mut show_version = false;
  let mut show_init = false;

  for arg in &args {
    match arg.as_str() {
      "--help" | "-h" => show_help = true,
      "--version" | "-V" => show_version = true,
      "--init" => show_init = true,
      _ => {
        eprintln!("apull: unknown option '{arg}'");
        std::process::exit(1);
      }
    }
  }

  if show_help {
    println!(concat!(
      "apull - copy files from an Android device over adb\n",
      "\n",
      "Usage: apull [options]\n",
      "\n",
      "Options:\n",
      "  --init                   Write the default config file to ~/.config/apull/\n",
      "  -h, --help               Print this help message\n",
      "  -V, --version            Print version\n",
      "\n",
      "Logs are written to the local data directory; set APULL_LOG to change the level.",
    ));
    return Ok(());
  }

  if show_version {
    println!("apull {}", env!("CARGO_PKG_VERSION"));
    return Ok(());
  }

  if show_init {
    let config_path = match config::Config::config_path() {
      Ok(p) => p,
      Err(e) => {
        eprintln!("apull: {e}");
        std::process::exit(1);
      }
    };

    let write_config = if config_path.exists() {
      eprint!("{} already exists. Overwrite? [y/N] ", config_path.display());
      let mut answer = String::new();
      io::stdin().read_line(&mut answer).unwrap_or(0);
      answer.trim().eq_ignore_ascii_case("y")
    } else {
      true
    };

    if write_config {
      match config::Config::dump_default_config(&config_path) {
        Ok(()) => println!("{}", config_path.display()),
        Err(e) => {
          eprintln!("apull: {e}");
          std::process::exit(1);
        }
      }
    }

    return Ok(());
  }

  // Keep the guard alive so the background writer flushes on exit.
  // `process::exit` skips destructors, so it is dropped by hand before each exit.
  let log_guard = match logging::init() {
    Ok(guard) => Some(guard),
    Err(e) => {
      eprintln!("apull: logging disabled: {e:#}");
      None
    }
  };

  let (config, config_errors) = config::Config::load();
  info!(version = env!("CARGO_PKG_VERSION"), "starting");

  // The device must answer before the terminal is taken over
  let bridge = AdbBridge::new(config.bridge.program.clone());
  let devices = match check_device(&bridge, config.bridge.device_timeout) {
    Ok(devices) => devices,
    Err(e) => {
      error!(error = %e, "no usable device");
      eprintln!("apull: {e}");
      eprintln!("Connect a device with USB debugging enabled and authorize this computer.");
      drop(log_guard);
      std::process::exit(1);
    }
  };
  info!(devices = ?devices, "device check passed");

  let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

  // Install panic hook that restores terminal
  let original_hook = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    let _ = restore_terminal();
    original_hook(info);
  }));

  setup_terminal()?;
  let backend = CrosstermBackend::new(io::stdout());
  let mut terminal = Terminal::new(backend)?;

  // The first remote listing probes every entry and can take a while
  terminal.draw(|frame| ui::draw_loading(frame, "Loading phone files...", &config.theme))?;

  let mut app = App::new(&config, Box::new(bridge), home);
  app.device = devices.into_iter().next();

  if !config_errors.is_empty() {
    app.show_message("Config", config_errors);
  }

  let events = EventLoop::new(Duration::from_millis(config.tick_rate_ms));

  let result = run(&mut terminal, &mut app, &config, &events);

  restore_terminal()?;

  if let Err(e) = result {
    error!(error = %e, "exiting with error");
    eprintln!("apull: {e:#}");
    drop(log_guard);
    std::process::exit(1);
  }

  info!("exiting");
  Ok(())
}

fn run(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  config: &config::Config,
  events: &EventLoop,
) -> Result<()> {
  loop {
    terminal.draw(|frame| ui::draw(frame, app, config))?;

    match events.next()? {
      Event::Key(key) => {
        let action = map_key(key, app.input_mode, config);
        app.update(action)?;
      }
      Event::Resize(w, h) => {
        app.update(crate::action::Action::Resize(w, h))?;
      }
      Event::Tick => {
        app.update(crate::action::Action::Tick)?;
      }
    }

    if app.transfer_requested {
      let mut draw_error = None;
      app.run_transfer(&mut |progress: transfer::Progress<'_>| {
        if draw_error.is_none()
          && let Err(e) = terminal.draw(|frame| ui::draw_progress(frame, progress, &config.theme))
        {
          draw_error = Some(e);
        }
      });
      if let Some(e) = draw_error {
        return Err(e.into());
      }
      // Keys pressed while the batch was running are discarded
      events.drain();
    }

    if app.should_quit {
      return Ok(());
    }
  }
}

fn setup_terminal() -> Result<()> {
  enable_raw_mode()?;
  execute!(io::stdout(), EnterAlternateScreen)?;
  Ok(())
}

fn restore_terminal() -> Result<()> {
  disable_raw_mode()?;
  execute!(io::stdout(), LeaveAlternateScreen)?;
  Ok(())
}
