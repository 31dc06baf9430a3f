use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "APULL_LOG";

pub const LOG_FILE: &str = "apull.log";

pub fn log_dir() -> Option<PathBuf> {
  dirs::data_local_dir().map(|d| d.join("apull"))
}

/// Logs go to a file; the terminal belongs to the UI.
/// The returned guard must stay alive until exit so buffered lines are flushed.
pub fn init() -> Result<WorkerGuard> {
  let dir = log_dir().context("could not determine local data directory")?;
  let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
  let (subscriber, guard) = file_subscriber(&dir, env_filter)?;
  subscriber.try_init().context("installing log subscriber")?;
  Ok(guard)
}

/// Subscriber writing plain lines to `<dir>/apull.log` through a background writer.
fn file_subscriber(
  dir: &Path,
  filter: EnvFilter,
) -> Result<(impl tracing::Subscriber + Send + Sync + 'static, WorkerGuard)> {
  std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

  let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
  let (file_nb, guard) = tracing_appender::non_blocking(file_appender);

  let subscriber = tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb));

  Ok((subscriber, guard))
}
