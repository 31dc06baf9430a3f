use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
  #[error("{program} not found; install Android SDK Platform-tools and add it to PATH")]
  NotFound { program: String },
  #[error("failed to run {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },
  #[error("{program} timed out after {}s", timeout.as_secs())]
  Timeout { program: String, timeout: Duration },
  #[error("{program} exited with status {code:?}: {stderr}")]
  Failed {
    program: String,
    code: Option<i32>,
    stderr: String,
  },
  #[error("no Android device connected or authorized; enable USB debugging and accept the prompt")]
  NoDevice,
}

impl BridgeError {
  pub fn is_timeout(&self) -> bool {
    matches!(self, BridgeError::Timeout { .. })
  }
}
