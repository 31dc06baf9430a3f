pub mod error;
pub mod process;

use std::time::Duration;

use tracing::info;

pub use error::BridgeError;
pub use process::AdbBridge;

/// Captured result of one bridge invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BridgeOutput {
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl BridgeOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// A blocking call into the device bridge: argument vector in, captured output out.
pub trait Bridge {
  fn exec(&self, args: &[String], timeout: Duration) -> Result<BridgeOutput, BridgeError>;

  /// Runs `script` through the device shell.
  fn shell(&self, script: &str, timeout: Duration) -> Result<BridgeOutput, BridgeError> {
    self.exec(&["shell".to_string(), script.to_string()], timeout)
  }

  /// Copies one remote file to `local`. Any non-zero exit is an error.
  fn pull(&self, remote: &str, local: &str, timeout: Duration) -> Result<(), BridgeError> {
    let args = ["pull".to_string(), remote.to_string(), local.to_string()];
    let out = self.exec(&args, timeout)?;
    if out.success() {
      Ok(())
    } else {
      Err(BridgeError::Failed {
        program: "pull".to_string(),
        code: out.code,
        stderr: out.stderr.trim().to_string(),
      })
    }
  }
}

impl<F> Bridge for F
where
  F: Fn(&[String], Duration) -> Result<BridgeOutput, BridgeError>,
{
  fn exec(&self, args: &[String], timeout: Duration) -> Result<BridgeOutput, BridgeError> {
    self(args, timeout)
  }
}

/// Quotes `s` for the POSIX shell running on the device.
pub fn shell_quote(s: &str) -> String {
  format!("'{}'", s.replace('\'', r"'\''"))
}

/// Asks the bridge for attached devices and returns the serials in `device` state.
pub fn check_device(bridge: &dyn Bridge, timeout: Duration) -> Result<Vec<String>, BridgeError> {
  let out = bridge.exec(&["devices".to_string()], timeout)?;
  if !out.success() {
    return Err(BridgeError::Failed {
      program: "devices".to_string(),
      code: out.code,
      stderr: out.stderr.trim().to_string(),
    });
  }
  let serials = parse_devices(&out.stdout);
  if serials.is_empty() {
    return Err(BridgeError::NoDevice);
  }
  info!(?serials, "device connected");
  Ok(serials)
}

fn parse_devices(stdout: &str) -> Vec<String> {
  stdout
    .lines()
    .skip(1) // "List of devices attached"
    .filter_map(|line| {
      let mut parts = line.split_whitespace();
      match (parts.next(), parts.next()) {
        (Some(serial), Some("device")) => Some(serial.to_string()),
        _ => None,
      }
    })
    .collect()
}
