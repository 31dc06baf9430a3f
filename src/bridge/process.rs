use std::io::{ErrorKind, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::error::BridgeError;
use super::{Bridge, BridgeOutput};

const POLL_INTERVAL: Duration = Duration::from_millis(15);

/// Runs the real bridge binary (`adb` unless configured otherwise).
#[derive(Debug, Clone)]
pub struct AdbBridge {
  program: String,
}

impl AdbBridge {
  pub fn new(program: impl Into<String>) -> Self {
    Self { program: program.into() }
  }
}

impl Bridge for AdbBridge {
  fn exec(&self, args: &[String], timeout: Duration) -> Result<BridgeOutput, BridgeError> {
    debug!(program = %self.program, ?args, "bridge call");
    let mut cmd = Command::new(&self.program);
    cmd.args(args);
    run_with_timeout(&self.program, &mut cmd, timeout)
  }
}

/// Spawns `cmd` with piped output and waits at most `timeout` for it to exit.
/// On expiry the child is killed and reaped before returning `Timeout`.
pub fn run_with_timeout(
  program: &str,
  cmd: &mut Command,
  timeout: Duration,
) -> Result<BridgeOutput, BridgeError> {
  let mut child = cmd
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .map_err(|source| {
      if source.kind() == ErrorKind::NotFound {
        BridgeError::NotFound { program: program.to_string() }
      } else {
        BridgeError::Spawn { program: program.to_string(), source }
      }
    })?;

  // Drain both pipes on their own threads so a chatty child can't block on a full pipe.
  let stdout = drain(child.stdout.take());
  let stderr = drain(child.stderr.take());

  let status = match wait_deadline(&mut child, timeout) {
    Ok(Some(status)) => status,
    Ok(None) => {
      let _ = child.kill();
      let _ = child.wait();
      warn!(program, timeout_secs = timeout.as_secs(), "bridge call timed out");
      return Err(BridgeError::Timeout { program: program.to_string(), timeout });
    }
    Err(source) => {
      let _ = child.kill();
      return Err(BridgeError::Spawn { program: program.to_string(), source });
    }
  };

  Ok(BridgeOutput {
    code: status.code(),
    stdout: join(stdout),
    stderr: join(stderr),
  })
}

fn wait_deadline(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
  let deadline = Instant::now() + timeout;
  loop {
    if let Some(status) = child.try_wait()? {
      return Ok(Some(status));
    }
    if Instant::now() >= deadline {
      return Ok(None);
    }
    thread::sleep(POLL_INTERVAL);
  }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
  pipe.map(|mut pipe| {
    thread::spawn(move || {
      let mut buf = Vec::new();
      let _ = pipe.read_to_end(&mut buf);
      String::from_utf8_lossy(&buf).into_owned()
    })
  })
}

fn join(handle: Option<JoinHandle<String>>) -> String {
  handle.and_then(|h| h.join().ok()).unwrap_or_default()
}
