use std::time::Duration;

use tracing::{debug, warn};

use super::entry::{DirEntry, sort_entries};
use crate::bridge::{Bridge, BridgeError, BridgeOutput, shell_quote};

#[derive(Debug, Clone, Copy)]
pub struct RemoteTimeouts {
  /// Budget for each listing strategy.
  pub list: Duration,
  /// Budget for each per-entry type or size probe.
  pub probe: Duration,
}

/// Listing commands, tried in order until one exits cleanly with output.
const LIST_STRATEGIES: &[fn(&str) -> String] = &[ls_one_per_line, find_depth_one, ls_plain];

fn ls_one_per_line(dir: &str) -> String {
  format!("ls -1 {} 2>/dev/null", shell_quote(dir))
}

fn find_depth_one(dir: &str) -> String {
  let q = shell_quote(dir);
  format!("find {q} -maxdepth 1 \\( -type f -o -type d \\) ! -path {q} 2>/dev/null")
}

fn ls_plain(dir: &str) -> String {
  format!("ls {} 2>/dev/null", shell_quote(dir))
}

/// Lists `dir` on the device, sorted directories-first.
pub fn list_remote(
  bridge: &dyn Bridge,
  dir: &str,
  timeouts: RemoteTimeouts,
) -> Result<Vec<DirEntry>, BridgeError> {
  let output = run_strategies(bridge, dir, timeouts.list)?;

  let mut entries = Vec::new();
  for line in output.stdout.lines() {
    let Some(name) = clean_name(line) else { continue };
    let full = join_remote(dir, &name);
    let is_dir = probe_is_dir(bridge, &full, timeouts.probe);
    let size = if is_dir { 0 } else { probe_size(bridge, &full, timeouts.probe) };
    entries.push(DirEntry { name, is_dir, size, target: None });
  }

  sort_entries(&mut entries);
  debug!(dir, count = entries.len(), "listed remote dir");
  Ok(entries)
}

fn run_strategies(
  bridge: &dyn Bridge,
  dir: &str,
  timeout: Duration,
) -> Result<BridgeOutput, BridgeError> {
  let mut clean_empty = None;
  let mut last_err = None;
  for (i, strategy) in LIST_STRATEGIES.iter().enumerate() {
    match bridge.shell(&strategy(dir), timeout) {
      Ok(out) if out.success() && !out.stdout.trim().is_empty() => return Ok(out),
      Ok(out) if out.success() => {
        debug!(dir, strategy = i, "listing strategy came back empty");
        clean_empty.get_or_insert(out);
      }
      Ok(out) => {
        debug!(dir, strategy = i, code = ?out.code, "listing strategy failed");
        last_err = Some(BridgeError::Failed {
          program: "ls".to_string(),
          code: out.code,
          stderr: out.stderr.trim().to_string(),
        });
      }
      Err(e) => {
        debug!(dir, strategy = i, error = %e, "listing strategy failed");
        last_err = Some(e);
      }
    }
  }

  // Any clean exit without output means the directory is empty, even if a later
  // fallback errored.
  if let Some(out) = clean_empty {
    return Ok(out);
  }
  let err = last_err.unwrap_or(BridgeError::Failed {
    program: "ls".to_string(),
    code: None,
    stderr: String::new(),
  });
  warn!(dir, error = %err, "unable to list remote dir");
  Err(err)
}

fn probe_is_dir(bridge: &dyn Bridge, path: &str, timeout: Duration) -> bool {
  let script = format!("test -d {} && echo DIR || echo FILE", shell_quote(path));
  match bridge.shell(&script, timeout) {
    Ok(out) => out.stdout.contains("DIR"),
    Err(e) => {
      debug!(path, error = %e, "type probe failed, assuming file");
      false
    }
  }
}

fn probe_size(bridge: &dyn Bridge, path: &str, timeout: Duration) -> u64 {
  let q = shell_quote(path);
  let script = format!("stat -c %s {q} 2>/dev/null || wc -c < {q} 2>/dev/null");
  bridge
    .shell(&script, timeout)
    .ok()
    .and_then(|out| out.stdout.trim().parse().ok())
    .unwrap_or(0)
}

/// Reduces one line of listing output to a bare entry name.
pub fn clean_name(line: &str) -> Option<String> {
  let name = line.trim().trim_matches(|c| c == '"' || c == '\'');
  let name = name.strip_prefix("./").unwrap_or(name);
  let name = name.trim_end_matches('/');
  let name = name.rsplit('/').next().unwrap_or(name).trim();
  if name.is_empty() || name == "." || name == ".." {
    return None;
  }
  Some(name.to_string())
}

pub fn join_remote(dir: &str, name: &str) -> String {
  format!("{}/{}", dir.trim_end_matches('/'), name)
}

/// Strips the last segment; an empty result maps to `/`.
pub fn parent_remote(dir: &str) -> String {
  let trimmed = dir.trim_end_matches('/');
  match trimmed.rfind('/') {
    Some(0) | None => "/".to_string(),
    Some(idx) => trimmed[..idx].to_string(),
  }
}

/// Final path segment, used as the local file name on pull.
pub fn remote_file_name(path: &str) -> &str {
  path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}
