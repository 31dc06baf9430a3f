use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::bridge::Bridge;
use crate::fs::remote::remote_file_name;
use crate::selection::Selection;

#[derive(Debug, Error)]
pub enum TransferError {
  #[error("No files selected for copying")]
  NothingSelected,
  #[error("cannot create destination {}: {source}", path.display())]
  CreateDestination {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
  pub remote: String,
  pub local: PathBuf,
  /// `None` on success, otherwise why the pull failed.
  pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
  pub destination: PathBuf,
  pub succeeded: usize,
  pub failed: usize,
  pub items: Vec<ItemResult>,
}

/// Snapshot handed to the progress callback before each pull.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
  pub index: usize,
  pub total: usize,
  pub name: &'a str,
}

/// Pulls every selected path into `dest`, one at a time. A failed item is recorded
/// and the batch moves on; only an uncreatable destination aborts the batch.
pub fn transfer(
  bridge: &dyn Bridge,
  selection: &Selection,
  dest: &Path,
  timeout: Duration,
  on_progress: &mut dyn FnMut(Progress<'_>),
) -> Result<TransferReport, TransferError> {
  if selection.is_empty() {
    return Err(TransferError::NothingSelected);
  }

  std::fs::create_dir_all(dest).map_err(|source| TransferError::CreateDestination {
    path: dest.to_path_buf(),
    source,
  })?;

  let total = selection.len();
  info!(total, dest = %dest.display(), "starting transfer batch");

  let mut report = TransferReport { destination: dest.to_path_buf(), ..Default::default() };
  for (index, remote) in selection.iter().enumerate() {
    let name = remote_file_name(remote);
    let local = dest.join(name);
    on_progress(Progress { index, total, name });

    let error = match bridge.pull(remote, &local.to_string_lossy(), timeout) {
      Ok(()) => {
        info!(remote, local = %local.display(), "pulled");
        report.succeeded += 1;
        None
      }
      Err(e) => {
        warn!(remote, error = %e, timed_out = e.is_timeout(), "pull failed");
        report.failed += 1;
        Some(e.to_string())
      }
    };
    report.items.push(ItemResult { remote: remote.to_string(), local, error });
  }

  info!(succeeded = report.succeeded, failed = report.failed, "transfer batch finished");
  Ok(report)
}
