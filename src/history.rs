//! Retained assessment history, persisted as a JSON array (newest first).
//!
//! The store is the only owner of results. It is mutated by appending whole
//! records or deleting by id; every mutation writes the full history to disk
//! (through `tokio::fs`) before it becomes visible in memory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::domain::AssessmentResult;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct History {
  path: Option<PathBuf>,
  results: Vec<AssessmentResult>,
}

impl History {
  /// History that lives only in memory (nothing is flushed).
  pub fn in_memory() -> Self {
    Self::default()
  }

  /// Rehydrate from `path`. A missing file starts empty; an unreadable or corrupt
  /// one is logged and also starts empty, and is overwritten on the next mutation.
  #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
  pub fn open(path: impl AsRef<Path>) -> Self {
    let path = path.as_ref().to_path_buf();
    let results = match fs::read_to_string(&path) {
      Ok(text) => match serde_json::from_str::<Vec<AssessmentResult>>(&text) {
        Ok(results) => {
          info!(target: "history", count = results.len(), "Loaded assessment history");
          results
        }
        Err(e) => {
          error!(target: "history", error = %e, "History file is corrupt; starting empty");
          Vec::new()
        }
      },
      Err(e) if e.kind() == ErrorKind::NotFound => {
        info!(target: "history", "No history file yet; starting empty");
        Vec::new()
      }
      Err(e) => {
        error!(target: "history", error = %e, "Failed to read history file; starting empty");
        Vec::new()
      }
    };
    Self { path: Some(path), results }
  }

  pub fn path(&self) -> Option<&Path> {
    self.path.as_deref()
  }

  /// All results, newest first.
  pub fn list(&self) -> &[AssessmentResult] {
    &self.results
  }

  pub fn len(&self) -> usize {
    self.results.len()
  }

  pub fn is_empty(&self) -> bool {
    self.results.is_empty()
  }

  pub fn get(&self, id: &str) -> Option<&AssessmentResult> {
    self.results.iter().find(|r| r.id == id)
  }

  /// Put one result at the front.
  pub async fn record(&mut self, result: AssessmentResult) -> Result<()> {
    self.record_batch(vec![result]).await
  }

  /// Put a batch at the front, keeping the batch's own order.
  #[instrument(level = "debug", skip_all, fields(count = batch.len()))]
  pub async fn record_batch(&mut self, batch: Vec<AssessmentResult>) -> Result<()> {
    if batch.is_empty() {
      return Ok(());
    }
    let mut next = batch;
    next.extend(self.results.iter().cloned());
    self.commit(next).await?;
    debug!(target: "history", total = self.results.len(), "Recorded results");
    Ok(())
  }

  /// Remove the result with `id`. Returns `false` when it was not present.
  #[instrument(level = "debug", skip(self))]
  pub async fn delete(&mut self, id: &str) -> Result<bool> {
    if self.get(id).is_none() {
      warn!(target: "history", %id, "Delete requested for unknown result");
      return Ok(false);
    }
    let next: Vec<AssessmentResult> = self.results.iter().filter(|r| r.id != id).cloned().collect();
    self.commit(next).await?;
    info!(target: "history", %id, total = self.results.len(), "Deleted result");
    Ok(true)
  }

  /// Flush `next` to disk, then swap it in. On error the old history stays.
  async fn commit(&mut self, next: Vec<AssessmentResult>) -> Result<()> {
    if let Some(path) = &self.path {
      write_atomically(path, serde_json::to_string_pretty(&next)?).await?;
    }
    self.results = next;
    Ok(())
  }
}

fn temp_path(path: &Path) -> PathBuf {
  let mut tmp = path.as_os_str().to_owned();
  tmp.push(".tmp");
  PathBuf::from(tmp)
}

/// Write `<path>.tmp` and rename it over `path`. The temp file is removed if the rename fails.
async fn write_atomically(path: &Path, contents: String) -> Result<()> {
  let tmp = temp_path(path);
  tokio::fs::write(&tmp, contents).await?;
  if let Err(e) = tokio::fs::rename(&tmp, path).await {
    if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
      warn!(target: "history", error = %cleanup, tmp = %tmp.display(), "Failed to remove temp history file");
    }
    return Err(e.into());
  }
  Ok(())
}
