//! Error types for submission.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while handing a submission to the engine.
///
/// Failures of individual stages are not represented here: they are handled
/// inside the engine and surface, at most, as a non-zero launcher exit.
#[derive(Debug, Error)]
pub enum EngineError {
  /// The submission contains no pipelines.
  #[error("submission has no pipelines")]
  EmptyWorkflow,

  /// Failed to serialize the manifest.
  #[error("failed to serialize manifest: {0}")]
  Serialize(#[from] serde_json::Error),

  /// Failed to write the manifest file.
  #[error("failed to write manifest to {}: {source}", path.display())]
  WriteManifest {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The launcher process could not be started.
  #[error("failed to spawn engine launcher '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// I/O with the running launcher failed.
  #[error("engine launcher i/o failed: {0}")]
  LauncherIo(#[source] std::io::Error),

  /// The launcher exited unsuccessfully. `code` is `None` when it was killed
  /// by a signal.
  #[error("engine launcher exited unsuccessfully (code: {code:?})")]
  LauncherFailed { code: Option<i32> },
}
