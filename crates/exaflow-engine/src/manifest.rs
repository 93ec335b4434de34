use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::context::EngineContext;
use crate::engine::{ExecutionEngine, RunOutcome};
use crate::error::EngineError;
use crate::submission::Manifest;

/// Writes the manifest to a file instead of launching anything.
///
/// Used for dry runs and for handing the workflow to tooling that picks
/// manifests up on its own.
#[derive(Debug, Clone)]
pub struct ManifestEngine {
  path: PathBuf,
}

impl ManifestEngine {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

#[async_trait]
impl ExecutionEngine for ManifestEngine {
  async fn run(
    &self,
    _ctx: &EngineContext,
    manifest: &Manifest,
  ) -> Result<RunOutcome, EngineError> {
    let json = manifest.to_json_pretty()?;

    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent)
        .await
        .map_err(|source| EngineError::WriteManifest {
          path: self.path.clone(),
          source,
        })?;
    }

    tokio::fs::write(&self.path, json)
      .await
      .map_err(|source| EngineError::WriteManifest {
        path: self.path.clone(),
        source,
      })?;

    info!(
      submission_id = %manifest.submission_id,
      path = %self.path.display(),
      "manifest written"
    );

    Ok(RunOutcome { exit_code: None })
  }
}
