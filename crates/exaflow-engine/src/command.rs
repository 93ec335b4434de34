use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::context::{EngineContext, SUBMISSION_ID_ENV};
use crate::engine::{ExecutionEngine, RunOutcome};
use crate::error::EngineError;
use crate::submission::Manifest;

/// Runs the engine as a child process.
///
/// The manifest is written to the child's stdin as JSON and stdin is then
/// closed. Connection settings, including the database URL, go into the
/// child's environment only. The child's stdout and stderr are inherited.
///
/// The launcher is killed if the run is abandoned before it exits, either by
/// a failed manifest write or by dropping the `run` future.
#[derive(Debug, Clone)]
pub struct CommandEngine {
  program: String,
  args: Vec<String>,
  current_dir: Option<PathBuf>,
}

impl CommandEngine {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      current_dir: None,
    }
  }

  pub fn with_args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args = args.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.current_dir = Some(dir.into());
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }
}

#[async_trait]
impl ExecutionEngine for CommandEngine {
  async fn run(
    &self,
    ctx: &EngineContext,
    manifest: &Manifest,
  ) -> Result<RunOutcome, EngineError> {
    let payload = serde_json::to_vec(manifest)?;

    let mut cmd = Command::new(&self.program);
    cmd
      .args(&self.args)
      .envs(ctx.engine_env())
      .env(SUBMISSION_ID_ENV, &manifest.submission_id)
      .stdin(Stdio::piped())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit())
      .kill_on_drop(true);

    if let Some(dir) = &self.current_dir {
      cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|source| EngineError::Spawn {
      program: self.program.clone(),
      source,
    })?;

    info!(
      submission_id = %manifest.submission_id,
      program = %self.program,
      pid = ?child.id(),
      "engine launcher started"
    );

    if let Some(mut stdin) = child.stdin.take() {
      match stdin.write_all(&payload).await {
        Ok(()) => {}
        // The launcher may exit without reading; its exit status decides.
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
          warn!(submission_id = %manifest.submission_id, "engine launcher closed stdin early");
        }
        Err(e) => {
          warn!(submission_id = %manifest.submission_id, error = %e, "killing engine launcher");
          drop(stdin);
          let _ = child.start_kill();
          let _ = child.wait().await;
          return Err(EngineError::LauncherIo(e));
        }
      }
      drop(stdin);
    }

    let status = child.wait().await.map_err(EngineError::LauncherIo)?;
    debug!(submission_id = %manifest.submission_id, %status, "engine launcher exited");

    if status.success() {
      Ok(RunOutcome {
        exit_code: status.code(),
      })
    } else {
      Err(EngineError::LauncherFailed {
        code: status.code(),
      })
    }
  }
}
