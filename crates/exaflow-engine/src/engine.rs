use async_trait::async_trait;
use tracing::info;

use crate::context::EngineContext;
use crate::error::EngineError;
use crate::events::{NoopNotifier, SubmissionEvent, SubmissionNotifier};
use crate::submission::{Manifest, SessionInfo, Submission};

/// What an engine reports back once its run entry point returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
  /// Exit code of the engine process, if one was launched.
  pub exit_code: Option<i32>,
}

/// Result of a complete submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
  pub submission_id: String,
  pub exit_code: Option<i32>,
}

/// The external execution engine's run entry point.
///
/// `run` returns only once the engine is done with the whole workflow. There
/// is no interaction with a run in progress.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
  async fn run(&self, ctx: &EngineContext, manifest: &Manifest) -> Result<RunOutcome, EngineError>;
}

/// Packages submissions and hands them to an [`ExecutionEngine`].
///
/// Generic over `N: SubmissionNotifier` so callers choose how events are
/// observed. `Submitter::new` discards them.
pub struct Submitter<E: ExecutionEngine, N: SubmissionNotifier = NoopNotifier> {
  engine: E,
  notifier: N,
}

impl<E: ExecutionEngine> Submitter<E, NoopNotifier> {
  pub fn new(engine: E) -> Self {
    Self::with_notifier(engine, NoopNotifier)
  }
}

impl<E: ExecutionEngine, N: SubmissionNotifier> Submitter<E, N> {
  pub fn with_notifier(engine: E, notifier: N) -> Self {
    Self { engine, notifier }
  }

  pub fn engine(&self) -> &E {
    &self.engine
  }

  /// Submit a workflow and wait for the engine to return.
  pub async fn submit(
    &self,
    ctx: &EngineContext,
    submission: Submission,
  ) -> Result<RunReport, EngineError> {
    if submission.workflow.is_empty() {
      return Err(EngineError::EmptyWorkflow);
    }

    let submission_id = uuid::Uuid::new_v4().to_string();
    let pipelines = submission.workflow.len();
    let tasks = submission.task_count();

    let manifest = Manifest {
      submission_id: submission_id.clone(),
      session: SessionInfo::from(ctx),
      submission,
    };

    info!(
      %submission_id,
      resource = %manifest.submission.resource_desc.resource,
      walltime = manifest.submission.resource_desc.walltime,
      "handing workflow to execution engine"
    );

    self.notifier.notify(SubmissionEvent::Submitted {
      submission_id: submission_id.clone(),
      pipelines,
      tasks,
    });

    match self.engine.run(ctx, &manifest).await {
      Ok(outcome) => {
        self.notifier.notify(SubmissionEvent::Completed {
          submission_id: submission_id.clone(),
          exit_code: outcome.exit_code,
        });
        Ok(RunReport {
          submission_id,
          exit_code: outcome.exit_code,
        })
      }
      Err(e) => {
        self.notifier.notify(SubmissionEvent::Failed {
          submission_id,
          error: e.to_string(),
        });
        Err(e)
      }
    }
  }
}
