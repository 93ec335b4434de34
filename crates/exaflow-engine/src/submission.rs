use exaflow_config::{ResourceDescription, SharedDataDirective};
use exaflow_workflow::ValidatedPipeline;
use serde::Serialize;

use crate::context::EngineContext;

/// Everything handed to the engine's run entry point in one go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
  /// Forwarded unmodified.
  pub resource_desc: ResourceDescription,
  /// Copied into the shared staging area before any stage runs.
  pub shared_data: Vec<SharedDataDirective>,
  /// Pipelines to run. Stages inside each pipeline run in order.
  pub workflow: Vec<ValidatedPipeline>,
}

impl Submission {
  pub fn new(resource_desc: ResourceDescription) -> Self {
    Self {
      resource_desc,
      shared_data: Vec::new(),
      workflow: Vec::new(),
    }
  }

  pub fn with_shared_data(mut self, directive: SharedDataDirective) -> Self {
    self.shared_data.push(directive);
    self
  }

  pub fn with_pipeline(mut self, pipeline: ValidatedPipeline) -> Self {
    self.workflow.push(pipeline);
    self
  }

  pub fn task_count(&self) -> usize {
    self.workflow.iter().map(|p| p.tasks().count()).sum()
  }
}

/// Non-secret connection details recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
  pub rabbitmq_hostname: String,
  pub rabbitmq_port: u16,
  pub rabbitmq_username: String,
}

impl From<&EngineContext> for SessionInfo {
  fn from(ctx: &EngineContext) -> Self {
    Self {
      rabbitmq_hostname: ctx.rabbitmq.hostname.clone(),
      rabbitmq_port: ctx.rabbitmq.port,
      rabbitmq_username: ctx.rabbitmq.username.clone(),
    }
  }
}

/// The document an engine receives.
///
/// Passwords and the database URL never appear in it; engines that need them
/// take them from the [`EngineContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
  pub submission_id: String,
  pub session: SessionInfo,
  #[serde(flatten)]
  pub submission: Submission,
}

impl Manifest {
  pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(self)
  }
}
