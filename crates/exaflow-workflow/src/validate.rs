use std::collections::HashSet;
use std::ops::Deref;

use exaflow_config::PipelineDef;
use serde::Serialize;
use tracing::debug;

use crate::error::WorkflowError;

/// A pipeline that passed [`validate_pipeline`].
///
/// Serializes exactly like the wrapped [`PipelineDef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedPipeline {
  pipeline: PipelineDef,
}

impl ValidatedPipeline {
  pub fn into_inner(self) -> PipelineDef {
    self.pipeline
  }
}

impl Deref for ValidatedPipeline {
  type Target = PipelineDef;

  fn deref(&self) -> &Self::Target {
    &self.pipeline
  }
}

/// Check the structural contract of a pipeline before it is submitted.
///
/// Paths are checked textually against `input_dir`; nothing on disk is
/// consulted.
pub fn validate_pipeline(
  pipeline: &PipelineDef,
  input_dir: &str,
) -> Result<ValidatedPipeline, WorkflowError> {
  if pipeline.stages.is_empty() {
    return Err(WorkflowError::NoStages(pipeline.name.clone()));
  }

  let prefix = format!("{}/", input_dir.trim_end_matches('/'));
  let mut seen = HashSet::new();

  for stage in &pipeline.stages {
    if !seen.insert(stage.name.as_str()) {
      return Err(WorkflowError::DuplicateStage(stage.name.clone()));
    }
    if stage.tasks.is_empty() {
      return Err(WorkflowError::EmptyStage(stage.name.clone()));
    }

    for (index, task) in stage.tasks.iter().enumerate() {
      if task.executable.trim().is_empty() {
        return Err(WorkflowError::EmptyExecutable {
          stage: stage.name.clone(),
          index,
        });
      }
      if !task.executable.starts_with(&prefix) {
        return Err(WorkflowError::ExecutableOutsideInputDir {
          stage: stage.name.clone(),
          executable: task.executable.clone(),
          input_dir: input_dir.to_string(),
        });
      }
    }
  }

  debug!(
    pipeline = %pipeline.name,
    stages = pipeline.stages.len(),
    "pipeline validated"
  );

  Ok(ValidatedPipeline {
    pipeline: pipeline.clone(),
  })
}

#[cfg(test)]
mod tests {
  use exaflow_config::{StageDef, StageKind, TaskDef};

  use super::*;
  use crate::ExaconstitWorkflow;

  fn pipeline_with(stages: Vec<StageDef>) -> PipelineDef {
    let mut pipeline = PipelineDef::new("test");
    pipeline.add_stages(stages);
    pipeline
  }

  #[test]
  fn test_built_pipeline_validates() {
    let workflow = ExaconstitWorkflow::new("input_data");
    let validated = validate_pipeline(&workflow.get(), workflow.input_dir()).unwrap();

    assert_eq!(validated.stages.len(), 4);
    assert_eq!(validated.into_inner(), workflow.get());
  }

  #[test]
  fn test_validation_borrows_pipeline() {
    let pipeline = ExaconstitWorkflow::new("input_data").get();
    let validated = validate_pipeline(&pipeline, "input_data").unwrap();

    assert_eq!(*validated, pipeline);
    assert_eq!(pipeline.stages.len(), 4);
  }

  #[test]
  fn test_trailing_slash_on_input_dir() {
    let workflow = ExaconstitWorkflow::new("input_data");
    assert!(validate_pipeline(&workflow.get(), "input_data/").is_ok());
  }

  #[test]
  fn test_rejects_empty_pipeline() {
    let err = validate_pipeline(&PipelineDef::new("empty"), "d").unwrap_err();
    assert_eq!(err, WorkflowError::NoStages("empty".to_string()));
  }

  #[test]
  fn test_rejects_stage_without_tasks() {
    let pipeline = pipeline_with(vec![StageDef {
      name: "setup".to_string(),
      tasks: vec![],
    }]);

    let err = validate_pipeline(&pipeline, "d").unwrap_err();
    assert_eq!(err, WorkflowError::EmptyStage("setup".to_string()));
  }

  #[test]
  fn test_rejects_duplicate_stage() {
    let pipeline = pipeline_with(vec![
      StageDef::single(StageKind::Main, TaskDef::new("d/a")),
      StageDef::single(StageKind::Main, TaskDef::new("d/b")),
    ]);

    let err = validate_pipeline(&pipeline, "d").unwrap_err();
    assert_eq!(err, WorkflowError::DuplicateStage("main".to_string()));
  }

  #[test]
  fn test_rejects_empty_executable() {
    let pipeline = pipeline_with(vec![StageDef::single(StageKind::Setup, TaskDef::new(" "))]);

    let err = validate_pipeline(&pipeline, "d").unwrap_err();
    assert!(matches!(err, WorkflowError::EmptyExecutable { index: 0, .. }));
  }

  #[test]
  fn test_rejects_executable_outside_input_dir() {
    let workflow = ExaconstitWorkflow::new("input_data");
    let err = validate_pipeline(&workflow.get(), "other").unwrap_err();

    match err {
      WorkflowError::ExecutableOutsideInputDir {
        stage, executable, ..
      } => {
        assert_eq!(stage, "setup");
        assert_eq!(executable, "input_data/scripts/workflow/setup.sh");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_prefix_match_is_per_component() {
    let pipeline = pipeline_with(vec![StageDef::single(
      StageKind::Setup,
      TaskDef::new("input_data_old/setup.sh"),
    )]);

    assert!(validate_pipeline(&pipeline, "input_data").is_err());
  }

  #[test]
  fn test_serializes_transparently() {
    let workflow = ExaconstitWorkflow::new("input_data");
    let validated = validate_pipeline(&workflow.get(), "input_data").unwrap();

    assert_eq!(
      serde_json::to_value(&validated).unwrap(),
      serde_json::to_value(workflow.get()).unwrap()
    );
  }
}
