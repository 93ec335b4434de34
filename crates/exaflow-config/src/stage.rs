use std::fmt;

use serde::{Deserialize, Serialize};

use crate::task::TaskDef;

/// The phases of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
  Setup,
  Preprocess,
  Main,
  Postprocess,
}

impl StageKind {
  /// All stage kinds in the order the engine runs them.
  pub const ORDERED: [StageKind; 4] = [
    StageKind::Setup,
    StageKind::Preprocess,
    StageKind::Main,
    StageKind::Postprocess,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      StageKind::Setup => "setup",
      StageKind::Preprocess => "preprocess",
      StageKind::Main => "main",
      StageKind::Postprocess => "postprocess",
    }
  }
}

impl fmt::Display for StageKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An ordered group of tasks run as one phase of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDef {
  pub name: String,
  pub tasks: Vec<TaskDef>,
}

impl StageDef {
  /// A stage holding exactly one task.
  pub fn single(kind: StageKind, task: TaskDef) -> Self {
    Self {
      name: kind.as_str().to_string(),
      tasks: vec![task],
    }
  }

  /// The first task of the stage.
  pub fn task(&self) -> Option<&TaskDef> {
    self.tasks.first()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ordered_kinds_sort_in_execution_order() {
    let mut kinds = vec![
      StageKind::Postprocess,
      StageKind::Setup,
      StageKind::Main,
      StageKind::Preprocess,
    ];
    kinds.sort();
    assert_eq!(kinds, StageKind::ORDERED);
  }

  #[test]
  fn test_single_stage_is_named_after_kind() {
    let stage = StageDef::single(StageKind::Main, TaskDef::new("x/job_cli.py"));

    assert_eq!(stage.name, "main");
    assert_eq!(stage.tasks.len(), 1);
    assert_eq!(stage.task().map(|t| t.executable.as_str()), Some("x/job_cli.py"));
  }
}
