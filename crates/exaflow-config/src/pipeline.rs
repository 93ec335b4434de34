use serde::{Deserialize, Serialize};

use crate::stage::StageDef;
use crate::task::TaskDef;

/// An ordered sequence of stages. The engine runs stages one after another in
/// the order they appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDef {
  pub name: String,
  pub stages: Vec<StageDef>,
}

impl PipelineDef {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      stages: Vec::new(),
    }
  }

  /// Append stages after any already present.
  pub fn add_stages(&mut self, stages: impl IntoIterator<Item = StageDef>) {
    self.stages.extend(stages);
  }

  /// Get a stage by name.
  pub fn get_stage(&self, name: &str) -> Option<&StageDef> {
    self.stages.iter().find(|s| s.name == name)
  }

  /// Iterate all tasks across stages, in execution order.
  pub fn tasks(&self) -> impl Iterator<Item = &TaskDef> {
    self.stages.iter().flat_map(|s| s.tasks.iter())
  }
}
