use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
  #[error("pipeline '{0}' has no stages")]
  NoStages(String),

  #[error("stage '{0}' has no tasks")]
  EmptyStage(String),

  #[error("duplicate stage name: {0}")]
  DuplicateStage(String),

  #[error("task {index} in stage '{stage}' has an empty executable")]
  EmptyExecutable { stage: String, index: usize },

  #[error(
    "executable '{executable}' in stage '{stage}' is not under input directory '{input_dir}'"
  )]
  ExecutableOutsideInputDir {
    stage: String,
    executable: String,
    input_dir: String,
  },
}
