use serde::{Deserialize, Serialize};

/// A single external-executable invocation.
///
/// All fields are flat string lists: arguments are already stringified
/// tokens and are passed to the executable verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDef {
  /// Path of the program to run, rooted at the workflow's input directory.
  pub executable: String,

  #[serde(default)]
  pub arguments: Vec<String>,

  /// Shell commands run, in order, before the executable.
  #[serde(default)]
  pub pre_exec: Vec<String>,

  /// Source paths in the shared staging area the task needs read access to.
  #[serde(default)]
  pub link_input_data: Vec<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cpu_reqs: Option<CpuReqs>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub gpu_reqs: Option<GpuReqs>,
}

impl TaskDef {
  /// Create a task with only an executable set.
  pub fn new(executable: impl Into<String>) -> Self {
    Self {
      executable: executable.into(),
      arguments: Vec::new(),
      pre_exec: Vec::new(),
      link_input_data: Vec::new(),
      cpu_reqs: None,
      gpu_reqs: None,
    }
  }

  pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.arguments = arguments.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_pre_exec<I, S>(mut self, commands: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.pre_exec = commands.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_link_input_data<I, S>(mut self, links: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.link_input_data = links.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_cpu_reqs(mut self, reqs: CpuReqs) -> Self {
    self.cpu_reqs = Some(reqs);
    self
  }

  pub fn with_gpu_reqs(mut self, reqs: GpuReqs) -> Self {
    self.gpu_reqs = Some(reqs);
    self
  }

  /// The token immediately following `flag` in the argument list, if any.
  pub fn argument_after(&self, flag: &str) -> Option<&str> {
    self
      .arguments
      .iter()
      .position(|arg| arg == flag)
      .and_then(|idx| self.arguments.get(idx + 1))
      .map(String::as_str)
  }
}

/// Launch method for multi-process tasks. Unset (`null`) means a plain launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessType {
  #[serde(rename = "MPI")]
  Mpi,
}

/// Threading model for multi-threaded tasks. Unset (`null`) means none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadType {
  #[serde(rename = "OpenMP")]
  OpenMp,
}

/// CPU layout requested for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuReqs {
  pub cpu_processes: u32,
  #[serde(default)]
  pub cpu_process_type: Option<ProcessType>,
  pub cpu_threads: u32,
  #[serde(default)]
  pub cpu_thread_type: Option<ThreadType>,
}

impl Default for CpuReqs {
  fn default() -> Self {
    Self {
      cpu_processes: 1,
      cpu_process_type: None,
      cpu_threads: 1,
      cpu_thread_type: None,
    }
  }
}

/// GPU layout requested for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuReqs {
  pub gpu_processes: u32,
  #[serde(default)]
  pub gpu_process_type: Option<ProcessType>,
  pub gpu_threads: u32,
  #[serde(default)]
  pub gpu_thread_type: Option<ThreadType>,
}

impl Default for GpuReqs {
  fn default() -> Self {
    Self {
      gpu_processes: 1,
      gpu_process_type: None,
      gpu_threads: 1,
      gpu_thread_type: None,
    }
  }
}
