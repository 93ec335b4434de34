//! The ExaConstit pipeline: environment setup, preprocessing of the ExaCA
//! microstructure, the main crystal-plasticity simulations, and Barlat yield
//! surface optimization over the results.
//!
//! Every path is `input_dir` joined by plain string concatenation. Stages after
//! setup share `${workflow_dir}` (exported by `scripts/paths.sh`) as their
//! working directory; each stage reads what the previous one wrote there.

use exaflow_config::{PipelineDef, SHARED_NAMESPACE, StageDef, StageKind, TaskDef};

/// Input root used when none is configured.
pub const DEFAULT_INPUT_DIR: &str = ".";

pub const PIPELINE_NAME: &str = "exaconstit";

/// Builder for the four-stage ExaConstit pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExaconstitWorkflow {
  input_dir: String,
}

impl Default for ExaconstitWorkflow {
  fn default() -> Self {
    Self::new(DEFAULT_INPUT_DIR)
  }
}

impl ExaconstitWorkflow {
  pub fn new(input_dir: impl Into<String>) -> Self {
    Self {
      input_dir: input_dir.into(),
    }
  }

  pub fn input_dir(&self) -> &str {
    &self.input_dir
  }

  /// Build the pipeline with all four stages in execution order.
  pub fn get(&self) -> PipelineDef {
    let mut pipeline = PipelineDef::new(PIPELINE_NAME);
    pipeline.add_stages([
      self.stage_setup(),
      self.stage_preprocess(),
      self.stage_main(),
      self.stage_postprocess(),
    ]);
    pipeline
  }

  pub fn stage(&self, kind: StageKind) -> StageDef {
    match kind {
      StageKind::Setup => self.stage_setup(),
      StageKind::Preprocess => self.stage_preprocess(),
      StageKind::Main => self.stage_main(),
      StageKind::Postprocess => self.stage_postprocess(),
    }
  }

  pub fn stage_setup(&self) -> StageDef {
    // conda, spack and flux installation all happen inside setup.sh
    let task = TaskDef::new(format!("{}/scripts/workflow/setup.sh", self.input_dir))
      .with_pre_exec(["export WORK_DIR=$PWD"])
      .with_link_input_data(self.shared_links());

    StageDef::single(StageKind::Setup, task)
  }

  pub fn stage_preprocess(&self) -> StageDef {
    let work_dir = self.work_dir("preprocessing");
    let task = TaskDef::new(format!("{work_dir}/exaconstit_cli_preprocessing.py"))
      .with_arguments([
        "-ifdir".to_string(),
        format!("{work_dir}/"),
        "-ifile".into(),
        "exaca.csv".into(),
        "-ofdir".into(),
        "./output/".into(),
        "-runame".into(),
        "simulation".into(),
        "-c".into(),
        "1".into(),
        "-mg".into(),
        "-mgdir".into(),
        "${exaconstit_build_dir}/bin/".into(),
        "-t".into(),
        "298.0".into(),
        "-fprops".into(),
        "./props_cp_voce_in625.txt".into(),
        "-nprops".into(),
        "17".into(),
        "-fstate".into(),
        "./state_cp_voce.txt".into(),
        "-nstates".into(),
        "24".into(),
      ])
      .with_pre_exec([
        self.source_paths(),
        "mkdir -p ${workflow_dir}".into(),
        "cd ${workflow_dir}".into(),
        "mkdir output".into(),
      ])
      .with_link_input_data(self.shared_links());

    StageDef::single(StageKind::Preprocess, task)
  }

  pub fn stage_main(&self) -> StageDef {
    let work_dir = self.work_dir("main_simulations");
    let task = TaskDef::new(format!("{work_dir}/job_cli.py"))
      .with_arguments([
        "-sdir".to_string(),
        format!("{work_dir}/"),
        "-odir".into(),
        "./runs/".into(),
        "-imtfile".into(),
        "options_master.toml".into(),
        "-iotfile".into(),
        "options.toml".into(),
        "-ijfile".into(),
        "hip_mechanics.flux".into(),
        "-ijfd".into(),
        format!("{work_dir}/"),
        "-iofile".into(),
        "simulation_test_matrix.csv".into(),
      ])
      .with_pre_exec([
        self.source_paths(),
        "cd ${workflow_dir}".into(),
        "mkdir runs".into(),
      ])
      .with_link_input_data(self.shared_links());

    StageDef::single(StageKind::Main, task)
  }

  pub fn stage_postprocess(&self) -> StageDef {
    let work_dir = self.work_dir("postprocessing");
    let task = TaskDef::new(format!("{work_dir}/barlat_optimize.py"))
      .with_arguments([
        "-sdir",
        "./runs/",
        "-odir",
        "./runs/",
        "-rve_id",
        "simulation",
      ])
      .with_pre_exec([self.source_paths(), "cd ${workflow_dir}".into()])
      .with_link_input_data(self.shared_links());

    StageDef::single(StageKind::Postprocess, task)
  }

  fn work_dir(&self, subdir: &str) -> String {
    format!("{}/{}", self.input_dir, subdir)
  }

  fn source_paths(&self) -> String {
    format!("source {}/scripts/paths.sh", self.input_dir)
  }

  fn shared_links(&self) -> [String; 1] {
    [format!("{}/{}/", SHARED_NAMESPACE, self.input_dir)]
  }
}
