use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use exaflow_config::{ResourceDescription, ResourceOverrides, SharedDataDirective};
use exaflow_credentials::{CREDS_FILE_NAME, Credentials};
use exaflow_engine::{
  CommandEngine, EngineContext, ExecutionEngine, ManifestEngine, RunReport, Submission,
  Submitter, TracingNotifier,
};
use exaflow_workflow::{ExaconstitWorkflow, validate_pipeline};

/// exaflow - submit the ExaConstit pipeline to an external execution engine
#[derive(Parser)]
#[command(name = "exaflow")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the workflow and hand it to the execution engine
  Submit(SubmitArgs),

  /// Print the built pipeline as JSON
  Describe {
    /// Root directory of the workflow's input data
    #[arg(long, default_value = "input_data")]
    input_dir: String,
  },

  /// Load and validate a credentials file
  CheckCreds {
    /// Path to the credentials file
    #[arg(long, default_value = CREDS_FILE_NAME)]
    creds: PathBuf,
  },
}

#[derive(Args)]
#[command(group(
  clap::ArgGroup::new("target")
    .required(true)
    .args(["launcher", "manifest"]),
))]
struct SubmitArgs {
  /// Path to the credentials file
  #[arg(long, default_value = CREDS_FILE_NAME)]
  creds: PathBuf,

  /// Root directory of the workflow's input data
  #[arg(long, default_value = "input_data")]
  input_dir: String,

  /// JSON file with resource description fields (partial records allowed)
  #[arg(long)]
  resource_file: Option<PathBuf>,

  #[command(flatten)]
  resource_flags: ResourceFlags,

  /// Shared data directive, '<source> > <destination>' (repeatable)
  #[arg(long = "shared-data")]
  shared_data: Vec<SharedDataDirective>,

  /// Engine launcher program; receives the manifest on stdin
  #[arg(long)]
  launcher: Option<String>,

  /// Working directory for the launcher
  #[arg(long, requires = "launcher")]
  launcher_dir: Option<PathBuf>,

  /// Write the manifest to this path instead of launching the engine
  #[arg(long)]
  manifest: Option<PathBuf>,

  /// Arguments passed to the launcher
  #[arg(last = true)]
  launcher_args: Vec<String>,
}

#[derive(Args)]
struct ResourceFlags {
  /// Target system identifier
  #[arg(long)]
  resource: Option<String>,

  /// Allocation identifier
  #[arg(long)]
  project: Option<String>,

  /// Scheduler queue (empty for the engine default)
  #[arg(long)]
  queue: Option<String>,

  #[arg(long)]
  access_schema: Option<String>,

  /// Wall-clock limit in minutes
  #[arg(long)]
  walltime: Option<u32>,

  #[arg(long)]
  cpus: Option<u32>,

  #[arg(long)]
  gpus: Option<u32>,
}

impl From<ResourceFlags> for ResourceOverrides {
  fn from(flags: ResourceFlags) -> Self {
    Self {
      resource: flags.resource,
      project: flags.project,
      queue: flags.queue,
      access_schema: flags.access_schema,
      walltime: flags.walltime,
      cpus: flags.cpus,
      gpus: flags.gpus,
    }
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Submit(args)) => {
      submit(args)?;
    }
    Some(Commands::Describe { input_dir }) => {
      describe(&input_dir)?;
    }
    Some(Commands::CheckCreds { creds }) => {
      check_creds(&creds)?;
    }
    None => {
      println!("exaflow - use --help to see available commands");
    }
  }

  Ok(())
}

fn submit(args: SubmitArgs) -> Result<()> {
  // Everything fallible on our side happens before the engine is touched.
  let creds = Credentials::load(&args.creds).context("failed to load credentials")?;
  let ctx = EngineContext::from_credentials(creds);

  let resource_desc = load_resource(args.resource_file.as_deref(), args.resource_flags.into())?;

  let workflow = ExaconstitWorkflow::new(args.input_dir);
  let pipeline = validate_pipeline(&workflow.get(), workflow.input_dir())
    .context("built pipeline failed validation")?;

  let shared_data = if args.shared_data.is_empty() {
    vec![SharedDataDirective::default()]
  } else {
    args.shared_data
  };

  let mut submission = Submission::new(resource_desc).with_pipeline(pipeline);
  for directive in shared_data {
    submission = submission.with_shared_data(directive);
  }

  let rt = tokio::runtime::Runtime::new()?;
  let report = match (args.launcher, args.manifest) {
    (Some(program), _) => {
      let mut engine = CommandEngine::new(program).with_args(args.launcher_args);
      if let Some(dir) = args.launcher_dir {
        engine = engine.with_current_dir(dir);
      }
      rt.block_on(run_submission(engine, &ctx, submission))?
    }
    (None, Some(path)) => rt.block_on(run_submission(ManifestEngine::new(path), &ctx, submission))?,
    (None, None) => anyhow::bail!("either --launcher or --manifest is required"),
  };

  eprintln!("Submission completed: {}", report.submission_id);
  Ok(())
}

async fn run_submission<E: ExecutionEngine>(
  engine: E,
  ctx: &EngineContext,
  submission: Submission,
) -> Result<RunReport> {
  let submitter = Submitter::with_notifier(engine, TracingNotifier);
  submitter
    .submit(ctx, submission)
    .await
    .context("workflow submission failed")
}

fn load_resource(path: Option<&Path>, flags: ResourceOverrides) -> Result<ResourceDescription> {
  let mut desc = ResourceDescription::default();

  if let Some(path) = path {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("failed to read resource file: {}", path.display()))?;
    let from_file: ResourceOverrides = serde_json::from_str(&content)
      .with_context(|| format!("failed to parse resource file: {}", path.display()))?;
    desc = desc.merge(from_file);
  }

  let desc = desc.merge(flags);
  info!(
    resource = %desc.resource,
    project = %desc.project,
    queue = ?desc.queue,
    walltime = desc.walltime,
    cpus = desc.cpus,
    gpus = desc.gpus,
    "resource description"
  );

  Ok(desc)
}

fn describe(input_dir: &str) -> Result<()> {
  let pipeline = ExaconstitWorkflow::new(input_dir).get();
  println!("{}", serde_json::to_string_pretty(&pipeline)?);
  Ok(())
}

fn check_creds(path: &Path) -> Result<()> {
  let creds = Credentials::load(path)
    .with_context(|| format!("invalid credentials file: {}", path.display()))?;

  eprintln!(
    "Credentials OK: rabbitmq {}:{} as {}",
    creds.rabbitmq.hostname, creds.rabbitmq.port, creds.rabbitmq.username
  );
  Ok(())
}
