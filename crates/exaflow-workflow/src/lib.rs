//! Exaflow Workflow
//!
//! This crate builds the ExaConstit pipeline description and validates
//! pipelines before they are handed to the execution engine.
//!
//! - [`ExaconstitWorkflow`] assembles the four fixed stages (setup, preprocess,
//!   main, postprocess) from a single `input_dir` root. It is pure string
//!   assembly: no filesystem access, no failure modes.
//! - [`validate_pipeline`] checks the structural contract of any pipeline and
//!   produces a [`ValidatedPipeline`], which is the only form the engine
//!   accepts.

mod builder;
mod error;
mod validate;

pub use builder::{DEFAULT_INPUT_DIR, ExaconstitWorkflow, PIPELINE_NAME};
pub use error::WorkflowError;
pub use validate::{ValidatedPipeline, validate_pipeline};
