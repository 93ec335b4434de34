//! Exaflow Config
//!
//! This crate contains the serializable descriptor types handed to the external
//! execution engine. They mirror the engine's own data model:
//!
//! - a [`PipelineDef`] is an ordered list of [`StageDef`]s
//! - a [`StageDef`] is an ordered list of [`TaskDef`]s
//! - a [`TaskDef`] names one executable invocation
//!
//! Alongside the workflow itself, a submission carries a [`ResourceDescription`]
//! (the compute allocation) and one or more [`SharedDataDirective`]s (what to
//! copy into the shared staging area before execution starts).
//!
//! Nothing in this crate touches the filesystem. Descriptors are plain values,
//! built once and serialized into the submission manifest.

mod error;
mod pipeline;
mod resource;
mod shared_data;
mod stage;
mod task;

pub use error::ConfigError;
pub use pipeline::PipelineDef;
pub use resource::{ResourceDescription, ResourceOverrides};
pub use shared_data::{SHARED_NAMESPACE, SharedDataDirective};
pub use stage::{StageDef, StageKind};
pub use task::{CpuReqs, GpuReqs, ProcessType, TaskDef, ThreadType};
