//! Exaflow Engine
//!
//! This crate is the boundary between exaflow and the external execution
//! engine. Scheduling, resource acquisition, dispatch and failure handling
//! all happen on the other side of it; this side only packages a submission
//! and waits for the engine to finish.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Submitter                            │
//! │  - submit(ctx, submission) → RunReport                      │
//! │  - assigns a submission id, builds the Manifest             │
//! │  - emits SubmissionEvents to a notifier                     │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  impl ExecutionEngine                       │
//! │  - CommandEngine: launches the engine process, manifest on  │
//! │    stdin, connection settings in the child's environment    │
//! │  - ManifestEngine: writes the manifest to a file            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use exaflow_engine::{CommandEngine, EngineContext, Submission, Submitter};
//!
//! let ctx = EngineContext::from_credentials(creds);
//! let submission = Submission::new(resource_desc)
//!     .with_shared_data(SharedDataDirective::default())
//!     .with_pipeline(pipeline);
//!
//! let submitter = Submitter::new(CommandEngine::new("entk-launch"));
//! let report = submitter.submit(&ctx, submission).await?;
//! ```

mod command;
mod context;
mod engine;
mod error;
mod events;
mod manifest;
mod submission;

pub use command::CommandEngine;
pub use context::{
  DB_URL_ENV, EngineContext, RMQ_HOSTNAME_ENV, RMQ_PASSWORD_ENV, RMQ_PORT_ENV, RMQ_USERNAME_ENV,
  SUBMISSION_ID_ENV,
};
pub use engine::{ExecutionEngine, RunOutcome, RunReport, Submitter};
pub use error::EngineError;
pub use events::{
  ChannelNotifier, NoopNotifier, SubmissionEvent, SubmissionNotifier, TracingNotifier,
};
pub use manifest::ManifestEngine;
pub use submission::{Manifest, SessionInfo, Submission};
