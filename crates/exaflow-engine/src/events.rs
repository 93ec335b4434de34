//! Submission events and notifiers for observability.
//!
//! Events are emitted around the hand-off to the engine so callers can log,
//! record or stream them.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info};

/// Events emitted during a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionEvent {
  /// The manifest was handed to the engine.
  Submitted {
    submission_id: String,
    pipelines: usize,
    tasks: usize,
  },

  /// The engine returned successfully.
  Completed {
    submission_id: String,
    exit_code: Option<i32>,
  },

  /// The engine could not be started or returned a failure.
  Failed { submission_id: String, error: String },
}

/// Trait for receiving submission events.
pub trait SubmissionNotifier: Send + Sync {
  fn notify(&self, event: SubmissionEvent);
}

/// A no-op notifier that discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl SubmissionNotifier for NoopNotifier {
  fn notify(&self, _event: SubmissionEvent) {}
}

/// A notifier that sends events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::UnboundedSender<SubmissionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<SubmissionEvent>) -> Self {
    Self { sender }
  }
}

impl SubmissionNotifier for ChannelNotifier {
  fn notify(&self, event: SubmissionEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}

/// A notifier that writes each event as a structured log line.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl SubmissionNotifier for TracingNotifier {
  fn notify(&self, event: SubmissionEvent) {
    match event {
      SubmissionEvent::Submitted {
        submission_id,
        pipelines,
        tasks,
      } => {
        info!(%submission_id, pipelines, tasks, "workflow submitted");
      }
      SubmissionEvent::Completed {
        submission_id,
        exit_code,
      } => {
        info!(%submission_id, ?exit_code, "workflow completed");
      }
      SubmissionEvent::Failed {
        submission_id,
        error,
      } => {
        error!(%submission_id, %error, "workflow failed");
      }
    }
  }
}
