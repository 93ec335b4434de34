use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the credentials file. All of them are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum CredentialsError {
  #[error("failed to read credentials file {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse credentials file {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to parse credentials: {0}")]
  Malformed(#[source] serde_json::Error),

  #[error("invalid credentials: {field} {reason}")]
  Invalid { field: &'static str, reason: String },
}

impl CredentialsError {
  pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Invalid {
      field,
      reason: reason.into(),
    }
  }
}
