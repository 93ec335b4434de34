//! Connection settings for the engine's coordination transport.
//!
//! The engine reads its database URL from `RADICAL_PILOT_DBURL` during its
//! own initialization. That value is carried here and only ever placed in the
//! environment of the launched engine process; the driver's environment is
//! left untouched.

use std::fmt;

use exaflow_credentials::{Credentials, RabbitMqConfig};

pub const DB_URL_ENV: &str = "RADICAL_PILOT_DBURL";
pub const RMQ_HOSTNAME_ENV: &str = "RMQ_HOSTNAME";
pub const RMQ_PORT_ENV: &str = "RMQ_PORT";
pub const RMQ_USERNAME_ENV: &str = "RMQ_USERNAME";
pub const RMQ_PASSWORD_ENV: &str = "RMQ_PASSWORD";
pub const SUBMISSION_ID_ENV: &str = "EXAFLOW_SUBMISSION_ID";

/// Everything the engine needs to connect to its message queue and database.
#[derive(Clone)]
pub struct EngineContext {
  pub rabbitmq: RabbitMqConfig,
  pub db_url: String,
}

impl EngineContext {
  pub fn from_credentials(creds: Credentials) -> Self {
    Self {
      rabbitmq: creds.rabbitmq,
      db_url: creds.mongodb.url,
    }
  }

  /// Environment variables handed to the engine process.
  pub fn engine_env(&self) -> Vec<(&'static str, String)> {
    vec![
      (DB_URL_ENV, self.db_url.clone()),
      (RMQ_HOSTNAME_ENV, self.rabbitmq.hostname.clone()),
      (RMQ_PORT_ENV, self.rabbitmq.port.to_string()),
      (RMQ_USERNAME_ENV, self.rabbitmq.username.clone()),
      (RMQ_PASSWORD_ENV, self.rabbitmq.password.clone()),
    ]
  }
}

impl fmt::Debug for EngineContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EngineContext")
      .field("rabbitmq", &self.rabbitmq)
      .field("db_url", &"<redacted>")
      .finish()
  }
}
