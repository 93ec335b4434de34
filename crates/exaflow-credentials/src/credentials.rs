use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::CredentialsError;

/// File name looked up in the working directory when no path is given.
pub const CREDS_FILE_NAME: &str = "creds.json";

const REDACTED: &str = "<redacted>";

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
  pub rabbitmq: RabbitMqConfig,
  pub mongodb: MongoDbConfig,
}

/// Message-queue connection parameters.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RabbitMqConfig {
  pub hostname: String,
  #[serde(deserialize_with = "port_from_number_or_string")]
  pub port: u16,
  pub username: String,
  pub password: String,
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct MongoDbConfig {
  /// `mongodb://<user>:<pass>@<host>:<port>/<db>`
  pub url: String,
}

impl Credentials {
  /// Load and validate credentials from a JSON file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, CredentialsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| CredentialsError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let creds = Self::from_json(&content).map_err(|err| match err {
      CredentialsError::Malformed(source) => CredentialsError::Parse {
        path: path.to_path_buf(),
        source,
      },
      other => other,
    })?;

    debug!(
      path = %path.display(),
      rabbitmq_host = %creds.rabbitmq.hostname,
      rabbitmq_port = creds.rabbitmq.port,
      "loaded credentials"
    );

    Ok(creds)
  }

  /// Parse and validate credentials from a JSON string.
  pub fn from_json(content: &str) -> Result<Self, CredentialsError> {
    let creds: Credentials = serde_json::from_str(content).map_err(CredentialsError::Malformed)?;
    creds.validate()?;
    Ok(creds)
  }

  fn validate(&self) -> Result<(), CredentialsError> {
    if self.rabbitmq.hostname.trim().is_empty() {
      return Err(CredentialsError::invalid("rabbitmq.hostname", "is empty"));
    }
    if self.rabbitmq.port == 0 {
      return Err(CredentialsError::invalid("rabbitmq.port", "must be non-zero"));
    }

    let url = self.mongodb.url.trim();
    if url.is_empty() {
      return Err(CredentialsError::invalid("mongodb.url", "is empty"));
    }
    if !(url.starts_with("mongodb://") || url.starts_with("mongodb+srv://")) {
      return Err(CredentialsError::invalid(
        "mongodb.url",
        "must use the mongodb:// or mongodb+srv:// scheme",
      ));
    }

    Ok(())
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("rabbitmq", &self.rabbitmq)
      .field("mongodb", &self.mongodb)
      .finish()
  }
}

impl fmt::Debug for RabbitMqConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RabbitMqConfig")
      .field("hostname", &self.hostname)
      .field("port", &self.port)
      .field("username", &self.username)
      .field("password", &REDACTED)
      .finish()
  }
}

impl fmt::Debug for MongoDbConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MongoDbConfig")
      .field("url", &REDACTED)
      .finish()
  }
}

fn port_from_number_or_string<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Port {
    Number(u16),
    Text(String),
  }

  match Port::deserialize(deserializer)? {
    Port::Number(port) => Ok(port),
    Port::Text(text) => text
      .trim()
      .parse()
      .map_err(|_| serde::de::Error::custom(format!("invalid port '{text}'"))),
  }
}
