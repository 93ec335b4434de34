use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// Placeholder the engine expands to the shared staging namespace.
pub const SHARED_NAMESPACE: &str = "$SHARED";

const SEPARATOR: &str = " > ";

/// Instructs the engine to copy a local directory into the shared staging
/// area before execution begins.
///
/// The text form is `<source> > <destination>`, e.g.
/// `example_exaconstit/ > $SHARED/input_data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedDataDirective {
  pub source: String,
  pub destination: String,
}

impl SharedDataDirective {
  pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
    Self {
      source: source.into(),
      destination: destination.into(),
    }
  }

  /// Stage `source` under the shared namespace as `name`.
  pub fn into_shared(source: impl Into<String>, name: &str) -> Self {
    Self::new(source, format!("{SHARED_NAMESPACE}/{name}"))
  }
}

impl Default for SharedDataDirective {
  fn default() -> Self {
    Self::into_shared("example_exaconstit/", "input_data")
  }
}

impl fmt::Display for SharedDataDirective {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}{}", self.source, SEPARATOR, self.destination)
  }
}

impl FromStr for SharedDataDirective {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (source, destination) = s
      .split_once('>')
      .ok_or_else(|| ConfigError::InvalidDirective(s.to_string()))?;

    let source = source.trim();
    let destination = destination.trim();

    if source.is_empty() {
      return Err(ConfigError::EmptyDirectivePart("source"));
    }
    if destination.is_empty() {
      return Err(ConfigError::EmptyDirectivePart("destination"));
    }
    if destination.contains('>') {
      return Err(ConfigError::InvalidDirective(s.to_string()));
    }

    Ok(Self::new(source, destination))
  }
}

// The engine consumes directives as strings, so that is the wire form too.
impl Serialize for SharedDataDirective {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for SharedDataDirective {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}
