use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("invalid shared data directive '{0}': expected '<source> > <destination>'")]
  InvalidDirective(String),

  #[error("shared data directive has an empty {0}")]
  EmptyDirectivePart(&'static str),
}
