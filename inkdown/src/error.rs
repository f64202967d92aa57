use std::io;

use thiserror::Error;

/// Top-level error type for the inkdown crate.
#[derive(Debug, Error)]
pub enum InkdownError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Template error: {0}")]
  Template(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Export error: {0}")]
  Export(String),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}

impl From<tera::Error> for InkdownError {
  fn from(e: tera::Error) -> Self {
    Self::Template(e.to_string())
  }
}

impl From<toml::ser::Error> for InkdownError {
  fn from(e: toml::ser::Error) -> Self {
    Self::Config(e.to_string())
  }
}

impl From<tempfile::PersistError> for InkdownError {
  fn from(e: tempfile::PersistError) -> Self {
    Self::Io(io::Error::other(e.to_string()))
  }
}
