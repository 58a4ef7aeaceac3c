use std::{io, path::PathBuf};

use thiserror::Error;

/// Error type for cdoc-config operations
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Unsupported config file format: {}", .0.display())]
  UnsupportedFormat(PathBuf),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("TOML parse error: {0}")]
  TomlParse(#[from] toml::de::Error),

  #[error("TOML serialization error: {0}")]
  TomlSerialize(#[from] toml::ser::Error),
}
