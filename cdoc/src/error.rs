use std::{io, path::PathBuf};

use thiserror::Error;

/// Top-level error type for the cdoc crate.
#[derive(Debug, Error)]
pub enum CdocError {
  #[error("{} does not exist", .0.display())]
  InputNotFound(PathBuf),

  #[error("{} is not a markdown file", .0.display())]
  UnsupportedInputType(PathBuf),

  #[error("No markdown files found in {}", .0.display())]
  EmptyDirectory(PathBuf),

  #[error("{failed} of {total} file(s) failed to convert")]
  BatchFailed { failed: usize, total: usize },

  #[error("Selection aborted")]
  SelectionAborted,

  #[error("No documents matching '{0}'")]
  NoMatch(String),

  #[error("No documents in {}", .0.display())]
  NoDocuments(PathBuf),

  #[error("Invalid selection: {0}")]
  InvalidSelection(String),

  #[error("{} not found in the current directory or its parents", .0.display())]
  DocumentDirNotFound(PathBuf),

  #[error("Template error: {0}")]
  Template(String),

  #[error("Configuration error: {0}")]
  Config(#[from] cdoc_config::ConfigError),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

impl From<tera::Error> for CdocError {
  fn from(e: tera::Error) -> Self {
    Self::Template(e.to_string())
  }
}

impl From<walkdir::Error> for CdocError {
  fn from(e: walkdir::Error) -> Self {
    Self::Io(io::Error::other(e.to_string()))
  }
}

pub type Result<T, E = CdocError> = std::result::Result<T, E>;
