use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Failed to read {path}: {source}")]
  Io { path: String, source: std::io::Error },
  #[error("Invalid dataset descriptor: {0}")]
  Descriptor(#[from] serde_json::Error),
  #[error("No adapter for this file type: '{0}'")]
  UnsupportedFormat(String),
  #[error("Dataset '{0}' has no header and no metadata to reconstruct one from")]
  MissingHeader(String),
  #[error("Dataset '{0}' is empty")]
  EmptyDataset(String),
}

impl Error {
  pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
    Error::Io { path: path.into(), source }
  }
}
