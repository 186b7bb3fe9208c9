use thiserror::Error;

#[derive(Debug, Error)]
pub enum FazelError {
    #[error("header must be a single line starting with '#': {0:?}")]
    InvalidHeader(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to finalize {path}: {source}")]
    Persist {
        path: String,
        source: std::io::Error,
    },
}
