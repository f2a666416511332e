// File: src/error.rs
use thiserror::Error;

/// Errors raised around the fill engine: loading, saving and configuring.
/// The engine itself never fails; a fill that places few words is a normal outcome.
#[derive(Debug, Error)]
pub enum XwordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corpus encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("config file error: {0}")]
    ConfigFile(#[from] serde_json::Error),

    #[error("invalid word pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid word distribution: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, XwordError>;
