//! Error handling and custom error types
//!
//! Provides unified error handling across the library using thiserror, plus a
//! coarse [`ErrorKind`] tag that public results expose for structured dispatch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Library is not initialized; call initialize() before issuing requests")]
    Uninitialized,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Inference API error: {0}")]
    AiProvider(String),

    #[error("Media upload error: {0}")]
    Upload(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Category of a failure, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Uninitialized,
    Transport,
    Remote,
    Upload,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Uninitialized => ErrorKind::Uninitialized,
            Error::Http(_) => ErrorKind::Transport,
            Error::Serialization(_) | Error::AiProvider(_) => ErrorKind::Remote,
            Error::Upload(_) => ErrorKind::Upload,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
