//! Runtime error types.
//!
//! Failures reaching or decoding a model worker. Callers receive them
//! unchanged; nothing here retries.

use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Connection to {url} failed: {message}")]
    Connection { url: String, message: String },

    #[error("Worker returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid worker response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl RuntimeError {
    /// Classify a `reqwest` send failure for `url`.
    pub(crate) fn from_send(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RuntimeError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            RuntimeError::Connection {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            RuntimeError::Transport(err)
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            RuntimeError::Timeout { .. } => true,
            RuntimeError::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Errors decoding a client-supplied image payload.
#[derive(Debug, Error)]
pub enum ImageInputError {
    #[error("Image payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Malformed data URL: {0}")]
    DataUrl(String),

    #[error("Unsupported or undecodable image: {0}")]
    Decode(#[from] image::ImageError),
}
