// src/error.rs
//! Error taxonomy shared by the library modules.

use thiserror::Error;

/// Failure classes a remote call or a local state operation can produce.
/// Command handlers render these as one-line inline messages; nothing is
/// retried and nothing escapes to a global handler.
#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with a non-success status; carries the
    /// server-supplied message extracted from the body.
    #[error("{0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body did not match the expected response schema.
    #[error("unexpected response from server: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    /// A protected command was run without a stored session.
    #[error("not signed in")]
    NoSession,

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
