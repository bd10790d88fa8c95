//! Error type shared by the controller and its browser bindings

use thiserror::Error;

/// Why an in-place load or a setup step failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// Server answered with a non-2xx status
    #[error("HTTP {status}")]
    Http {
        /// Response status code
        status: u16,
    },

    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    /// A required element is missing or a DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result alias used across the controller
pub type NavResult<T> = Result<T, NavError>;
