//! Error types for barstream core library.

use thiserror::Error;

/// Result type alias using barstream Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for barstream operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Alignment text or discriminant outside the known set
    #[error("unknown alignment: {0}")]
    UnknownAlignment(String),

    /// Markup text or discriminant outside the known set
    #[error("unknown markup: {0}")]
    UnknownMarkup(String),

    /// Writing the protocol header failed
    #[error("failed to send header: {0}")]
    SendHeader(#[source] std::io::Error),

    /// Writing the opening bracket failed
    #[error("failed to start infinite array: {0}")]
    StartArray(#[source] std::io::Error),

    /// Encoding or writing a status line failed
    #[error("failed to encode status line: {0}")]
    SendLine(#[source] std::io::Error),

    /// Writing the closing bracket failed
    #[error("failed to close infinite array: {0}")]
    CloseArray(#[source] std::io::Error),

    /// The infinite array was already closed
    #[error("stream already closed")]
    Closed,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
