//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Aggregation itself never fails: malformed rows fall back to defaults.
//! Errors only exist where the crate touches user input or the filesystem.

use thiserror::Error;

/// Errors that can occur while compiling selection filters
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid call-chain filter: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// Errors that can occur while reading a selection
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to read selection: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid selection format: {0}")]
    InvalidFormat(String),
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Empty call tree")]
    EmptyTree,

    #[error("Failed to render flamegraph: {0}")]
    RenderFailed(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
