//! Error types for Drishti
//!
//! Only configuration and I/O problems are errors. Probe and lookup failures
//! are folded into "not detected" / unresolved and never reach this type.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrishtiError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate protocol in catalog: {0}")]
    DuplicateProtocol(String),

    #[error("Invalid port {port} for protocol {name}")]
    InvalidPort { name: String, port: u16 },
}

/// Result type alias for Drishti operations
pub type DrishtiResult<T> = Result<T, DrishtiError>;
