//! Error types for the Colloquy library.
//!
//! All fallible library operations return [`ColloquyError`] through the
//! [`Result`] alias. Soft-failing loaders (see [`crate::intent::store`])
//! use the strict error internally and convert it to an empty result plus a
//! logged diagnostic at the boundary.
//!
//! # Examples
//!
//! ```
//! use colloquy::error::{ColloquyError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ColloquyError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Colloquy operations.
#[derive(Error, Debug)]
pub enum ColloquyError {
    /// I/O errors (reading datasets and configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset structure errors (missing keys, missing fields, empty tags)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Model errors (fitting, training, prediction)
    #[error("Model error: {0}")]
    Model(String),

    /// A precondition of an operation was violated
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for operations that may fail with ColloquyError.
pub type Result<T> = std::result::Result<T, ColloquyError>;

impl ColloquyError {
    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        ColloquyError::Dataset(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        ColloquyError::Model(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ColloquyError::InvalidArgument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        ColloquyError::Config(msg.into())
    }
}
