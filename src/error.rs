//! Error types for the recap library.

use std::io;
use thiserror::Error;

/// Result type alias for recap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering a summary.
///
/// Normalization never fails; these variants cover rendering faults and the
/// I/O around loading configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid layout configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The text measurer could not produce a width.
    #[error("Text measurement error: {0}")]
    Measure(String),

    /// A drawing backend rejected an operation.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Error during rendering (pages, slides, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
