//! Errors reported by the projectors and their boundary code.
//!
//! Only problems with shapes and configuration are errors. Rays which miss
//! the image, or sample it outside an interpolation kernel's support, are
//! ordinary geometry and simply contribute nothing.

use std::io;
use thiserror::Error;

/// Result type for projection operations
pub type Result<T> = std::result::Result<T, RadonError>;

#[derive(Error, Debug)]
pub enum RadonError {
    /// Grid dimensions inconsistent with each other or with the data supplied
    #[error("Invalid shape of {what}: expected {expected}, got {actual}")]
    InvalidShape { what: &'static str, expected: String, actual: String },

    /// Interpolation kernel selector outside the known set
    #[error("Unsupported interpolation kernel: {0}")]
    UnsupportedKernel(String),

    /// Configuration value which cannot be used
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Could not build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RadonError {
    pub(crate) fn shape(what: &'static str, expected: impl ToString, actual: impl ToString) -> Self {
        Self::InvalidShape { what, expected: expected.to_string(), actual: actual.to_string() }
    }
}
