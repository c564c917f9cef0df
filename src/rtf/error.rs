//! Error types for RTF stripping.
//!
//! None of these errors escape [`strip`](super::strip): every failure is
//! recovered close to where it happens so that extraction stays best-effort.
//! They exist so the fallible steps (font table resolution, numeric parameter
//! parsing) can be written with `?` and degraded in exactly one place.

use thiserror::Error;

/// Result type for RTF operations.
pub type RtfResult<T> = Result<T, RtfError>;

/// RTF stripping errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RtfError {
    /// `\fonttbl` was found but no `}}` terminates it
    #[error("Font table starting at byte {0} is not terminated by '}}}}'")]
    MissingFontTableEnd(usize),

    /// A `\fcharset` declaration could not be read
    #[error("Invalid font charset: {0}")]
    InvalidCharset(String),

    /// A control word parameter does not fit in 32 bits
    #[error("Control word parameter out of range: {0}")]
    ParameterOverflow(String),
}

impl From<std::num::ParseIntError> for RtfError {
    fn from(err: std::num::ParseIntError) -> Self {
        RtfError::InvalidCharset(err.to_string())
    }
}
