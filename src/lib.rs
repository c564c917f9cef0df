//! rtfstrip - Plain-text extraction from Rich Text Format documents
//!
//! This library turns RTF into searchable, displayable plain text without
//! rendering it. It is built for indexing and preview pipelines that receive
//! RTF payloads (clipboard data, mail bodies, legacy documents) and only need
//! the words.
//!
//! # Features
//!
//! - **Destination filtering**: font tables, stylesheets, headers, fields'
//!   instructions, pictures and other non-text destinations are dropped
//! - **Unicode escapes**: `\uN` with `\ucN` fallback skipping, including
//!   surrogate pairs
//! - **Legacy codepages**: `\'xx` escapes are decoded under the charset of the
//!   active font, including double-byte East Asian charsets
//! - **Best effort**: malformed input never fails; unbalanced braces, unknown
//!   control words and undecodable bytes degrade locally
//!
//! # Example - Extracting text
//!
//! ```rust
//! let rtf = r"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0\pard Hello {\b World}!\par}";
//!
//! let text = rtfstrip::strip(rtf);
//! assert_eq!(text.as_deref(), Some("Hello World!\r\n"));
//! ```
//!
//! # Example - Custom default encoding
//!
//! ```rust
//! use rtfstrip::{StripOptions, Stripper};
//!
//! // Byte escapes outside any font with a known charset use Windows-1251
//! let stripper = Stripper::with_options(
//!     StripOptions::new().with_default_encoding(encoding_rs::WINDOWS_1251),
//! );
//! assert_eq!(stripper.strip(r"{\rtf1 \'cf\'f0\'e8\'e2\'e5\'f2}").as_deref(), Some("Привет"));
//! ```
//!
//! # Example - Format detection
//!
//! ```rust
//! assert!(rtfstrip::is_rtf(b"{\\rtf1\\ansi Hello}"));
//! assert!(!rtfstrip::is_rtf(b"Hello"));
//! ```

/// Codepage decoding and format detection shared by the RTF pipeline.
pub mod common;

/// RTF tokenizer, font table resolution and the text-extracting state machine.
pub mod rtf;

// Re-export commonly used items for convenience
pub use common::{codepage_to_encoding, detect_rtf_from_reader, is_rtf};
pub use rtf::{RtfError, RtfResult, StripOptions, Stripper, strip, strip_with_options};
