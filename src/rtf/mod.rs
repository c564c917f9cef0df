//! RTF (Rich Text Format) plain-text extraction.
//!
//! This module turns RTF into the text a reader would see, without building a
//! document model. It handles the parts of RTF that decide *which* characters
//! are text and *how* they are encoded; all formatting is dropped.
//!
//! # Architecture
//!
//! The pipeline is organized into several components:
//! - **Font table**: a textual pre-scan of `\fonttbl` that resolves the
//!   encoding of each font from its `\fcharset`
//! - **Lexer**: tokenizes RTF input into control words, symbols, byte escapes
//!   and text
//! - **Stripper**: a group-scoped state machine that drops ignorable
//!   destinations, honors `\uN`/`\ucN` fallbacks and decodes `\'xx` escapes
//!   under the active font's codepage
//!
//! # Example
//!
//! ```rust
//! use rtfstrip::rtf::strip;
//!
//! let rtf_text = r"{\rtf1\ansi{\fonttbl{\f0\fcharset238 Arial;}}\f0 Dobr\'fd den\par}";
//! assert_eq!(strip(rtf_text).as_deref(), Some("Dobrý den\r\n"));
//! ```

mod charset;
mod error;
mod font_table;
mod lexer;
mod options;
mod stripper;
mod tables;

// Re-exports
pub use charset::{DEFAULT_CODEPAGE, charset_to_codepage};
pub use error::{RtfError, RtfResult};
pub use font_table::{FontTable, document_codepage};
pub use lexer::{Lexer, Token};
pub use options::StripOptions;
pub use stripper::{Stripper, strip, strip_with_options};
pub use tables::{DESTINATIONS, SPECIAL_CHARACTERS, is_destination, special_character};
