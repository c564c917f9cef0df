//! Format-independent helpers: codepage decoding and signature detection.

pub mod detection;
pub mod encoding;

pub use detection::{detect_rtf_from_reader, is_rtf};
pub use encoding::codepage_to_encoding;
