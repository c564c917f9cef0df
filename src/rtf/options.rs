//! Configuration for RTF stripping.

use encoding_rs::Encoding;

/// Configuration options for text extraction.
///
/// # Examples
///
/// ```rust
/// use rtfstrip::StripOptions;
///
/// // Create with defaults
/// let options = StripOptions::default();
///
/// // Or customize
/// let options = StripOptions::new()
///     .with_default_encoding(encoding_rs::WINDOWS_1251)
///     .with_document_codepage(false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripOptions {
    /// Encoding for byte escapes outside any font with a known charset, and for
    /// fonts whose charset selects the default codepage
    pub default_encoding: &'static Encoding,
    /// Whether a `\ansicpgN` declaration replaces `default_encoding`
    pub use_document_codepage: bool,
    /// Whether the payload following `\binN` is skipped
    pub skip_binary: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            default_encoding: encoding_rs::WINDOWS_1252,
            use_document_codepage: true,
            skip_binary: true,
        }
    }
}

impl StripOptions {
    /// Create a new `StripOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback encoding for byte escapes.
    ///
    /// Defaults to Windows-1252, the ANSI codepage RTF assumes when nothing
    /// else is declared.
    #[inline]
    pub fn with_default_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.default_encoding = encoding;
        self
    }

    /// Set whether the document's `\ansicpgN` overrides the default encoding.
    ///
    /// Unsupported codepages are ignored.
    #[inline]
    pub fn with_document_codepage(mut self, enabled: bool) -> Self {
        self.use_document_codepage = enabled;
        self
    }

    /// Set whether `\binN` payloads are skipped.
    ///
    /// Disable only for producers that write `\bin` without a binary payload.
    #[inline]
    pub fn with_binary_skipping(mut self, enabled: bool) -> Self {
        self.skip_binary = enabled;
        self
    }

    /// Encoding to use as the default for `input`.
    pub(crate) fn effective_encoding(&self, input: &str) -> &'static Encoding {
        if self.use_document_codepage {
            super::font_table::document_codepage(input).unwrap_or(self.default_encoding)
        } else {
            self.default_encoding
        }
    }
}
