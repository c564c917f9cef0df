//! Font table pre-scan.
//!
//! Byte escapes (`\'xx`) are encoded in the codepage of the active font, so the
//! charset of every font must be known before the body is decoded. The font
//! table is located textually, split into one fragment per font and each
//! fragment's `\fcharset` is resolved to an encoding.
//!
//! The scan is a heuristic, not a group-balanced parse:
//!
//! - the table ends at the first `}}` after `fonttbl`, so a font entry with
//!   nested groups (`{\*\panose ...}`) can end it early;
//! - entries are separated by the literal `}{`.
//!
//! Fonts are indexed in declaration order. A document declaring `\f0`, `\f2`,
//! `\f5` is served by indices 0, 1, 2; `\f5` in the body then falls outside the
//! table and leaves the current encoding unchanged.

use super::charset::{DEFAULT_CODEPAGE, charset_to_codepage};
use super::error::{RtfError, RtfResult};
use crate::common::encoding::codepage_to_encoding;
use encoding_rs::Encoding;
use memchr::memmem;

const FONT_TABLE_MARKER: &[u8] = b"fonttbl";
const FONT_TABLE_END: &[u8] = b"}}";
const ENTRY_SEPARATOR: &str = "}{";
const CHARSET_MARKER: &[u8] = b"fcharset";
const ANSI_CODEPAGE_MARKER: &[u8] = b"\\ansicpg";

/// Per-font text encodings, indexed by declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontTable {
    encodings: Vec<&'static Encoding>,
}

impl FontTable {
    /// Create an empty font table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the font table of `input`, never failing.
    ///
    /// A document without a font table, or whose font table cannot be
    /// delimited, yields an empty table: every byte escape is then decoded
    /// under `default_encoding`.
    pub fn resolve(input: &str, default_encoding: &'static Encoding) -> Self {
        match Self::parse(input, default_encoding) {
            Ok(table) => table,
            Err(err) => {
                log::debug!("Ignoring font table: {err}");
                Self::new()
            },
        }
    }

    /// Build the font table of `input`.
    ///
    /// Fails only when `fonttbl` is present but not followed by `}}`. Entries
    /// whose charset is missing, unreadable or mapped to an unsupported
    /// codepage use `default_encoding`.
    pub fn parse(input: &str, default_encoding: &'static Encoding) -> RtfResult<Self> {
        let Some(marker) = memmem::find(input.as_bytes(), FONT_TABLE_MARKER) else {
            return Ok(Self::new());
        };

        // Skip the marker and the delimiter right after it
        let after_marker = marker + FONT_TABLE_MARKER.len();
        let start = after_marker
            + input[after_marker..]
                .chars()
                .next()
                .map_or(0, char::len_utf8);

        let len = memmem::find(&input.as_bytes()[start..], FONT_TABLE_END)
            .ok_or(RtfError::MissingFontTableEnd(marker))?;
        let table = &input[start..start + len];

        let encodings = table
            .split(ENTRY_SEPARATOR)
            .filter(|entry| !entry.is_empty())
            .map(|entry| entry_encoding(entry, default_encoding))
            .collect();

        Ok(Self { encodings })
    }

    /// Encoding of the font declared at position `index`.
    ///
    /// Negative and out-of-range indices return `None`.
    #[inline]
    pub fn get(&self, index: i32) -> Option<&'static Encoding> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.encodings.get(i))
            .copied()
    }

    /// Number of fonts in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    /// Whether the table has no fonts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    /// Iterate over the font encodings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Encoding> + '_ {
        self.encodings.iter().copied()
    }
}

/// Resolve the encoding of one font table entry.
fn entry_encoding(entry: &str, default_encoding: &'static Encoding) -> &'static Encoding {
    let charset = match parse_charset(entry) {
        Ok(Some(charset)) => charset,
        Ok(None) => return default_encoding,
        Err(err) => {
            log::debug!("{err} in font entry {entry:?}");
            return default_encoding;
        },
    };

    let codepage = charset_to_codepage(charset);
    if codepage == DEFAULT_CODEPAGE {
        return default_encoding;
    }

    codepage_to_encoding(codepage).unwrap_or_else(|| {
        log::debug!(
            "Charset {charset} uses unsupported codepage {codepage}, decoding as {}",
            default_encoding.name()
        );
        default_encoding
    })
}

/// Read the number after `fcharset` in a font entry.
///
/// Returns `Ok(None)` when the entry declares no charset.
fn parse_charset(entry: &str) -> RtfResult<Option<u32>> {
    let Some(pos) = memmem::find(entry.as_bytes(), CHARSET_MARKER) else {
        return Ok(None);
    };
    let digits = leading_digits(&entry[pos + CHARSET_MARKER.len()..]);
    if digits.is_empty() {
        return Err(RtfError::InvalidCharset(format!(
            "no number after fcharset in {entry:?}"
        )));
    }
    Ok(Some(digits.parse()?))
}

/// Encoding declared by `\ansicpgN`, if any and supported.
///
/// Documents written on a machine with a non-Western ANSI codepage declare it
/// here; it stands in for the default encoding of such documents. Only the
/// header ahead of the font table is searched, and an escaped `\\ansicpg`
/// is literal text.
pub fn document_codepage(input: &str) -> Option<&'static Encoding> {
    let bytes = input.as_bytes();
    let header = memmem::find(bytes, FONT_TABLE_MARKER).map_or(bytes, |end| &bytes[..end]);
    let pos = memmem::find_iter(header, ANSI_CODEPAGE_MARKER).find(|&pos| {
        let backslashes = header[..pos].iter().rev().take_while(|&&b| b == b'\\').count();
        backslashes % 2 == 0
    })?;
    let digits = leading_digits(&input[pos + ANSI_CODEPAGE_MARKER.len()..]);
    let codepage: u32 = digits.parse().ok()?;
    codepage_to_encoding(codepage)
}

#[inline]
fn leading_digits(s: &str) -> &str {
    let end = s
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(s.len());
    &s[..end]
}
