//! Codepage decoding utilities for legacy RTF text.
//!
//! RTF stores non-ASCII text either as `\uN` escapes or as `\'xx` byte escapes
//! that are interpreted under the codepage of the current font. This module
//! maps Windows codepage identifiers onto `encoding_rs` encodings and decodes
//! the one- or two-byte units produced by those escapes.

use encoding_rs::Encoding;

/// Encoding used when a lead byte of a double-byte character set has no trail
/// byte to pair with.
#[inline]
pub fn single_byte_fallback() -> &'static Encoding {
    encoding_rs::WINDOWS_1252
}

/// Map Windows codepage identifier to encoding_rs Encoding.
///
/// Codepages that `encoding_rs` does not implement (DOS 437/850, Johab 1361
/// and most Macintosh script codepages) return `None`; callers fall back to
/// their default encoding. A few Macintosh codepages are approximated by the
/// Windows codepage covering the same script.
///
/// Codepage `0` is not an encoding: it means "use the default", and also
/// returns `None`.
///
/// # Examples
/// ```
/// use rtfstrip::codepage_to_encoding;
///
/// let encoding = codepage_to_encoding(1250).unwrap();
/// assert_eq!(encoding.name(), "windows-1250");
/// assert!(codepage_to_encoding(437).is_none());
/// ```
#[inline]
pub fn codepage_to_encoding(codepage: u32) -> Option<&'static Encoding> {
    match codepage {
        // Windows codepages
        874 => Some(encoding_rs::WINDOWS_874),   // Thai
        1250 => Some(encoding_rs::WINDOWS_1250), // Central European
        1251 => Some(encoding_rs::WINDOWS_1251), // Cyrillic
        1252 => Some(encoding_rs::WINDOWS_1252), // Western European (default ANSI)
        1253 => Some(encoding_rs::WINDOWS_1253), // Greek
        1254 => Some(encoding_rs::WINDOWS_1254), // Turkish
        1255 => Some(encoding_rs::WINDOWS_1255), // Hebrew
        1256 => Some(encoding_rs::WINDOWS_1256), // Arabic
        1257 => Some(encoding_rs::WINDOWS_1257), // Baltic
        1258 => Some(encoding_rs::WINDOWS_1258), // Vietnamese
        866 => Some(encoding_rs::IBM866),        // DOS Cyrillic

        // East Asian double-byte codepages
        932 => Some(encoding_rs::SHIFT_JIS), // Japanese Shift-JIS
        936 => Some(encoding_rs::GBK),       // Simplified Chinese (GB2312/GBK)
        949 => Some(encoding_rs::EUC_KR),    // Korean (Unified Hangul Code)
        950 => Some(encoding_rs::BIG5),      // Traditional Chinese (Big5)
        54936 => Some(encoding_rs::GB18030), // Chinese GB18030

        // Macintosh
        10000 => Some(encoding_rs::MACINTOSH),     // Mac Roman
        10001 => Some(encoding_rs::SHIFT_JIS),     // Mac Japanese (approximation)
        10002 => Some(encoding_rs::BIG5),          // Mac Traditional Chinese (approximation)
        10003 => Some(encoding_rs::EUC_KR),        // Mac Korean (approximation)
        10005 => Some(encoding_rs::WINDOWS_1255),  // Mac Hebrew (approximation)
        10007 => Some(encoding_rs::X_MAC_CYRILLIC), // Mac Cyrillic
        10008 => Some(encoding_rs::GBK),           // Mac Simplified Chinese (approximation)

        // Unicode
        65001 => Some(encoding_rs::UTF_8),

        _ => None,
    }
}

/// Decode a single byte under `encoding`.
///
/// Bytes that are not valid on their own (a bare lead byte of a double-byte
/// encoding, an unassigned slot) decode to U+FFFD.
#[inline]
pub fn decode_byte(encoding: &'static Encoding, byte: u8) -> String {
    if byte < 0x80 && encoding.is_ascii_compatible() {
        // ASCII fast path
        return char::from(byte).to_string();
    }
    let bytes = [byte];
    let (text, _) = encoding.decode_without_bom_handling(&bytes);
    text.into_owned()
}

/// Decode a lead/trail byte pair of a double-byte character set.
#[inline]
pub fn decode_pair(encoding: &'static Encoding, lead: u8, trail: u8) -> String {
    let bytes = [lead, trail];
    let (text, _) = encoding.decode_without_bom_handling(&bytes);
    text.into_owned()
}
