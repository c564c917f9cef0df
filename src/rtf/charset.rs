//! `\fcharset` identifiers and the Windows codepages they select.
//!
//! The font table declares a charset per font; byte escapes written while that
//! font is active are encoded in the matching codepage. Codepage `0` stands for
//! "the default encoding" and is what unmapped charsets resolve to.

use phf::phf_map;

/// Codepage value meaning "use the default encoding".
pub const DEFAULT_CODEPAGE: u32 = 0;

/// Compile-time lookup table from RTF charset id to Windows codepage.
static CHARSET_CODEPAGES: phf::Map<u32, u32> = phf_map! {
    0u32 => 1252,   // ANSI
    1u32 => 0,      // Default
    2u32 => 0,      // Symbol (codepage 42 has no text decoding)
    77u32 => 10000, // Mac Roman
    78u32 => 10001, // Mac Shift JIS
    79u32 => 10003, // Mac Hangul
    80u32 => 10008, // Mac GB2312
    81u32 => 10002, // Mac Big5
    82u32 => 0,     // Mac Johab (old)
    83u32 => 10005, // Mac Hebrew
    84u32 => 10004, // Mac Arabic
    85u32 => 10006, // Mac Greek
    86u32 => 10081, // Mac Turkish
    87u32 => 10021, // Mac Thai
    88u32 => 10029, // Mac East Europe
    89u32 => 10007, // Mac Russian
    128u32 => 932,  // Shift JIS
    129u32 => 949,  // Hangul
    130u32 => 1361, // Johab
    134u32 => 936,  // GB2312
    136u32 => 950,  // Big5
    161u32 => 1253, // Greek
    162u32 => 1254, // Turkish
    163u32 => 1258, // Vietnamese
    177u32 => 1255, // Hebrew
    178u32 => 1256, // Arabic
    179u32 => 0,    // Arabic Traditional (old)
    180u32 => 0,    // Arabic user (old)
    181u32 => 0,    // Hebrew user (old)
    186u32 => 1257, // Baltic
    204u32 => 1251, // Russian
    222u32 => 874,  // Thai
    238u32 => 1250, // Eastern European
    254u32 => 437,  // PC 437
    255u32 => 850,  // OEM
};

/// Return the codepage for an RTF charset id.
///
/// Unknown charsets map to [`DEFAULT_CODEPAGE`].
///
/// # Examples
///
/// ```rust
/// use rtfstrip::rtf::charset_to_codepage;
///
/// assert_eq!(charset_to_codepage(238), 1250);
/// assert_eq!(charset_to_codepage(1), 0);
/// assert_eq!(charset_to_codepage(42), 0);
/// ```
#[inline]
pub fn charset_to_codepage(charset: u32) -> u32 {
    CHARSET_CODEPAGES
        .get(&charset)
        .copied()
        .unwrap_or(DEFAULT_CODEPAGE)
}
