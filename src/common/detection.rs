//! RTF (Rich Text Format) detection.
//!
//! RTF files have a simple text-based signature that makes them easy to detect.
//! The signature is `{\rtf` (usually `{\rtf1`) at the start of the file.
//!
//! Detection is advisory: the stripper itself accepts any text and never
//! rejects input for lacking the signature.

use std::io::{Read, Seek, SeekFrom};

/// RTF files start with `{\rtf` followed optionally by version number.
const RTF_SIGNATURE: &[u8] = b"{\\rtf";
const RTF_SIGNATURE_LEN: usize = RTF_SIGNATURE.len();

/// Check whether `bytes` start with the RTF signature.
///
/// A UTF-8 byte order mark in front of the signature is tolerated, since RTF
/// saved by some text editors carries one.
///
/// # Examples
///
/// ```rust
/// use rtfstrip::is_rtf;
///
/// assert!(is_rtf(b"{\\rtf1\\ansi\\deff0 Hello World}"));
/// assert!(!is_rtf(b"Plain text file"));
/// ```
#[inline]
pub fn is_rtf(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    bytes.starts_with(RTF_SIGNATURE)
}

/// Detect RTF from a reader.
///
/// Reads the first few bytes to check for the signature, then rewinds the
/// reader to the start. Read errors count as "not RTF".
pub fn detect_rtf_from_reader<R: Read + Seek>(reader: &mut R) -> bool {
    let mut buffer = [0u8; RTF_SIGNATURE_LEN + 3];
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(_) => return false,
        }
    }

    let _ = reader.seek(SeekFrom::Start(0));

    is_rtf(&buffer[..filled])
}
