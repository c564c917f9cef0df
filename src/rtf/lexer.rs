//! RTF lexer/tokenizer.
//!
//! The lexer splits RTF text into tokens using a fixed priority:
//!
//! 1. control word: `\` + 1 to 32 ASCII letters, an optional signed numeric
//!    parameter of up to 10 digits and an optional single space delimiter
//! 2. hex escape: `\'` + exactly two hexadecimal digits
//! 3. control symbol: `\` + any one non-letter character
//! 4. group brace: `{` or `}`
//! 5. a run of `\r`/`\n`, collapsed into one [`Token::LineBreak`]
//! 6. any other single character
//!
//! Every character of the input belongs to exactly one token, and each step
//! looks at a bounded window of input, so tokenizing is linear in the input
//! length whatever its content.

use super::error::{RtfError, RtfResult};

/// Longest control word name, in letters.
const MAX_WORD_LEN: usize = 32;

/// Longest numeric parameter, in digits (sign excluded).
const MAX_PARAM_DIGITS: usize = 10;

/// Token types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Control word such as `\par` or `\fs24`
    ControlWord {
        /// Letters of the control word, as written
        name: &'a str,
        /// Numeric parameter; `None` when absent or out of `i32` range
        param: Option<i32>,
    },
    /// `\'xx` byte escape
    HexEscape(u8),
    /// Backslash followed by a single non-letter, e.g. `\~` or `\*`
    ControlSymbol(char),
    /// Opening brace
    GroupOpen,
    /// Closing brace
    GroupClose,
    /// One or more raw line-break characters (not significant in RTF)
    LineBreak,
    /// Payload of a `\binN` control word that was skipped, in characters
    Binary(usize),
    /// Literal character
    Char(char),
}

/// RTF Lexer.
///
/// Produces tokens lazily through [`Iterator`]; the sequence is finite and
/// cannot be restarted.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// Source input
    input: &'a str,
    /// Current position in bytes
    pos: usize,
    /// Whether `\binN` payloads are skipped
    skip_binary: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer. `\binN` payloads are skipped by default.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            skip_binary: true,
        }
    }

    /// Set whether the payload following `\binN` is skipped.
    ///
    /// When disabled, `\bin` is an ordinary control word and its payload is
    /// tokenized like any other text.
    #[inline]
    pub fn with_binary_skipping(mut self, skip: bool) -> Self {
        self.skip_binary = skip;
        self
    }

    /// Byte offset of the next unread character.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the next token, or `None` at end of input.
    fn next_token(&mut self) -> Option<Token<'a>> {
        let bytes = self.input.as_bytes();
        let &first = bytes.get(self.pos)?;

        let token = match first {
            b'\\' => self.lex_backslash(),
            b'{' => {
                self.pos += 1;
                Token::GroupOpen
            },
            b'}' => {
                self.pos += 1;
                Token::GroupClose
            },
            b'\r' | b'\n' => {
                while matches!(bytes.get(self.pos), Some(b'\r' | b'\n')) {
                    self.pos += 1;
                }
                Token::LineBreak
            },
            _ => Token::Char(self.take_char()),
        };

        Some(token)
    }

    /// Lex a token starting at a backslash.
    fn lex_backslash(&mut self) -> Token<'a> {
        let bytes = self.input.as_bytes();
        match bytes.get(self.pos + 1) {
            Some(b) if b.is_ascii_alphabetic() => self.lex_control_word(),
            Some(b'\'') => match self.lex_hex_escape() {
                Some(byte) => Token::HexEscape(byte),
                // `\'` without two hex digits is the control symbol `'`
                None => {
                    self.pos += 1;
                    Token::ControlSymbol(self.take_char())
                },
            },
            Some(_) => {
                self.pos += 1;
                Token::ControlSymbol(self.take_char())
            },
            // Trailing backslash is plain text
            None => Token::Char(self.take_char()),
        }
    }

    /// Lex `\word[-]digits[ ]`. The position points at the backslash and the
    /// next byte is known to be a letter.
    fn lex_control_word(&mut self) -> Token<'a> {
        let bytes = self.input.as_bytes();
        let start = self.pos + 1;
        let mut end = start;
        while end < bytes.len() && end - start < MAX_WORD_LEN && bytes[end].is_ascii_alphabetic() {
            end += 1;
        }
        let name = &self.input[start..end];
        self.pos = end;

        let param = self.lex_parameter();

        if bytes.get(self.pos) == Some(&b' ') {
            self.pos += 1;
        }

        if name == "bin"
            && self.skip_binary
            && let Some(len) = param.and_then(|n| usize::try_from(n).ok()).filter(|&n| n > 0)
        {
            return Token::Binary(self.skip_chars(len));
        }

        Token::ControlWord { name, param }
    }

    /// Lex an optional numeric parameter. A lone `-` is not consumed.
    fn lex_parameter(&mut self) -> Option<i32> {
        let bytes = self.input.as_bytes();
        let negative = bytes.get(self.pos) == Some(&b'-');
        let digits_start = self.pos + usize::from(negative);

        let mut end = digits_start;
        while end < bytes.len() && end - digits_start < MAX_PARAM_DIGITS && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == digits_start {
            return None;
        }

        let literal = &self.input[self.pos..end];
        self.pos = end;

        match parse_parameter(literal) {
            Ok(value) => Some(value),
            Err(err) => {
                log::debug!("{err}; treating the parameter as absent");
                None
            },
        }
    }

    /// Lex `\'xx`. Returns `None` without moving when the two characters after
    /// the apostrophe are not both hexadecimal digits.
    fn lex_hex_escape(&mut self) -> Option<u8> {
        let bytes = self.input.as_bytes();
        let hi = hex_value(*bytes.get(self.pos + 2)?)?;
        let lo = hex_value(*bytes.get(self.pos + 3)?)?;
        self.pos += 4;
        Some((hi << 4) | lo)
    }

    /// Consume one character at the current position.
    #[inline]
    fn take_char(&mut self) -> char {
        let ch = self.input[self.pos..].chars().next().unwrap_or('\0');
        self.pos += ch.len_utf8();
        ch
    }

    /// Skip up to `count` characters, returning how many were skipped.
    fn skip_chars(&mut self, count: usize) -> usize {
        let rest = &self.input[self.pos..];
        let (skipped, byte_len) = rest
            .char_indices()
            .take(count)
            .fold((0, 0), |(n, _), (i, ch)| (n + 1, i + ch.len_utf8()));
        self.pos += byte_len;
        skipped
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Parse a control word parameter of at most ten digits with optional sign.
///
/// Ten digits always fit in `i64`; values outside `i32` are rejected instead
/// of wrapping.
fn parse_parameter(literal: &str) -> RtfResult<i32> {
    let wide: i64 = literal
        .parse()
        .map_err(|_| RtfError::ParameterOverflow(literal.to_string()))?;
    i32::try_from(wide).map_err(|_| RtfError::ParameterOverflow(literal.to_string()))
}

#[inline]
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
