//! Plain-text extraction from RTF.
//!
//! The stripper walks the token stream once, tracking per-group state on a
//! stack: whether the group is an ignorable destination and how many fallback
//! characters follow each `\uN` escape. Text outside ignorable groups is
//! appended to the output as it is decoded; formatting is dropped.

use super::font_table::FontTable;
use super::lexer::{Lexer, Token};
use super::options::StripOptions;
use super::tables::{is_destination, special_character};
use crate::common::encoding::{decode_byte, decode_pair, single_byte_fallback};
use encoding_rs::Encoding;
use smallvec::SmallVec;
use std::iter::Peekable;

const NON_BREAKING_SPACE: char = '\u{00A0}';

/// Group state saved by `{` and restored by the matching `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScopeFrame {
    unicode_skip: u32,
    ignorable: bool,
}

/// Decoding state of the current group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DecodeState {
    /// Whether text in the current group is dropped
    ignorable: bool,
    /// Fallback characters following each `\uN` (`\ucN`)
    unicode_skip: u32,
    /// Fallback characters still to drop after the last `\uN`
    pending_skip: u32,
    /// Encoding of `\'xx` escapes, selected by `\fN`
    encoding: &'static Encoding,
}

/// Single-pass decoder over one document's token stream.
struct Decoder<'t> {
    fonts: &'t FontTable,
    state: DecodeState,
    stack: SmallVec<[ScopeFrame; 32]>,
    /// High half of a surrogate pair waiting for its low half
    high_surrogate: Option<u32>,
    output: String,
}

impl<'t> Decoder<'t> {
    fn new(fonts: &'t FontTable, default_encoding: &'static Encoding, capacity: usize) -> Self {
        Self {
            fonts,
            state: DecodeState {
                ignorable: false,
                unicode_skip: 1,
                pending_skip: 0,
                encoding: default_encoding,
            },
            stack: SmallVec::new(),
            high_surrogate: None,
            output: String::with_capacity(capacity),
        }
    }

    /// Apply one token. `tokens` is the rest of the stream, used to pair the
    /// lead byte of a double-byte character with its trail byte.
    fn process<'a, I>(&mut self, token: Token<'a>, tokens: &mut Peekable<I>)
    where
        I: Iterator<Item = Token<'a>>,
    {
        match token {
            Token::GroupOpen => {
                self.state.pending_skip = 0;
                self.stack.push(ScopeFrame {
                    unicode_skip: self.state.unicode_skip,
                    ignorable: self.state.ignorable,
                });
            },
            Token::GroupClose => {
                self.state.pending_skip = 0;
                match self.stack.pop() {
                    Some(frame) => {
                        self.state.unicode_skip = frame.unicode_skip;
                        self.state.ignorable = frame.ignorable;
                    },
                    None => log::debug!("Ignoring unbalanced '}}'"),
                }
            },
            Token::ControlWord { name, param } => {
                self.state.pending_skip = 0;
                self.control_word(name, param);
            },
            Token::ControlSymbol(symbol) => {
                self.state.pending_skip = 0;
                self.control_symbol(symbol);
            },
            Token::HexEscape(byte) => self.hex_escape(byte, tokens),
            Token::Char(ch) => {
                if self.state.pending_skip > 0 {
                    self.state.pending_skip -= 1;
                } else if !self.state.ignorable {
                    self.emit_char(ch);
                }
            },
            Token::Binary(len) => {
                self.state.pending_skip = 0;
                log::trace!("Skipped {len} characters of binary data");
            },
            Token::LineBreak => {},
        }
    }

    fn control_word(&mut self, name: &str, param: Option<i32>) {
        if is_destination(name) {
            self.state.ignorable = true;
            return;
        }

        // Font switches apply even inside ignorable groups
        if name == "f" {
            if let Some(encoding) = param.and_then(|index| self.fonts.get(index)) {
                self.state.encoding = encoding;
            }
            return;
        }

        if self.state.ignorable {
            return;
        }

        if let Some(text) = special_character(name) {
            self.emit(text);
            return;
        }

        match name {
            "uc" => match param.and_then(|n| u32::try_from(n).ok()) {
                Some(skip) => self.state.unicode_skip = skip,
                None => log::debug!("Ignoring \\uc with parameter {param:?}"),
            },
            "u" => match param {
                Some(code) => {
                    self.unicode(code);
                    self.state.pending_skip = self.state.unicode_skip;
                },
                None => log::debug!("Ignoring \\u without a code point"),
            },
            _ => {},
        }
    }

    fn control_symbol(&mut self, symbol: char) {
        match symbol {
            '*' => self.state.ignorable = true,
            _ if self.state.ignorable => {},
            '~' => self.emit_char(NON_BREAKING_SPACE),
            '{' | '}' | '\\' => self.emit_char(symbol),
            _ => {},
        }
    }

    fn hex_escape<'a, I>(&mut self, byte: u8, tokens: &mut Peekable<I>)
    where
        I: Iterator<Item = Token<'a>>,
    {
        if self.state.pending_skip > 0 {
            self.state.pending_skip -= 1;
            return;
        }
        if self.state.ignorable {
            return;
        }

        let encoding = self.state.encoding;
        if encoding.is_single_byte() || byte < 0x80 {
            let text = decode_byte(encoding, byte);
            self.emit(&text);
            return;
        }

        // Line breaks carry no state and may wrap a pair
        while tokens.next_if_eq(&Token::LineBreak).is_some() {}
        match tokens.next_if(|token| matches!(token, Token::HexEscape(_))) {
            Some(Token::HexEscape(trail)) => {
                let text = decode_pair(encoding, byte, trail);
                self.emit(&text);
            },
            _ => {
                log::debug!(
                    "Lead byte {byte:#04x} of {} has no trail byte",
                    encoding.name()
                );
                let text = decode_byte(single_byte_fallback(), byte);
                self.emit(&text);
            },
        }
    }

    /// Emit the character for a `\uN` parameter.
    ///
    /// Negative values are the signed 16-bit form of code points above
    /// U+7FFF. Surrogate pairs written as two consecutive escapes are joined;
    /// anything that is not a valid scalar value becomes U+FFFD.
    fn unicode(&mut self, code: i32) {
        let code = if code < 0 { code + 0x10000 } else { code };
        let Ok(code) = u32::try_from(code) else {
            self.emit_char(char::REPLACEMENT_CHARACTER);
            return;
        };

        match code {
            0xD800..=0xDBFF => {
                self.flush_surrogate();
                self.high_surrogate = Some(code);
            },
            0xDC00..=0xDFFF => match self.high_surrogate.take() {
                Some(high) => {
                    let scalar = 0x10000 + ((high - 0xD800) << 10) + (code - 0xDC00);
                    self.push(char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER));
                },
                None => self.emit_char(char::REPLACEMENT_CHARACTER),
            },
            _ => self.emit_char(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
        }
    }

    /// A high surrogate not followed by a low one is replaced.
    #[inline]
    fn flush_surrogate(&mut self) {
        if self.high_surrogate.take().is_some() {
            self.output.push(char::REPLACEMENT_CHARACTER);
        }
    }

    #[inline]
    fn emit(&mut self, text: &str) {
        self.flush_surrogate();
        self.output.push_str(text);
    }

    #[inline]
    fn emit_char(&mut self, ch: char) {
        self.flush_surrogate();
        self.output.push(ch);
    }

    #[inline]
    fn push(&mut self, ch: char) {
        self.output.push(ch);
    }

    fn finish(mut self) -> String {
        self.flush_surrogate();
        self.output
    }
}

/// Reusable RTF stripper holding a set of [`StripOptions`].
///
/// The stripper keeps no state between calls and can be shared freely across
/// threads.
///
/// # Examples
///
/// ```rust
/// use rtfstrip::{StripOptions, Stripper};
///
/// let stripper = Stripper::with_options(StripOptions::new().with_document_codepage(false));
/// assert_eq!(stripper.strip(r"{\rtf1\ansi Hello\par World}").as_deref(), Some("Hello\r\nWorld"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stripper {
    options: StripOptions,
}

impl Stripper {
    /// Create a stripper with default options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stripper with the given options.
    #[inline]
    pub fn with_options(options: StripOptions) -> Self {
        Self { options }
    }

    /// The options this stripper was built with.
    #[inline]
    pub fn options(&self) -> &StripOptions {
        &self.options
    }

    /// Extract the plain text of `input`.
    ///
    /// Returns `None` for empty input. Any other input produces text, however
    /// malformed: unbalanced braces, unknown control words and undecodable
    /// bytes are tolerated.
    ///
    /// By default the `N` characters following `\binN` are dropped as binary
    /// payload rather than lexed as text. Turn this off with
    /// [`StripOptions::with_binary_skipping`] to lex them like any other text.
    pub fn strip(&self, input: &str) -> Option<String> {
        if input.is_empty() {
            return None;
        }

        let default_encoding = self.options.effective_encoding(input);
        let fonts = FontTable::resolve(input, default_encoding);
        log::trace!(
            "Stripping {} bytes of RTF, {} font(s), default encoding {}",
            input.len(),
            fonts.len(),
            default_encoding.name()
        );

        let mut tokens = Lexer::new(input)
            .with_binary_skipping(self.options.skip_binary)
            .peekable();
        if tokens.peek().is_none() {
            return Some(input.to_string());
        }

        let mut decoder = Decoder::new(&fonts, default_encoding, input.len() / 2);
        while let Some(token) = tokens.next() {
            decoder.process(token, &mut tokens);
        }

        Some(decoder.finish())
    }
}

/// Extract the plain text of an RTF document with default options.
///
/// Returns `None` when `input` is empty. Paragraph and line breaks come out
/// as `\r\n`, section and page breaks as `\n\n`, tabs as `\t`.
///
/// # Examples
///
/// ```rust
/// let text = rtfstrip::strip(r"{\rtf1\ansi{\fonttbl\f0\fswiss Helvetica;}\f0\pard Hello World!\par}");
/// assert_eq!(text.as_deref(), Some("Hello World!\r\n"));
///
/// assert_eq!(rtfstrip::strip(""), None);
/// ```
#[inline]
pub fn strip(input: &str) -> Option<String> {
    Stripper::new().strip(input)
}

/// Extract the plain text of an RTF document.
///
/// Same as [`strip`], with explicit options.
#[inline]
pub fn strip_with_options(input: &str, options: &StripOptions) -> Option<String> {
    Stripper::with_options(*options).strip(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{WINDOWS_1250, WINDOWS_1252};

    fn text(input: &str) -> String {
        strip(input).expect("non-empty input yields text")
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip(""), None);
        assert_eq!(Stripper::new().strip(""), None);
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(text("Hello, world! 123 ü"), "Hello, world! 123 ü");
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(text(r"{\rtf1 Hello\par World}"), "Hello\r\nWorld");
    }

    #[test]
    fn test_ignorable_destination() {
        assert_eq!(text(r"{\*\generator Test}"), "");
        assert_eq!(text(r"a{\*\unknownword hidden {nested} text}b"), "ab");
        assert_eq!(text(r"{\info{\title Doc}{\author Me}}Body"), "Body");
        assert_eq!(text(r"{\*\x a\par\tab b\emdash}"), "");
    }

    #[test]
    fn test_unicode_with_fallback() {
        assert_eq!(text(r"{\uc1\u233 word}"), "\u{e9}ord");
        assert_eq!(text(r"{\uc0\u233 x}"), "\u{e9}x");
        assert_eq!(text(r"{\uc2\u233 abc}"), "\u{e9}c");
        // Fallback given as a byte escape
        assert_eq!(text(r"\u233\'e9x"), "\u{e9}x");
    }

    #[test]
    fn test_unicode_negative_and_surrogates() {
        // Signed 16-bit form of U+F0B7
        assert_eq!(text(r"\u-3913?"), "\u{F0B7}");
        // U+1F600 as a surrogate pair
        assert_eq!(text(r"\u-10179?\u-8704?"), "\u{1F600}");
        // Lone halves
        assert_eq!(text(r"\u55357?x"), "\u{FFFD}x");
        assert_eq!(text(r"\u56832?x"), "\u{FFFD}x");
        assert_eq!(text(r"\u55357?"), "\u{FFFD}");
        // Beyond the Unicode range
        assert_eq!(text(r"\u2000000000?"), "\u{FFFD}");
    }

    #[test]
    fn test_unicode_skip_is_scoped() {
        assert_eq!(text(r"{{\uc3}\u233 ab}"), "\u{e9}b");
        assert_eq!(text(r"{\uc2{\uc0}\u233 abc}"), "\u{e9}c");
    }

    #[test]
    fn test_pending_skip_reset_by_control_words() {
        assert_eq!(text(r"\uc2\u233\par x"), "\u{e9}\r\nx");
        assert_eq!(text(r"\u233{x}"), "\u{e9}x");
    }

    #[test]
    fn test_line_breaks_do_not_count_as_fallback() {
        assert_eq!(text(concat!(r"\u233", "\r\nab")), "\u{e9}b");
    }

    #[test]
    fn test_invalid_uc_is_ignored() {
        assert_eq!(text(r"\uc-1\u233 ab"), "\u{e9}b");
        assert_eq!(text(r"\uc \u233 ab"), "\u{e9}b");
        assert_eq!(text(r"\u x"), "x");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(text(r"a\tab b\emdash c\line d"), "a\tb\u{2014}c\r\nd");
        assert_eq!(text(r"\lquote x\rquote"), "\u{2018}x\u{2019}");
        assert_eq!(text(r"a\sect b\page c"), "a\n\nb\n\nc");
    }

    #[test]
    fn test_control_symbols() {
        assert_eq!(text(r"a\~b\{c\}d\\e"), "a\u{A0}b{c}d\\e");
        assert_eq!(text(r"soft\-hyphen\_x"), "softhyphenx");
        assert_eq!(text(r"{\*\x \{\}\~}"), "");
    }

    #[test]
    fn test_unknown_control_words_are_dropped() {
        assert_eq!(text(r"\b bold\b0  \i italic\i0"), "bold italic");
    }

    #[test]
    fn test_unbalanced_braces_are_tolerated() {
        assert_eq!(text("a}b"), "ab");
        assert_eq!(text("}}}x{"), "x");
        assert_eq!(text(r"{\*\x a}}b"), "b");
    }

    #[test]
    fn test_font_charset_selects_codepage() {
        let input = r"{\fonttbl{\f0\fcharset238 Arial;}}{\f0\'e8}";
        assert_eq!(text(input), "\u{10D}");
        assert_ne!(text(input), text(r"{\'e8}"));
        assert_eq!(text(r"{\'e8}"), "\u{e8}");
    }

    #[test]
    fn test_font_switching() {
        let input = concat!(
            r"{\rtf1{\fonttbl{\f0\fcharset0 Times;}{\f1\fcharset204 Arial Cyr;}}",
            r"\f1\'e9 \f0\'e9 \f7\'e9}"
        );
        // \f7 is not in the table and keeps the previous encoding
        assert_eq!(text(input), "\u{439} \u{e9} \u{e9}");
    }

    #[test]
    fn test_font_switch_applies_inside_ignorable_groups() {
        // The last \fN of the font table stays active in the body
        let input = r"{\fonttbl{\f0\fcharset0 A;}{\f1\fcharset238 B;}}\'e8";
        assert_eq!(text(input), "\u{10D}");
    }

    #[test]
    fn test_double_byte_charset() {
        let input = r"{\fonttbl{\f0\fcharset128 MS Mincho;}}{\f0\'82\'a0\'82\'a2}";
        assert_eq!(text(input), "\u{3042}\u{3044}");

        let input = r"{\fonttbl{\f0\fcharset134 SimSun;}}{\f0 A\'d6\'d0B}";
        assert_eq!(text(input), "A\u{4E2D}B");
    }

    #[test]
    fn test_double_byte_pair_wrapped_across_lines() {
        let input = "{\\fonttbl{\\f0\\fcharset128 M;}}{\\f0\\'82\r\n\\'a0}";
        assert_eq!(text(input), "\u{3042}");

        let input = "{\\fonttbl{\\f0\\fcharset134 SimSun;}}{\\f0\\'d6\n\n\\'d0\\'82\r\nx}";
        assert_eq!(text(input), "\u{4E2D}\u{201A}x");
    }

    #[test]
    fn test_unpaired_lead_byte_falls_back_to_single_byte() {
        let input = r"{\fonttbl{\f0\fcharset128 MS Mincho;}}{\f0\'82x}";
        assert_eq!(text(input), "\u{201A}x");

        let input = r"{\fonttbl{\f0\fcharset128 MS Mincho;}}{\f0\'82}";
        assert_eq!(text(input), "\u{201A}");
    }

    #[test]
    fn test_skipped_hex_escapes_in_double_byte_font() {
        // Both bytes of the fallback are skipped one token at a time
        let input = r"{\fonttbl{\f0\fcharset128 MS Mincho;}}{\f0\uc2\u12354\'82\'a0x}";
        assert_eq!(text(input), "\u{3042}x");
    }

    #[test]
    fn test_document_codepage() {
        let input = r"{\rtf1\ansi\ansicpg1251 \'e9}";
        assert_eq!(text(input), "\u{439}");

        let options = StripOptions::new().with_document_codepage(false);
        assert_eq!(strip_with_options(input, &options).as_deref(), Some("\u{e9}"));
    }

    #[test]
    fn test_default_encoding_option() {
        let options = StripOptions::new().with_default_encoding(WINDOWS_1250);
        assert_eq!(strip_with_options(r"\'e8", &options).as_deref(), Some("\u{10D}"));

        // Charset 1 means the default codepage
        let input = r"{\fonttbl{\f0\fcharset1 A;}}\f0\'e8";
        assert_eq!(strip_with_options(input, &options).as_deref(), Some("\u{10D}"));
        assert_eq!(text(input), "\u{e8}");
    }

    #[test]
    fn test_binary_data_is_skipped() {
        assert_eq!(text(r"x\bin3 {}\y"), "xy");

        let options = StripOptions::new().with_binary_skipping(false);
        assert_eq!(strip_with_options(r"x\bin3 {}\y", &options).as_deref(), Some("x"));
    }

    #[test]
    fn test_wordpad_document() {
        let input = concat!(
            r"{\rtf1\ansi\ansicpg1252\deff0\nouicompat\deflang1033{\fonttbl{\f0\fnil\fcharset0 Calibri;}}",
            "\r\n",
            r"{\*\generator Riched20 10.0.19041}\viewkind4\uc1 ",
            "\r\n",
            r"\pard\sa200\sl276\slmult1\f0\fs22\lang9 Hello \b World\b0 !\par",
            "\r\n",
            r"Caf\'e9\par",
            "\r\n",
            "}\r\n",
        );
        assert_eq!(text(input), "Hello World!\r\nCaf\u{e9}\r\n");
    }

    #[test]
    fn test_field_result_is_dropped() {
        // Field results are destinations too
        let input = r#"See {\field{\*\fldinst HYPERLINK "http://x"}{\fldrslt link}} here"#;
        assert_eq!(text(input), "See  here");
    }

    #[test]
    fn test_nested_groups_restore_state() {
        let fonts = FontTable::new();
        let mut decoder = Decoder::new(&fonts, WINDOWS_1252, 0);
        decoder.state.unicode_skip = 3;
        let before = decoder.state;

        let mut tokens = Lexer::new(r"{\*\comment {\uc5 inner} more}").peekable();
        while let Some(token) = tokens.next() {
            decoder.process(token, &mut tokens);
        }

        assert_eq!(decoder.state, before);
        assert!(decoder.stack.is_empty());
        assert_eq!(decoder.finish(), "");
    }

    #[test]
    fn test_destination_marks_only_its_group() {
        let fonts = FontTable::new();
        let mut decoder = Decoder::new(&fonts, WINDOWS_1252, 0);
        let mut tokens = Lexer::new(r"{\pict").peekable();
        while let Some(token) = tokens.next() {
            decoder.process(token, &mut tokens);
        }
        assert!(decoder.state.ignorable);
        assert_eq!(decoder.stack.as_slice(), &[ScopeFrame { unicode_skip: 1, ignorable: false }]);
    }

    #[test]
    fn test_stripper_is_reusable() {
        let stripper = Stripper::new();
        assert_eq!(stripper.strip(r"{\*\x a}b").as_deref(), Some("b"));
        assert_eq!(stripper.strip(r"{\uc0 c}").as_deref(), Some("c"));
        assert_eq!(stripper.strip(r"\u233 d").as_deref(), Some("\u{e9}"));
        assert_eq!(stripper.options(), &StripOptions::default());
    }

    mod proptests {
        use super::super::*;
        use proptest::prelude::*;

        /// Text without backslashes, braces or line breaks.
        fn plain_text() -> impl Strategy<Value = String> {
            "[^\\\\{}\r\n]{1,64}"
        }

        /// Fragments that exercise every lexer rule and decoder branch.
        const FRAGMENTS: &[&str] = &[
            "{",
            "}",
            "\\",
            "\\'",
            "\\*",
            "\\par ",
            "\\u-10179",
            "\\uc",
            "\\f1",
            "\\bin5 ",
            "{\\fonttbl{\\f0\\fcharset128 A;}{\\f1\\fcharset238 B;}}",
            "\r\n",
        ];

        /// Short RTF-looking strings.
        fn rtf_like() -> impl Strategy<Value = String> {
            proptest::collection::vec(
                prop_oneof![
                    proptest::sample::select(FRAGMENTS).prop_map(str::to_string),
                    "[0-9a-fA-F]{1,3}",
                    "[a-z ]{1,4}",
                ],
                0..40,
            )
            .prop_map(|parts| parts.concat())
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn prop_plain_text_round_trips(s in plain_text()) {
                let once = strip(&s);
                prop_assert_eq!(once.as_deref(), Some(s.as_str()));
                let twice = strip(&s).and_then(|t| strip(&t));
                prop_assert_eq!(twice, once);
            }

            #[test]
            fn prop_never_panics(s in any::<String>()) {
                let _ = strip(&s);
            }

            #[test]
            fn prop_rtf_like_input_yields_text(s in rtf_like()) {
                let result = strip(&s);
                prop_assert_eq!(result.is_none(), s.is_empty());
            }

            #[test]
            fn prop_ignorable_group_contributes_nothing(
                before in plain_text(),
                hidden in "[a-z0-9 ]{0,20}",
                after in plain_text(),
            ) {
                let input = format!("{before}{{\\*\\x {hidden}{{\\par {hidden}}}}}{after}");
                let expected = format!("{before}{after}");
                prop_assert_eq!(strip(&input), Some(expected));
            }
        }
    }
}
