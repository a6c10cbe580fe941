//! Byte cursor shared by the typed and dynamic decoding paths.
//!
//! The [`Scanner`] owns nothing but an offset into a borrowed buffer. It knows
//! how to skip trivia (whitespace and `//` line comments), test for literal
//! prefixes without advancing, and cut raw tokens (identifiers, quoted
//! strings, numeric runs) out of the input. Interpreting those tokens is left
//! to the deserializer.

use crate::error::{Error, Position, Result};

/// Tokens that are identifiers in ZON: ASCII letters, digits and `_`.
#[inline]
pub(crate) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Returns `true` if `s` is a non-empty run of identifier bytes.
pub(crate) fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_ident_byte)
}

/// Returns `true` if `s` is `0x`/`0X` followed by at least one hex digit.
pub(crate) fn is_hex_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 3
        && bytes[0] == b'0'
        && (bytes[1] == b'x' || bytes[1] == b'X')
        && bytes[2..].iter().all(u8::is_ascii_hexdigit)
}

/// Returns `true` if `s` is a dot-atom: `.` followed by identifier bytes.
pub(crate) fn is_dot_atom(s: &str) -> bool {
    s.strip_prefix('.').map_or(false, is_identifier)
}

/// A numeric token cut from the input, before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumberToken<'de> {
    /// The complete token text, sign included.
    pub text: &'de str,
    pub start: usize,
    pub negative: bool,
    /// Hex digits after `0x`, when the token is a hex literal.
    pub hex_digits: Option<&'de str>,
}

impl NumberToken<'_> {
    /// Returns `true` for decimal tokens with a fraction or exponent.
    pub fn is_float(&self) -> bool {
        self.hex_digits.is_none() && self.text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
    }
}

pub(crate) struct Scanner<'de> {
    input: &'de [u8],
    offset: usize,
}

impl<'de> Scanner<'de> {
    pub fn new(input: &'de [u8]) -> Self {
        Scanner { input, offset: 0 }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Rewinds or advances to a previously saved offset.
    #[inline]
    pub fn reset(&mut self, offset: usize) {
        self.offset = offset.min(self.input.len());
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.offset >= self.input.len()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.offset).copied()
    }

    #[inline]
    pub fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.offset + ahead).copied()
    }

    #[inline]
    pub fn bump(&mut self) {
        if self.offset < self.input.len() {
            self.offset += 1;
        }
    }

    pub fn position(&self) -> Position {
        self.position_at(self.offset)
    }

    pub fn position_at(&self, offset: usize) -> Position {
        Position::locate(self.input, offset)
    }

    /// Skips whitespace and `//` comments. Idempotent.
    pub fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => self.offset += 1,
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while let Some(b) = self.peek() {
                        self.offset += 1;
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Skips trivia, then any run of bare commas (and the trivia between them).
    pub fn skip_separators(&mut self) {
        self.skip_trivia();
        while self.peek() == Some(b',') {
            self.offset += 1;
            self.skip_trivia();
        }
    }

    #[inline]
    pub fn at_prefix(&self, text: &str) -> bool {
        self.input[self.offset..].starts_with(text.as_bytes())
    }

    /// Like [`Scanner::at_prefix`], but the keyword must not run into an identifier byte,
    /// so `nullable` is not read as `null`.
    pub fn at_keyword(&self, keyword: &str) -> bool {
        self.at_prefix(keyword) && !self.peek_at(keyword.len()).map_or(false, is_ident_byte)
    }

    /// Consumes `keyword` if [`Scanner::at_keyword`] holds.
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.offset += keyword.len();
            true
        } else {
            false
        }
    }

    /// Returns `true` if the cursor sits on the composite opener `.{`.
    #[inline]
    pub fn at_composite(&self) -> bool {
        self.at_prefix(".{")
    }

    /// Returns `true` if the cursor sits on `.` followed by an identifier byte.
    #[inline]
    pub fn at_dot_atom(&self) -> bool {
        self.peek() == Some(b'.') && self.peek_at(1).map_or(false, is_ident_byte)
    }

    pub fn error_end(&self) -> Error {
        Error::UnexpectedEnd {
            position: self.position(),
        }
    }

    /// Errors with `UnexpectedEnd` at end of input, `ExpectedToken` otherwise.
    pub fn error_expected(&self, expected: &'static str) -> Error {
        if self.at_end() {
            self.error_end()
        } else {
            Error::ExpectedToken {
                position: self.position(),
                expected,
            }
        }
    }

    /// Consumes `byte` or fails with [`Scanner::error_expected`].
    pub fn expect(&mut self, byte: u8, expected: &'static str) -> Result<()> {
        if self.peek() == Some(byte) {
            self.offset += 1;
            Ok(())
        } else {
            Err(self.error_expected(expected))
        }
    }

    /// Consumes the composite opener `.{`.
    pub fn expect_composite(&mut self) -> Result<()> {
        if self.at_composite() {
            self.offset += 2;
            Ok(())
        } else {
            Err(self.error_expected("`.{`"))
        }
    }

    /// Consumes identifier bytes. The returned slice may be empty.
    pub fn scan_identifier(&mut self) -> &'de str {
        let start = self.offset;
        while self.peek().map_or(false, is_ident_byte) {
            self.offset += 1;
        }
        ascii_str(&self.input[start..self.offset])
    }

    /// Consumes `.identifier` in key position and returns the identifier without its dot.
    pub fn scan_key(&mut self) -> Result<&'de str> {
        self.expect(b'.', "`.` before key")?;
        let key = self.scan_identifier();
        if key.is_empty() {
            return Err(self.error_expected("identifier"));
        }
        Ok(key)
    }

    /// Consumes a dot-atom and returns it with its leading dot.
    pub fn scan_dot_atom(&mut self) -> Result<&'de str> {
        let start = self.offset;
        self.expect(b'.', "`.`")?;
        if self.scan_identifier().is_empty() {
            return Err(self.error_expected("identifier"));
        }
        Ok(ascii_str(&self.input[start..self.offset]))
    }

    /// Consumes a double-quoted string and returns the raw bytes between the quotes.
    ///
    /// There are no escape sequences: the string ends at the next `"`.
    pub fn scan_quoted(&mut self) -> Result<&'de str> {
        let start = self.offset;
        self.expect(b'"', "`\"`")?;
        let body = self.offset;
        match self.input[body..].iter().position(|&b| b == b'"') {
            Some(len) => {
                self.offset = body + len + 1;
                std::str::from_utf8(&self.input[body..body + len]).map_err(|e| {
                    Error::InvalidUtf8 {
                        position: self.position_at(body + e.valid_up_to()),
                    }
                })
            }
            None => {
                self.offset = self.input.len();
                Err(Error::UnterminatedString {
                    position: self.position_at(start),
                })
            }
        }
    }

    /// Consumes an integer token: optional sign (when `signed`), then either
    /// `0x`/`0X` with hex digits, or decimal digits.
    pub fn scan_integer(&mut self, signed: bool) -> NumberToken<'de> {
        let start = self.offset;
        let negative = signed && self.peek() == Some(b'-');
        if signed && matches!(self.peek(), Some(b'+' | b'-')) {
            self.offset += 1;
        }
        let hex_digits = self.scan_hex_tail();
        if hex_digits.is_none() {
            while self.peek().map_or(false, |b| b.is_ascii_digit()) {
                self.offset += 1;
            }
        }
        NumberToken {
            text: ascii_str(&self.input[start..self.offset]),
            start,
            negative,
            hex_digits,
        }
    }

    /// Consumes the maximal run of digits and `. e E + -`.
    pub fn scan_float(&mut self) -> NumberToken<'de> {
        let start = self.offset;
        while self
            .peek()
            .map_or(false, |b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        {
            self.offset += 1;
        }
        let text = ascii_str(&self.input[start..self.offset]);
        NumberToken {
            text,
            start,
            negative: text.starts_with('-'),
            hex_digits: None,
        }
    }

    /// Consumes a numeric token whose kind is decided by its content: a hex
    /// literal after an optional sign, otherwise a float-style run.
    pub fn scan_number(&mut self) -> NumberToken<'de> {
        let start = self.offset;
        let negative = self.peek() == Some(b'-');
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.offset += 1;
        }
        if let Some(hex_digits) = self.scan_hex_tail() {
            return NumberToken {
                text: ascii_str(&self.input[start..self.offset]),
                start,
                negative,
                hex_digits: Some(hex_digits),
            };
        }
        self.offset = start;
        self.scan_float()
    }

    /// Consumes `0x` plus hex digits when present. A bare `0x` is consumed with
    /// empty digits so the caller reports it as a malformed number.
    fn scan_hex_tail(&mut self) -> Option<&'de str> {
        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.offset += 2;
            let digits = self.offset;
            while self.peek().map_or(false, |b| b.is_ascii_hexdigit()) {
                self.offset += 1;
            }
            Some(ascii_str(&self.input[digits..self.offset]))
        } else {
            None
        }
    }

    /// Returns `true` if a `.identifier` followed by `=` starts at the cursor.
    /// The cursor does not move.
    pub fn looks_like_key(&mut self) -> bool {
        let saved = self.offset();
        let is_key = self.at_dot_atom() && {
            self.offset += 1;
            self.scan_identifier();
            self.skip_trivia();
            self.peek() == Some(b'=')
        };
        self.reset(saved);
        is_key
    }
}

/// Converts a slice that the scanner only ever cuts from ASCII bytes.
fn ascii_str(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_trivia_handles_comments() {
        let mut s = Scanner::new(b"  // note\n\t// another\r\n  42");
        s.skip_trivia();
        assert_eq!(s.peek(), Some(b'4'));
        s.skip_trivia();
        assert_eq!(s.peek(), Some(b'4'));
    }

    #[test]
    fn test_comment_at_end_of_input() {
        let mut s = Scanner::new(b"// only a comment");
        s.skip_trivia();
        assert!(s.at_end());
    }

    #[test]
    fn test_single_slash_is_not_trivia() {
        let mut s = Scanner::new(b" /x");
        s.skip_trivia();
        assert_eq!(s.peek(), Some(b'/'));
    }

    #[test]
    fn test_keyword_boundary() {
        let s = Scanner::new(b"nullable");
        assert!(s.at_prefix("null"));
        assert!(!s.at_keyword("null"));
        assert!(Scanner::new(b"null,").at_keyword("null"));
        assert!(Scanner::new(b"true}").at_keyword("true"));
    }

    #[test]
    fn test_scan_key() {
        let mut s = Scanner::new(b".name_1 = 3");
        assert_eq!(s.scan_key().unwrap(), "name_1");
        assert_eq!(s.peek(), Some(b' '));
    }

    #[test]
    fn test_scan_key_dangling_dot() {
        let mut s = Scanner::new(b". = 3");
        assert!(matches!(s.scan_key(), Err(Error::ExpectedToken { .. })));
        let mut s = Scanner::new(b".");
        assert!(matches!(s.scan_key(), Err(Error::UnexpectedEnd { .. })));
    }

    #[test]
    fn test_scan_quoted() {
        let mut s = Scanner::new(b"\"hello world\" rest");
        assert_eq!(s.scan_quoted().unwrap(), "hello world");
        assert_eq!(s.peek(), Some(b' '));
    }

    #[test]
    fn test_scan_quoted_unterminated() {
        let mut s = Scanner::new(b"\"open");
        let err = s.scan_quoted().unwrap_err();
        assert_eq!(
            err,
            Error::UnterminatedString {
                position: Position::locate(b"\"open", 0)
            }
        );
        assert!(s.at_end());
    }

    #[test]
    fn test_scan_quoted_invalid_utf8() {
        let mut s = Scanner::new(b"\"ab\xff\"");
        let err = s.scan_quoted().unwrap_err();
        assert_eq!(err.position().map(|p| p.offset), Some(3));
    }

    #[test]
    fn test_scan_integer_hex_before_decimal() {
        let mut s = Scanner::new(b"0x1F,");
        let tok = s.scan_integer(true);
        assert_eq!(tok.text, "0x1F");
        assert_eq!(tok.hex_digits, Some("1F"));
        assert_eq!(s.peek(), Some(b','));
    }

    #[test]
    fn test_scan_integer_signed() {
        let mut s = Scanner::new(b"-42}");
        let tok = s.scan_integer(true);
        assert_eq!(tok.text, "-42");
        assert!(tok.negative);
        assert_eq!(tok.hex_digits, None);

        let mut s = Scanner::new(b"-42");
        let tok = s.scan_integer(false);
        assert_eq!(tok.text, "");
    }

    #[test]
    fn test_scan_float_run() {
        let mut s = Scanner::new(b"-1.5e+3, 2");
        let tok = s.scan_float();
        assert_eq!(tok.text, "-1.5e+3");
        assert!(tok.is_float());
    }

    #[test]
    fn test_scan_number_kinds() {
        let mut s = Scanner::new(b"0XfF");
        let tok = s.scan_number();
        assert_eq!(tok.hex_digits, Some("fF"));
        assert!(!tok.is_float());

        let mut s = Scanner::new(b"12 ");
        let tok = s.scan_number();
        assert_eq!(tok.text, "12");
        assert!(!tok.is_float());

        let mut s = Scanner::new(b"1e9");
        assert!(s.scan_number().is_float());
    }

    #[test]
    fn test_looks_like_key_does_not_move() {
        let mut s = Scanner::new(b".a // c\n = 1");
        assert!(s.looks_like_key());
        assert_eq!(s.offset(), 0);

        let mut s = Scanner::new(b".a, .b");
        assert!(!s.looks_like_key());

        let mut s = Scanner::new(b".{}");
        assert!(!s.looks_like_key());
    }

    #[test]
    fn test_literal_shapes() {
        assert!(is_hex_literal("0x1F"));
        assert!(is_hex_literal("0Xab"));
        assert!(!is_hex_literal("0x"));
        assert!(!is_hex_literal("0x1G"));
        assert!(!is_hex_literal("1F"));

        assert!(is_dot_atom(".red"));
        assert!(is_dot_atom("._1"));
        assert!(!is_dot_atom("."));
        assert!(!is_dot_atom(".a-b"));
        assert!(!is_dot_atom("red"));
    }
}
