//! The byte-based tokenizer (lexer).
//!
//! It consumes the raw input `&str` (as `&[u8]`) in a single left-to-right
//! pass and produces a flat sequence of `Token`s. It knows nothing about
//! nesting: balancing braces and brackets is the parser's job.

use crate::error::{LexError, Position};
use crate::limits::Limits;
use crate::token::{Token, TokenType};
use memchr::{memchr, memchr2};
use tracing::{debug, trace};

// --- The Lookup Table (LUT) ---
// One entry per byte value, so dispatch on the first byte of a token is a
// single array lookup.
const OTHER: u8 = 0;
const WHITESPACE: u8 = 1;
const STRUCTURAL: u8 = 2;
const ALPHA: u8 = 3;
const NUMERIC: u8 = 4; // digits and '-'
const QUOTE: u8 = 5;

static BYTE_CLASS: [u8; 256] = {
    let mut table = [OTHER; 256];

    table[b' ' as usize] = WHITESPACE;
    table[b'\n' as usize] = WHITESPACE;
    table[b'\r' as usize] = WHITESPACE;
    table[b'\t' as usize] = WHITESPACE;

    table[b'{' as usize] = STRUCTURAL;
    table[b'}' as usize] = STRUCTURAL;
    table[b'[' as usize] = STRUCTURAL;
    table[b']' as usize] = STRUCTURAL;
    table[b':' as usize] = STRUCTURAL;
    table[b',' as usize] = STRUCTURAL;

    table[b'"' as usize] = QUOTE;

    let mut b = b'a';
    while b <= b'z' {
        table[b as usize] = ALPHA;
        table[b.to_ascii_uppercase() as usize] = ALPHA;
        b += 1;
    }

    table[b'-' as usize] = NUMERIC;
    let mut d = b'0';
    while d <= b'9' {
        table[d as usize] = NUMERIC;
        d += 1;
    }

    table
};

fn is_json_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Tokenizes a complete JSON document with the default [`Limits`].
///
/// # Errors
/// Returns the first [`LexError`] found. The document must be wrapped in a
/// matching `{}` or `[]` pair (surrounding whitespace is ignored).
///
/// # Examples
/// ```
/// use json_tree::{tokenize, TokenType};
///
/// let tokens = tokenize(r#"{"key":"va\"l"}"#).unwrap();
/// let kinds: Vec<TokenType> = tokens.into_iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenType::LeftBrace,
///         TokenType::String("key".to_string()),
///         TokenType::Colon,
///         TokenType::String("va\"l".to_string()),
///         TokenType::RightBrace,
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with_limits(text, Limits::default())
}

/// Tokenizes a complete JSON document, rejecting input larger than
/// `limits.max_input_size` before any scanning happens.
pub fn tokenize_with_limits(text: &str, limits: Limits) -> Result<Vec<Token>, LexError> {
    if text.len() > limits.max_input_size {
        debug!(
            size = text.len(),
            limit = limits.max_input_size,
            "input rejected before scanning"
        );
        return Err(LexError::InputTooLarge {
            size: text.len(),
            limit: limits.max_input_size,
        });
    }
    check_enclosure(text)?;

    let tokens = Tokenizer::new(text).collect::<Result<Vec<_>, _>>()?;
    debug!(bytes = text.len(), tokens = tokens.len(), "tokenized document");
    Ok(tokens)
}

fn check_enclosure(text: &str) -> Result<(), LexError> {
    let trimmed = text.trim_matches(is_json_whitespace);
    let first = trimmed.chars().next();
    let last = trimmed.chars().next_back();
    match (first, last) {
        (Some('{'), Some('}')) | (Some('['), Some(']')) => Ok(()),
        _ => Err(LexError::InvalidEnclosure { first, last }),
    }
}

/// Why [`scan_number`] rejected a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFault {
    /// No digit after the optional minus sign.
    MissingIntegerDigits,
    /// An integer part of `0` followed by another digit.
    LeadingZero,
    /// A `.` or exponent marker with no digits after it. `end` is the
    /// offset where a digit was expected.
    MissingDigits {
        /// Offset just past the accepted text.
        end: usize,
    },
}

/// Finds the end of the number literal starting at `start`.
///
/// Accepts exactly `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?` and
/// returns the offset one past its last byte. Scanning stops at the first
/// byte that cannot extend the literal; what follows is the caller's concern.
///
/// # Examples
/// ```
/// use json_tree::scan_number;
///
/// let text = "Σ json -1.234e-5x";
/// assert_eq!(scan_number(text.as_bytes(), 8), Ok(text.len() - 1));
/// ```
pub fn scan_number(bytes: &[u8], start: usize) -> Result<usize, NumberFault> {
    let mut end = start;
    if bytes.get(end) == Some(&b'-') {
        end += 1;
    }

    match bytes.get(end) {
        Some(b'0') => {
            end += 1;
            if matches!(bytes.get(end), Some(b'0'..=b'9')) {
                return Err(NumberFault::LeadingZero);
            }
        }
        Some(b'1'..=b'9') => end = skip_digits(bytes, end + 1),
        _ => return Err(NumberFault::MissingIntegerDigits),
    }

    if bytes.get(end) == Some(&b'.') {
        let digits_end = skip_digits(bytes, end + 1);
        if digits_end == end + 1 {
            return Err(NumberFault::MissingDigits { end: end + 1 });
        }
        end = digits_end;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let digits_end = skip_digits(bytes, exponent);
        if digits_end == exponent {
            return Err(NumberFault::MissingDigits { end: exponent });
        }
        end = digits_end;
    }

    Ok(end)
}

fn skip_digits(bytes: &[u8], mut index: usize) -> usize {
    while matches!(bytes.get(index), Some(b'0'..=b'9')) {
        index += 1;
    }
    index
}

/// Where the string scanner is relative to escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringState {
    /// Ordinary characters; `"` ends the string, `\` starts an escape.
    Normal,
    /// Just read a `\`.
    Escaping,
    /// Inside `\uXXXX`, waiting for `remaining` hex digits.
    UnicodeEscape { remaining: u8 },
}

/// Resolves every escape in an already validated string body.
///
/// `\uXXXX` is decoded on its own; surrogate halves are not joined and
/// become U+FFFD since they are not valid `char`s.
fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(slash) = memchr(b'\\', rest.as_bytes()) {
        out.push_str(&rest[..slash]);
        let escape = &rest[slash + 1..];
        let consumed = match escape.chars().next() {
            Some('b') => {
                out.push('\u{0008}');
                2
            }
            Some('f') => {
                out.push('\u{000C}');
                2
            }
            Some('n') => {
                out.push('\n');
                2
            }
            Some('r') => {
                out.push('\r');
                2
            }
            Some('t') => {
                out.push('\t');
                2
            }
            Some('u') => {
                let code = escape
                    .get(1..5)
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok());
                out.push(
                    code.and_then(char::from_u32)
                        .unwrap_or(char::REPLACEMENT_CHARACTER),
                );
                6
            }
            // '"', '\\' and '/' stand for themselves.
            Some(c) => {
                out.push(c);
                1 + c.len_utf8()
            }
            None => break,
        };
        rest = rest.get(slash + consumed..).unwrap_or_default();
    }

    out.push_str(rest);
    out
}

/// The tokenizer (lexer).
///
/// It is an `Iterator` over `Result<Token, LexError>` and stops for good
/// after the first error. Unlike [`tokenize`], iterating does not check that
/// the document is enclosed in `{}` or `[]`.
pub struct Tokenizer<'a> {
    /// The input as text, for slicing out strings and numbers.
    text: &'a str,
    /// The same input as raw bytes, for scanning.
    bytes: &'a [u8],
    /// The current position (index) in `bytes`.
    cursor: usize,
    /// The current line number (1-indexed).
    line: usize,
    /// Byte offset where the current line starts.
    line_start: usize,
    /// Set once an error has been returned.
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new `Tokenizer` over an input string.
    pub fn new(text: &'a str) -> Self {
        Tokenizer {
            text,
            bytes: text.as_bytes(),
            cursor: 0,
            line: 1,
            line_start: 0,
            failed: false,
        }
    }

    /// The current cursor location.
    // Not `position`: on `&mut Tokenizer` that resolves to `Iterator::position`.
    pub fn location(&self) -> Position {
        self.position_at(self.cursor)
    }

    // Newlines are only ever consumed as whitespace between tokens, so
    // every offset inside the current token lies on the current line.
    fn position_at(&self, offset: usize) -> Position {
        Position {
            offset,
            line: self.line,
            column: offset.saturating_sub(self.line_start) + 1,
        }
    }

    fn char_at(&self, offset: usize) -> char {
        self.text
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn rest(&self) -> &'a str {
        self.text.get(self.cursor..).unwrap_or_default()
    }

    fn unexpected_character(&self, offset: usize) -> LexError {
        LexError::UnexpectedCharacter {
            found: self.char_at(offset),
            position: self.position_at(offset),
        }
    }

    fn unrecognized_literal(&self) -> LexError {
        LexError::UnrecognizedLiteral {
            found: self.rest().chars().take(10).collect(),
            position: self.location(),
        }
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(&byte) = self.bytes.get(self.cursor) {
            if BYTE_CLASS[byte as usize] != WHITESPACE {
                break;
            }
            self.cursor += 1;
            if byte == b'\n' {
                self.line += 1;
                self.line_start = self.cursor;
            }
        }
    }

    fn lex_structural(&mut self, byte: u8) -> Result<TokenType, LexError> {
        let kind = match byte {
            b'{' => TokenType::LeftBrace,
            b'}' => TokenType::RightBrace,
            b'[' => TokenType::LeftBracket,
            b']' => TokenType::RightBracket,
            b':' => TokenType::Colon,
            b',' => TokenType::Comma,
            _ => return Err(self.unexpected_character(self.cursor)),
        };
        self.cursor += 1;
        Ok(kind)
    }

    /// Matches `true`, `false` or `null` as a prefix of the remaining input.
    fn lex_literal(&mut self) -> Result<TokenType, LexError> {
        let rest = self.rest();
        for (word, kind) in [
            ("true", TokenType::Bool(true)),
            ("false", TokenType::Bool(false)),
            ("null", TokenType::Null),
        ] {
            if rest.starts_with(word) {
                self.cursor += word.len();
                return Ok(kind);
            }
        }
        Err(self.unrecognized_literal())
    }

    fn lex_number(&mut self) -> Result<TokenType, LexError> {
        let start = self.cursor;
        let end = scan_number(self.bytes, start).map_err(|fault| match fault {
            NumberFault::MissingIntegerDigits => self.unexpected_character(start),
            NumberFault::LeadingZero => LexError::LeadingZero {
                position: self.position_at(start),
            },
            NumberFault::MissingDigits { end } => LexError::InvalidNumber {
                literal: self.text.get(start..end).unwrap_or_default().to_string(),
                position: self.position_at(start),
            },
        })?;

        let literal = self.text.get(start..end).unwrap_or_default();
        // Exponents past the f64 range parse as infinity, which JSON cannot carry.
        let number = literal
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| LexError::InvalidNumber {
                literal: literal.to_string(),
                position: self.position_at(start),
            })?;

        self.cursor = end;
        Ok(TokenType::Number(number))
    }

    /// Scans a string literal and decodes its escapes.
    ///
    /// The scan validates every escape and finds the closing quote; only if
    /// an escape was seen does the body get rebuilt, otherwise it is copied
    /// as-is.
    fn lex_string(&mut self) -> Result<TokenType, LexError> {
        let open = self.cursor;
        let body_start = open + 1;
        let mut index = body_start;
        let mut state = StringState::Normal;
        let mut has_escapes = false;

        let close = loop {
            match state {
                StringState::Normal => {
                    let rest = self.bytes.get(index..).unwrap_or_default();
                    let hit = memchr2(b'"', b'\\', rest);
                    self.reject_control_bytes(index, hit.unwrap_or(rest.len()))?;
                    let Some(hit) = hit else {
                        return Err(LexError::UnterminatedString {
                            position: self.position_at(open),
                        });
                    };
                    if rest[hit] == b'"' {
                        break index + hit;
                    }
                    has_escapes = true;
                    state = StringState::Escaping;
                    index += hit + 1;
                }
                StringState::Escaping => {
                    let Some(&byte) = self.bytes.get(index) else {
                        return Err(LexError::UnterminatedString {
                            position: self.position_at(open),
                        });
                    };
                    state = match byte {
                        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
                            StringState::Normal
                        }
                        b'u' => StringState::UnicodeEscape { remaining: 4 },
                        _ => {
                            return Err(LexError::InvalidEscape {
                                escape: self.char_at(index),
                                position: self.position_at(index - 1),
                            })
                        }
                    };
                    index += 1;
                }
                StringState::UnicodeEscape { remaining } => match self.bytes.get(index) {
                    Some(byte) if byte.is_ascii_hexdigit() => {
                        index += 1;
                        state = if remaining == 1 {
                            StringState::Normal
                        } else {
                            StringState::UnicodeEscape {
                                remaining: remaining - 1,
                            }
                        };
                    }
                    _ => {
                        let backslash = index - (4 - remaining as usize) - 2;
                        return Err(LexError::InvalidUnicodeEscape {
                            sequence: self
                                .text
                                .get(backslash..)
                                .unwrap_or_default()
                                .chars()
                                .take(6)
                                .collect(),
                            position: self.position_at(backslash),
                        });
                    }
                },
            }
        };

        let raw = self.text.get(body_start..close).unwrap_or_default();
        let value = if has_escapes {
            decode_escapes(raw)
        } else {
            raw.to_string()
        };
        self.cursor = close + 1;
        Ok(TokenType::String(value))
    }

    fn reject_control_bytes(&self, start: usize, len: usize) -> Result<(), LexError> {
        let span = self.bytes.get(start..start + len).unwrap_or_default();
        match span.iter().position(|&b| b < 0x20) {
            Some(i) => Err(self.unexpected_character(start + i)),
            None => Ok(()),
        }
    }

    /// Handles a first byte the LUT does not classify. Non-ASCII letters
    /// read as an unquoted word; anything else is simply out of place.
    fn lex_other(&self) -> LexError {
        if self.char_at(self.cursor).is_alphabetic() {
            self.unrecognized_literal()
        } else {
            self.unexpected_character(self.cursor)
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, LexError>;

    /// Gets the next `Token` from the input.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.skip_whitespace();

        let byte = *self.bytes.get(self.cursor)?;
        let position = self.position_at(self.cursor);

        let kind = match BYTE_CLASS[byte as usize] {
            STRUCTURAL => self.lex_structural(byte),
            QUOTE => self.lex_string(),
            NUMERIC => self.lex_number(),
            ALPHA => self.lex_literal(),
            _ => Err(self.lex_other()),
        };

        match kind {
            Ok(kind) => {
                trace!(?kind, offset = position.offset, "token");
                Some(Ok(Token { kind, position }))
            }
            Err(error) => {
                debug!(%error, "tokenizer stopped");
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Result<Vec<TokenType>, LexError> {
        tokenize(input).map(|tokens| tokens.into_iter().map(|t| t.kind).collect())
    }

    fn string(s: &str) -> TokenType {
        TokenType::String(s.to_string())
    }

    fn at(offset: usize, line: usize, column: usize) -> Position {
        Position {
            offset,
            line,
            column,
        }
    }

    #[test]
    fn test_tokenizer_structurals() {
        let expected = vec![
            TokenType::LeftBracket,
            TokenType::LeftBrace,
            TokenType::RightBrace,
            TokenType::Comma,
            TokenType::Colon,
            TokenType::RightBracket,
        ];
        assert_eq!(kinds("[{},:]").unwrap(), expected);
    }

    #[test]
    fn test_tokenizer_escaped_quote() {
        let expected = vec![
            TokenType::LeftBrace,
            string("key"),
            TokenType::Colon,
            string("va\"l"),
            TokenType::RightBrace,
        ];
        assert_eq!(kinds(r#"{"key":"va\"l"}"#).unwrap(), expected);
    }

    #[test]
    fn test_tokenizer_mixed_list() {
        let input = r#"{"list":[true, false, null, 21, 33.0, 10.01e-1, -5]}"#;
        let expected = vec![
            TokenType::LeftBrace,
            string("list"),
            TokenType::Colon,
            TokenType::LeftBracket,
            TokenType::Bool(true),
            TokenType::Comma,
            TokenType::Bool(false),
            TokenType::Comma,
            TokenType::Null,
            TokenType::Comma,
            TokenType::Number(21.0),
            TokenType::Comma,
            TokenType::Number(33.0),
            TokenType::Comma,
            TokenType::Number(1.001),
            TokenType::Comma,
            TokenType::Number(-5.0),
            TokenType::RightBracket,
            TokenType::RightBrace,
        ];
        assert_eq!(kinds(input).unwrap(), expected);
    }

    #[test]
    fn test_tokenizer_comma_inside_string() {
        let expected = vec![
            TokenType::LeftBrace,
            string("key"),
            TokenType::Colon,
            string("a,b"),
            TokenType::RightBrace,
        ];
        assert_eq!(kinds(r#"{"key":"a,b"}"#).unwrap(), expected);
    }

    #[test]
    fn test_tokenizer_all_escapes() {
        let input = r#"["\" \\ \/ \b \f \n \r \t"]"#;
        let tokens = kinds(input).unwrap();
        assert_eq!(tokens[1], string("\" \\ / \u{0008} \u{000C} \n \r \t"));
    }

    #[test]
    fn test_tokenizer_backslash_pairing() {
        // An even run of backslashes does not escape the closing quote.
        let tokens = kinds(r#"["a\\", "b"]"#).unwrap();
        assert_eq!(tokens[1], string("a\\"));
        assert_eq!(tokens[3], string("b"));

        // An odd run does.
        let tokens = kinds(r#"["\\\"", "c"]"#).unwrap();
        assert_eq!(tokens[1], string("\\\""));
        assert_eq!(tokens[3], string("c"));
    }

    #[test]
    fn test_tokenizer_unicode_escapes() {
        let tokens = kinds(r#"["\u00e9\u00C9 \u1234", "x\u0041y"]"#).unwrap();
        assert_eq!(tokens[1], string("éÉ \u{1234}"));
        assert_eq!(tokens[3], string("xAy"));
    }

    #[test]
    fn test_tokenizer_surrogates_are_not_joined() {
        let tokens = kinds(r#"["\ud83d\ude00"]"#).unwrap();
        assert_eq!(tokens[1], string("\u{FFFD}\u{FFFD}"));
    }

    #[test]
    fn test_tokenizer_raw_unicode_in_string() {
        let tokens = kinds(r#"{"clé":"日本語 ✓"}"#).unwrap();
        assert_eq!(tokens[1], string("clé"));
        assert_eq!(tokens[3], string("日本語 ✓"));
    }

    #[test]
    fn test_tokenizer_whitespace_and_positions() {
        let tokens = tokenize("  {\n\t\"key\" \r\n : 123\n}\n").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::LeftBrace,
                string("key"),
                TokenType::Colon,
                TokenType::Number(123.0),
                TokenType::RightBrace,
            ]
        );
        assert_eq!(tokens[0].position, at(2, 1, 3));
        assert_eq!(tokens[1].position, at(5, 2, 2));
        assert_eq!(tokens[2].position, at(14, 3, 2));
        assert_eq!(tokens[4].position, at(20, 4, 1));
    }

    #[test]
    fn test_tokenizer_numbers() {
        let tokens = kinds("[0, -0, 0.5, -12.25, 1e5, 1E+2, 2.5e-3, 0e0]").unwrap();
        let numbers: Vec<f64> = tokens
            .into_iter()
            .filter_map(|t| match t {
                TokenType::Number(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![0.0, -0.0, 0.5, -12.25, 1e5, 100.0, 0.0025, 0.0]);
    }

    #[test]
    fn test_tokenizer_leading_zero() {
        let err = kinds(r#"{"key":05}"#).unwrap_err();
        assert_eq!(
            err,
            LexError::LeadingZero {
                position: at(7, 1, 8)
            }
        );
        assert!(matches!(kinds("[-01]"), Err(LexError::LeadingZero { .. })));
    }

    #[test]
    fn test_tokenizer_incomplete_numbers() {
        let err = kinds("[1.]").unwrap_err();
        assert!(matches!(err, LexError::InvalidNumber { ref literal, .. } if literal == "1."));

        let err = kinds("[1e+]").unwrap_err();
        assert!(matches!(err, LexError::InvalidNumber { ref literal, .. } if literal == "1e+"));

        let err = kinds("[-]").unwrap_err();
        assert!(matches!(err, LexError::UnexpectedCharacter { found: '-', .. }));

        let err = kinds("[.5]").unwrap_err();
        assert!(matches!(err, LexError::UnexpectedCharacter { found: '.', .. }));
    }

    #[test]
    fn test_tokenizer_rejects_out_of_range_numbers() {
        let err = kinds("[1e400]").unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidNumber {
                literal: "1e400".to_string(),
                position: at(1, 1, 2)
            }
        );
        let err = kinds("[0, -2.5E999]").unwrap_err();
        assert!(matches!(err, LexError::InvalidNumber { ref literal, .. } if literal == "-2.5E999"));

        // Underflow rounds to zero and stays valid.
        assert_eq!(kinds("[1e-400]").unwrap()[1], TokenType::Number(0.0));
        assert_eq!(kinds("[1.7976931348623157e308]").unwrap()[1], TokenType::Number(f64::MAX));
    }

    #[test]
    fn test_tokenizer_literals() {
        assert_eq!(
            kinds("[true,false,null]").unwrap(),
            vec![
                TokenType::LeftBracket,
                TokenType::Bool(true),
                TokenType::Comma,
                TokenType::Bool(false),
                TokenType::Comma,
                TokenType::Null,
                TokenType::RightBracket,
            ]
        );

        let err = kinds("[abcdefghijklmnop]").unwrap_err();
        assert_eq!(
            err,
            LexError::UnrecognizedLiteral {
                found: "abcdefghij".to_string(),
                position: at(1, 1, 2)
            }
        );

        let err = kinds("[True]").unwrap_err();
        assert!(matches!(err, LexError::UnrecognizedLiteral { ref found, .. } if found == "True]"));

        let err = kinds("[été]").unwrap_err();
        assert!(matches!(err, LexError::UnrecognizedLiteral { .. }));
    }

    #[test]
    fn test_tokenizer_string_errors() {
        let err = kinds(r#"["\x"]"#).unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidEscape {
                escape: 'x',
                position: at(2, 1, 3)
            }
        );

        let err = kinds(r#"["ab\u12G4"]"#).unwrap_err();
        assert_eq!(
            err,
            LexError::InvalidUnicodeEscape {
                sequence: "\\u12G4".to_string(),
                position: at(4, 1, 5)
            }
        );

        let err = kinds(r#"["abc]"#).unwrap_err();
        assert_eq!(
            err,
            LexError::UnterminatedString {
                position: at(1, 1, 2)
            }
        );

        let err = kinds("[\"a\nb\"]").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                found: '\n',
                position: at(3, 1, 4)
            }
        );
    }

    #[test]
    fn test_tokenizer_invalid_char() {
        let err = kinds("{\n  \"a\": ?}").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                found: '?',
                position: at(9, 2, 8)
            }
        );

        let err = kinds("[1, 2, §]").unwrap_err();
        assert!(matches!(err, LexError::UnexpectedCharacter { found: '§', .. }));
    }

    #[test]
    fn test_tokenizer_enclosure() {
        assert_eq!(
            kinds("").unwrap_err(),
            LexError::InvalidEnclosure {
                first: None,
                last: None
            }
        );
        assert_eq!(
            kinds("42").unwrap_err(),
            LexError::InvalidEnclosure {
                first: Some('4'),
                last: Some('2')
            }
        );
        assert_eq!(
            kinds("{]").unwrap_err(),
            LexError::InvalidEnclosure {
                first: Some('{'),
                last: Some(']')
            }
        );
        assert!(matches!(
            kinds("\"str\""),
            Err(LexError::InvalidEnclosure { .. })
        ));
        assert!(kinds(" \n[1]\n").is_ok());
    }

    #[test]
    fn test_tokenizer_input_limit() {
        let limits = Limits::default().with_max_input_size(4);
        let err = tokenize_with_limits("[1, 2]", limits).unwrap_err();
        assert_eq!(err, LexError::InputTooLarge { size: 6, limit: 4 });
        assert!(tokenize_with_limits("[1]", limits).is_ok());
    }

    #[test]
    fn test_tokenizer_is_deterministic() {
        let input = r#"{"a": [1, "two", {"three": null}], "b": -4.5e2}"#;
        assert_eq!(tokenize(input).unwrap(), tokenize(input).unwrap());
    }

    #[test]
    fn test_tokenizer_iterator_stops_after_error() {
        let mut tokenizer = Tokenizer::new("1 ? 2");
        assert!(matches!(tokenizer.next(), Some(Ok(_))));
        assert!(matches!(tokenizer.next(), Some(Err(_))));
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_tokenizer_iterator_tracks_positions() {
        let mut tokenizer = Tokenizer::new("[\n  true]");
        assert_eq!(tokenizer.location(), at(0, 1, 1));

        let open = tokenizer.next().unwrap().unwrap();
        assert_eq!(open.position, at(0, 1, 1));

        let literal = tokenizer.next().unwrap().unwrap();
        assert_eq!(literal.kind, TokenType::Bool(true));
        assert_eq!(literal.position, at(4, 2, 3));
        assert_eq!(tokenizer.location(), at(8, 2, 7));

        let close = tokenizer.next().unwrap().unwrap();
        assert_eq!(close.position, at(8, 2, 7));
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_tokenizer_iterator_skips_enclosure_check() {
        let tokens: Vec<_> = Tokenizer::new("\"bare\" 7")
            .map(|t| t.map(|t| t.kind))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(tokens, vec![string("bare"), TokenType::Number(7.0)]);
    }

    #[test]
    fn test_scan_number() {
        let text = "Σ json -1.234e-5x";
        assert_eq!(scan_number(text.as_bytes(), 8), Ok(text.len() - 1));
        assert_eq!(scan_number(b"120,", 0), Ok(3));
        assert_eq!(scan_number(b"0]", 0), Ok(1));
        assert_eq!(scan_number(b"012", 0), Err(NumberFault::LeadingZero));
        assert_eq!(scan_number(b"-a", 0), Err(NumberFault::MissingIntegerDigits));
        assert_eq!(scan_number(b"7.e3", 0), Err(NumberFault::MissingDigits { end: 2 }));
        assert_eq!(scan_number(b"7e-", 0), Err(NumberFault::MissingDigits { end: 3 }));
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(decode_escapes(r"plain"), "plain");
        assert_eq!(decode_escapes(r"a\nb\tc"), "a\nb\tc");
        assert_eq!(decode_escapes(r"\\\/\u0041"), "\\/A");
        assert_eq!(decode_escapes(r"\u00e9\u00E9"), "\u{e9}\u{e9}");
    }
}
