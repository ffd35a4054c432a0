//! Error types for the tokenizer and the parser.
//!
//! Every error carries a [`Position`] so that callers can point the user at
//! the offending character. All errors are terminal: the first violation
//! aborts the whole operation and no partial tree is returned.

use std::fmt;
use thiserror::Error;

/// A location in the source text.
///
/// `offset` is a byte offset. `line` and `column` are 1-indexed, with the
/// column counted in bytes from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// The line number (1-indexed).
    pub line: usize,
    /// The column number (1-indexed).
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors raised while turning raw text into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// The document is not wrapped in a matching `{}` or `[]` pair.
    #[error(
        "document must begin and end with matching braces or brackets (start={}, end={})",
        edge_char(.first),
        edge_char(.last)
    )]
    InvalidEnclosure {
        /// First non-whitespace character, if any.
        first: Option<char>,
        /// Last non-whitespace character, if any.
        last: Option<char>,
    },

    /// A backslash followed by a character that is not a JSON escape.
    #[error("invalid escape sequence '\\{escape}' at {position}")]
    InvalidEscape {
        /// The character following the backslash.
        escape: char,
        /// Location of the backslash.
        position: Position,
    },

    /// A `\u` escape not followed by four hex digits.
    #[error("invalid unicode escape '{sequence}' at {position}")]
    InvalidUnicodeEscape {
        /// The escape as written, truncated to six characters.
        sequence: String,
        /// Location of the backslash.
        position: Position,
    },

    /// A bare word that is not `true`, `false` or `null`.
    #[error("unrecognized literal '{found}' at {position}, strings must be quoted")]
    UnrecognizedLiteral {
        /// Up to ten characters starting at the word.
        found: String,
        /// Location of the first character.
        position: Position,
    },

    /// A number whose integer part starts with `0` followed by another digit.
    #[error("numbers cannot have leading zeros at {position}")]
    LeadingZero {
        /// Location of the number.
        position: Position,
    },

    /// A number with a `.` or exponent marker but no digits after it, or
    /// one too large for `f64`.
    #[error("invalid number '{literal}' at {position}")]
    InvalidNumber {
        /// The text scanned so far.
        literal: String,
        /// Location of the number.
        position: Position,
    },

    /// A string literal that runs to the end of the input.
    #[error("unterminated string starting at {position}")]
    UnterminatedString {
        /// Location of the opening quote.
        position: Position,
    },

    /// Any character that cannot start a token, or a raw control character
    /// inside a string.
    #[error("unexpected character {found:?} at {position}")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// Its location.
        position: Position,
    },

    /// The input exceeds the configured size budget.
    #[error("input of {size} bytes exceeds the limit of {limit} bytes")]
    InputTooLarge {
        /// Input size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}

impl LexError {
    /// Location of the error, when it refers to a single place in the input.
    pub fn position(&self) -> Option<Position> {
        match self {
            LexError::InvalidEscape { position, .. }
            | LexError::InvalidUnicodeEscape { position, .. }
            | LexError::UnrecognizedLiteral { position, .. }
            | LexError::LeadingZero { position }
            | LexError::InvalidNumber { position, .. }
            | LexError::UnterminatedString { position }
            | LexError::UnexpectedCharacter { position, .. } => Some(*position),
            LexError::InvalidEnclosure { .. } | LexError::InputTooLarge { .. } => None,
        }
    }
}

fn edge_char(c: &Option<char>) -> String {
    match c {
        Some(c) => format!("{c:?}"),
        None => "<empty>".to_string(),
    }
}

/// Errors raised while building a value tree from tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The token sequence does not start with `{` or `[`.
    #[error("document root must be an object or array, found {found}")]
    InvalidRoot {
        /// Description of the first token.
        found: String,
        /// Its location, `None` for an empty token sequence.
        position: Option<Position>,
    },

    /// A value appeared where an object key was expected.
    #[error("expected a string key but found {found} at {position}")]
    MissingKey {
        /// Description of the token found.
        found: String,
        /// Its location.
        position: Position,
    },

    /// A comma followed by a closer or by another comma.
    #[error("trailing comma at {position}")]
    TrailingComma {
        /// Location of the comma.
        position: Position,
    },

    /// The tokens ran out before the container was closed.
    #[error("unterminated structure: '{opener}' opened at {position} is never closed")]
    UnterminatedStructure {
        /// `{` or `[`.
        opener: char,
        /// Location of the opening token.
        position: Position,
    },

    /// Nesting exceeds the configured depth budget.
    #[error("maximum nesting depth of {limit} exceeded at {position}")]
    TooDeep {
        /// Configured depth limit.
        limit: usize,
        /// Location of the container that crossed the limit.
        position: Position,
    },

    /// Any other token out of place.
    #[error("expected {expected} but found {found} at {position}")]
    UnexpectedToken {
        /// Description of the token found.
        found: String,
        /// What the grammar allows at this point.
        expected: &'static str,
        /// Its location.
        position: Position,
    },

    /// Tokens left over after the root container closed.
    #[error("unexpected {found} after the end of the document at {position}")]
    TrailingTokens {
        /// Description of the first extra token.
        found: String,
        /// Its location.
        position: Position,
    },
}

impl ParseError {
    /// Location of the token that triggered the error.
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::InvalidRoot { position, .. } => *position,
            ParseError::MissingKey { position, .. }
            | ParseError::TrailingComma { position }
            | ParseError::UnterminatedStructure { position, .. }
            | ParseError::TooDeep { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::TrailingTokens { position, .. } => Some(*position),
        }
    }
}

/// Either stage's error, returned by the one-shot text-to-value helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The text could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The tokens do not form a valid document.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// Location of the error, if it has one.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lex(e) => e.position(),
            Error::Parse(e) => e.position(),
        }
    }
}
