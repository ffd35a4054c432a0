//! Defines the `Token` and `TokenType` types.
//!
//! These are the intermediate representation between the tokenizer and the
//! parser. A token sequence is produced once and then only read.

use crate::error::Position;
use std::fmt;

/// The specific type of a `Token`.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// A string with all escapes decoded and without its quotes.
    String(String),
    /// A number, e.g., `123.4`
    Number(f64),
    /// `true` or `false`
    Bool(bool),
    /// The `null` literal
    Null,
}

/// Short human-readable description, used in error messages.
impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::LeftBrace => f.write_str("'{'"),
            TokenType::RightBrace => f.write_str("'}'"),
            TokenType::LeftBracket => f.write_str("'['"),
            TokenType::RightBracket => f.write_str("']'"),
            TokenType::Colon => f.write_str("':'"),
            TokenType::Comma => f.write_str("','"),
            TokenType::String(s) => write!(f, "string {s:?}"),
            TokenType::Number(n) => write!(f, "number {n}"),
            TokenType::Bool(b) => write!(f, "{b}"),
            TokenType::Null => f.write_str("null"),
        }
    }
}

/// A single token produced by the tokenizer.
///
/// It pairs the `TokenType` with the location of its first character,
/// which the parser uses for error reporting.
#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    /// The type of the token.
    pub kind: TokenType,
    /// Where the token starts in the source text.
    pub position: Position,
}
