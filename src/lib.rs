//! # json-tree
//!
//! `json-tree` is a from-scratch JSON tokenizer and recursive-descent parser
//! that turns a complete JSON document into an owned [`Value`] tree.
//!
//! Processing happens in two strictly separated stages:
//!
//! * [`tokenize`] scans the text once, left to right, and produces a flat
//!   `Vec<Token>`. It owns every character-level rule: string escapes,
//!   `\uXXXX` decoding, and the number grammar (no leading zeros, optional
//!   fraction and exponent).
//! * [`parse`] walks that token slice with two mutually recursive procedures,
//!   one for objects and one for arrays, and builds the tree. It owns every
//!   structural rule: key/value pairing, commas, balancing, depth.
//!
//! Neither stage keeps state between calls, so independent documents can be
//! processed on as many threads as you like.
//!
//! ## Quick Start
//!
//! ```
//! use json_tree::{parse, tokenize, Value};
//!
//! let tokens = tokenize(r#"{ "name": "Babbage", "ids": [18, 15] }"#).unwrap();
//! let value = parse(&tokens).unwrap();
//!
//! assert_eq!(value["name"].as_str(), Some("Babbage"));
//! assert_eq!(value["ids"][1].as_f64(), Some(15.0));
//!
//! // Or both stages at once:
//! let same = Value::parse(r#"{ "name": "Babbage", "ids": [18, 15] }"#).unwrap();
//! assert_eq!(value, same);
//! ```
//!
//! ## Restrictions
//!
//! The document root must be an object or an array; bare scalars and empty
//! input are rejected. Nesting is bounded by [`Limits::max_nesting_depth`],
//! and input size by [`Limits::max_input_size`].

/// Contains `LexError`, `ParseError`, `Error` and `Position`.
pub mod error;
/// Contains the `Limits` budget and its defaults.
pub mod limits;
/// Contains the recursive-descent `Parser`.
pub mod parser;
/// Contains the `Token` and `TokenType` types.
pub mod token;
/// Contains the `Value` tree.
pub mod value;

/// The byte-based tokenizer (lexer).
mod tokenizer;

pub use error::{Error, LexError, ParseError, Position};
pub use limits::{Limits, DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT_SIZE, MAX_SUPPORTED_DEPTH};
pub use parser::{parse, parse_with_limits, Parser};
pub use token::{Token, TokenType};
pub use tokenizer::{scan_number, tokenize, tokenize_with_limits, NumberFault, Tokenizer};
pub use value::Value;

/// Tokenizes and parses `text` in one call. Same as [`Value::parse`].
pub fn from_str(text: &str) -> Result<Value, Error> {
    Value::parse(text)
}
