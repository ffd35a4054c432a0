//! The recursive-descent parser.
//!
//! Two mutually recursive procedures, [`Parser::parse_object`] and
//! [`Parser::parse_array`], walk a read-only token slice. Each takes the index
//! just past its opening token and returns the index just past its closing
//! token together with the finished value, so the cursor is always threaded
//! through arguments and return values rather than shared state.

use crate::error::{ParseError, Position};
use crate::limits::Limits;
use crate::token::{Token, TokenType};
use crate::value::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Parses a token sequence produced by [`tokenize`](crate::tokenize) with
/// the default [`Limits`].
///
/// # Errors
/// Returns the first structural violation as a [`ParseError`].
///
/// # Examples
/// ```
/// use json_tree::{parse, tokenize, Value};
///
/// let tokens = tokenize("[1, 2, 3]").unwrap();
/// let value = parse(&tokens).unwrap();
/// assert_eq!(
///     value,
///     Value::Array(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)])
/// );
/// ```
pub fn parse(tokens: &[Token]) -> Result<Value, ParseError> {
    parse_with_limits(tokens, Limits::default())
}

/// Parses a token sequence, failing with [`ParseError::TooDeep`] once
/// nesting exceeds `limits.max_nesting_depth`.
pub fn parse_with_limits(tokens: &[Token], limits: Limits) -> Result<Value, ParseError> {
    Parser::new(tokens, limits).parse()
}

/// A parser over a borrowed token slice.
///
/// It holds no cursor of its own, so one `Parser` can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'t> {
    tokens: &'t [Token],
    limits: Limits,
}

impl<'t> Parser<'t> {
    /// Creates a parser. A nesting budget above
    /// [`MAX_SUPPORTED_DEPTH`](crate::limits::MAX_SUPPORTED_DEPTH) is clamped
    /// to it, however `limits` was built.
    pub fn new(tokens: &'t [Token], limits: Limits) -> Self {
        let limits = limits.with_max_depth(limits.max_nesting_depth);
        Parser { tokens, limits }
    }

    /// Parses the whole sequence, which must hold exactly one root object
    /// or array.
    pub fn parse(&self) -> Result<Value, ParseError> {
        debug!(tokens = self.tokens.len(), "parsing token sequence");

        let (end, root) = match self.tokens.first() {
            Some(Token {
                kind: TokenType::LeftBrace,
                position,
            }) => self.parse_object(1, 1, *position)?,
            Some(Token {
                kind: TokenType::LeftBracket,
                position,
            }) => self.parse_array(1, 1, *position)?,
            Some(token) => {
                return Err(ParseError::InvalidRoot {
                    found: token.kind.to_string(),
                    position: Some(token.position),
                })
            }
            None => {
                return Err(ParseError::InvalidRoot {
                    found: "end of input".to_string(),
                    position: None,
                })
            }
        };

        if let Some(extra) = self.tokens.get(end) {
            return Err(ParseError::TrailingTokens {
                found: extra.kind.to_string(),
                position: extra.position,
            });
        }

        debug!(root = root.type_name(), "parsed document");
        Ok(root)
    }

    /// Parses object members starting at `start`, the index just past `{`.
    ///
    /// `depth` counts this object; `opened_at` is where its `{` sits.
    /// Returns the index one past the matching `}`.
    pub fn parse_object(
        &self,
        start: usize,
        depth: usize,
        opened_at: Position,
    ) -> Result<(usize, Value), ParseError> {
        self.check_depth(depth, opened_at)?;
        let mut members = BTreeMap::new();

        if self.token_at(start, '{', opened_at)?.kind == TokenType::RightBrace {
            return Ok((start + 1, Value::Object(members)));
        }

        let mut index = start;
        let mut after_comma: Option<Position> = None;
        loop {
            let token = self.token_at(index, '{', opened_at)?;
            let key = match (&token.kind, after_comma) {
                (TokenType::String(key), _) => key.clone(),
                (TokenType::Comma | TokenType::RightBrace, Some(comma)) => {
                    return Err(ParseError::TrailingComma { position: comma })
                }
                (TokenType::Comma | TokenType::RightBrace | TokenType::RightBracket, _) => {
                    return Err(unexpected(token, "a string key"))
                }
                (_, _) => {
                    return Err(ParseError::MissingKey {
                        found: token.kind.to_string(),
                        position: token.position,
                    })
                }
            };

            let colon = self.token_at(index + 1, '{', opened_at)?;
            if colon.kind != TokenType::Colon {
                return Err(unexpected(colon, "':' after an object key"));
            }

            let (next, value) = self.parse_value(index + 2, depth, '{', opened_at)?;
            // Last write wins for repeated keys.
            members.insert(key, value);

            let separator = self.token_at(next, '{', opened_at)?;
            match separator.kind {
                TokenType::Comma => {
                    after_comma = Some(separator.position);
                    index = next + 1;
                }
                TokenType::RightBrace => {
                    trace!(members = members.len(), depth, "closed object");
                    return Ok((next + 1, Value::Object(members)));
                }
                _ => return Err(unexpected(separator, "',' or '}'")),
            }
        }
    }

    /// Parses array elements starting at `start`, the index just past `[`.
    ///
    /// Returns the index one past the matching `]`.
    pub fn parse_array(
        &self,
        start: usize,
        depth: usize,
        opened_at: Position,
    ) -> Result<(usize, Value), ParseError> {
        self.check_depth(depth, opened_at)?;
        let mut items = Vec::new();

        if self.token_at(start, '[', opened_at)?.kind == TokenType::RightBracket {
            return Ok((start + 1, Value::Array(items)));
        }

        let mut index = start;
        let mut after_comma: Option<Position> = None;
        loop {
            if let Some(comma) = after_comma {
                let token = self.token_at(index, '[', opened_at)?;
                if matches!(token.kind, TokenType::Comma | TokenType::RightBracket) {
                    return Err(ParseError::TrailingComma { position: comma });
                }
            }

            let (next, value) = self.parse_value(index, depth, '[', opened_at)?;
            items.push(value);

            let separator = self.token_at(next, '[', opened_at)?;
            match separator.kind {
                TokenType::Comma => {
                    after_comma = Some(separator.position);
                    index = next + 1;
                }
                TokenType::RightBracket => {
                    trace!(items = items.len(), depth, "closed array");
                    return Ok((next + 1, Value::Array(items)));
                }
                _ => return Err(unexpected(separator, "',' or ']'")),
            }
        }
    }

    /// Parses one value at `index` inside a container at `depth`.
    fn parse_value(
        &self,
        index: usize,
        depth: usize,
        opener: char,
        opened_at: Position,
    ) -> Result<(usize, Value), ParseError> {
        let token = self.token_at(index, opener, opened_at)?;
        let value = match &token.kind {
            TokenType::LeftBrace => {
                return self.parse_object(index + 1, depth + 1, token.position)
            }
            TokenType::LeftBracket => {
                return self.parse_array(index + 1, depth + 1, token.position)
            }
            TokenType::String(s) => Value::String(s.clone()),
            TokenType::Number(n) => Value::Number(*n),
            TokenType::Bool(b) => Value::Bool(*b),
            TokenType::Null => Value::Null,
            TokenType::RightBrace
            | TokenType::RightBracket
            | TokenType::Colon
            | TokenType::Comma => return Err(unexpected(token, "a value")),
        };
        Ok((index + 1, value))
    }

    fn token_at(
        &self,
        index: usize,
        opener: char,
        opened_at: Position,
    ) -> Result<&'t Token, ParseError> {
        self.tokens
            .get(index)
            .ok_or(ParseError::UnterminatedStructure {
                opener,
                position: opened_at,
            })
    }

    fn check_depth(&self, depth: usize, opened_at: Position) -> Result<(), ParseError> {
        if depth > self.limits.max_nesting_depth {
            debug!(
                depth,
                limit = self.limits.max_nesting_depth,
                "nesting limit exceeded"
            );
            return Err(ParseError::TooDeep {
                limit: self.limits.max_nesting_depth,
                position: opened_at,
            });
        }
        Ok(())
    }
}

fn unexpected(token: &Token, expected: &'static str) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.kind.to_string(),
        expected,
        position: token.position,
    }
}
