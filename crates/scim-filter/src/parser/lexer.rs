//! Tokenizer for paths and filter expressions.
//!
//! Tokens are read on demand from a shared [`Cursor`], because the filter
//! reader hands the same cursor to the JSON literal decoder between tokens.

use std::fmt;

use super::cursor::Cursor;
use crate::error::{FilterError, FilterResult};

/// Which closing characters end a filter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilterMode {
    /// Top-level filter text.
    Filter,
    /// The body of a `[...]` value filter, where `]` closes the body.
    ValueFilter,
}

/// A token in a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterToken {
    /// Opening parenthesis `(`.
    OpenParen,

    /// Closing parenthesis `)`.
    CloseParen,

    /// Closing bracket `]`, only produced inside a value filter.
    CloseBracket,

    /// An attribute path, logical keyword or attribute operator.
    Word(String),

    /// An attribute path followed by `[` (the bracket is not included).
    ValuePath(String),
}

impl FilterToken {
    /// Returns true when this is the given keyword, ignoring case.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, FilterToken::Word(word) if word.eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterToken::OpenParen => f.write_str("("),
            FilterToken::CloseParen => f.write_str(")"),
            FilterToken::CloseBracket => f.write_str("]"),
            FilterToken::Word(word) => f.write_str(word),
            FilterToken::ValuePath(path) => write!(f, "{path}["),
        }
    }
}

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PositionedToken {
    /// The token.
    pub token: FilterToken,
    /// The character offset where the token starts.
    pub position: usize,
}

/// A path element name as read from a path string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathToken {
    /// The name, possibly URN-prefixed, possibly empty.
    pub name: String,
    /// True when the name was terminated by `[`.
    pub opens_filter: bool,
    /// The character offset where the token starts.
    pub position: usize,
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ':')
}

fn is_filter_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')
}

/// Reads the next path token.
///
/// A token ends at `.` (consumed, unless the name so far ends in `:`), at `[`
/// (consumed, flagged in `opens_filter`) or at the end of input. Returns
/// `None` at the end of input when nothing was read.
pub(crate) fn read_path_token(cursor: &mut Cursor) -> FilterResult<Option<PathToken>> {
    cursor.mark();
    let position = cursor.mark_position();
    let mut name = String::new();

    while let Some(c) = cursor.read() {
        if c == '.' && !name.ends_with(':') {
            if cursor.is_at_end() {
                return Err(FilterError::UnexpectedEndOfPath);
            }
            return Ok(Some(PathToken {
                name,
                opens_filter: false,
                position,
            }));
        }
        if c == '[' {
            return Ok(Some(PathToken {
                name,
                opens_filter: true,
                position,
            }));
        }
        if !is_path_char(c) {
            return Err(FilterError::unexpected_character(
                c,
                cursor.position() - 1,
                position,
            ));
        }
        name.push(c);
    }

    if name.is_empty() {
        return Ok(None);
    }
    Ok(Some(PathToken {
        name,
        opens_filter: false,
        position,
    }))
}

/// Reads the next filter token.
///
/// Leading spaces are skipped. A space ends a token and is consumed. `(`,
/// `)` and, in a value filter, `]` end a token without being consumed, or
/// are returned as the token themselves when nothing precedes them. `[` ends
/// a token and is consumed. Returns `None` at the end of input.
pub(crate) fn read_filter_token(
    cursor: &mut Cursor,
    mode: FilterMode,
) -> FilterResult<Option<PositionedToken>> {
    let mut next = loop {
        cursor.mark();
        match cursor.read() {
            Some(' ') => continue,
            other => break other,
        }
    };
    let position = cursor.mark_position();
    let mut word = String::new();

    while let Some(c) = next {
        let closing = match c {
            '(' => Some(FilterToken::OpenParen),
            ')' => Some(FilterToken::CloseParen),
            ']' if mode == FilterMode::ValueFilter => Some(FilterToken::CloseBracket),
            _ => None,
        };
        if let Some(closing) = closing {
            let token = if word.is_empty() {
                closing
            } else {
                cursor.unread();
                FilterToken::Word(word)
            };
            return Ok(Some(PositionedToken { token, position }));
        }

        match c {
            ' ' => {
                return Ok(Some(PositionedToken {
                    token: FilterToken::Word(word),
                    position,
                }))
            }
            '[' => {
                return Ok(Some(PositionedToken {
                    token: FilterToken::ValuePath(word),
                    position,
                }))
            }
            c if is_filter_char(c) => word.push(c),
            c => {
                return Err(FilterError::unexpected_character(
                    c,
                    cursor.position() - 1,
                    position,
                ))
            }
        }
        next = cursor.read();
    }

    if word.is_empty() {
        return Ok(None);
    }
    Ok(Some(PositionedToken {
        token: FilterToken::Word(word),
        position,
    }))
}
