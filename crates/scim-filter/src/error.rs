//! Error types for path and filter parsing.

use thiserror::Error;

/// A specialized Result type for filter and path operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while parsing or building filters and paths.
///
/// Positions are 0-based character offsets into the string handed to the
/// parser.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A character that is not allowed in the current token.
    #[error(
        "unexpected character '{character}' at position {position} for token starting at {token_start}"
    )]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Where the character was found.
        position: usize,
        /// Where the token being built started.
        token_start: usize,
    },

    /// The filter string ended while more input was required.
    #[error("unexpected end of filter string")]
    UnexpectedEndOfFilter,

    /// The path string ended while more input was required.
    #[error("unexpected end of path string")]
    UnexpectedEndOfPath,

    /// An attribute name was required but none was given.
    #[error("attribute name expected at position {position}")]
    AttributeNameExpected {
        /// Where the name was expected.
        position: usize,
    },

    /// `not` must be followed by an opening parenthesis.
    #[error("expected '(' at position {position}")]
    OpenParenExpected {
        /// Position of the token found instead.
        position: usize,
    },

    /// A closing parenthesis without a matching opening one.
    #[error("no opening parenthesis matching closing parenthesis at position {position}")]
    UnmatchedCloseParen {
        /// Position of the closing parenthesis.
        position: usize,
    },

    /// A value filter was opened with `[` and never closed.
    #[error("missing ']' for value filter opened at position {position}")]
    UnclosedBracket {
        /// Position of the token that opened the value filter.
        position: usize,
    },

    /// A token that is not valid at this point of the expression.
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// The token text.
        token: String,
        /// Where the token started.
        position: usize,
    },

    /// An attribute operator keyword that is not one of the known ones.
    #[error(
        "unrecognized attribute operator '{operator}' at position {position}. Expected: eq,ne,co,sw,ew,pr,gt,ge,lt,le{}",
        suggestion_suffix(.suggestion)
    )]
    UnknownOperator {
        /// The keyword that was found.
        operator: String,
        /// Where the keyword started.
        position: usize,
        /// A close valid keyword, if there is one.
        suggestion: Option<String>,
    },

    /// The comparison value is not a valid JSON scalar.
    #[error("invalid comparison value at position {position}: {message}")]
    InvalidValue {
        /// Where the value started.
        position: usize,
        /// What the JSON decoder reported.
        message: String,
    },

    /// An attribute path inside a filter could not be parsed.
    #[error("invalid attribute path at position {position}: {source}")]
    InvalidAttributePath {
        /// Where the attribute path token started.
        position: usize,
        /// The error raised while parsing the path.
        source: Box<FilterError>,
    },

    /// A combining filter was built with fewer than two operands.
    #[error("a combining filter needs at least 2 operands, got {count}")]
    TooFewOperands {
        /// The number of operands supplied.
        count: usize,
    },

    /// The input is longer than the configured limit.
    #[error("input is {length} characters long, the limit is {max}")]
    InputTooLong {
        /// Length of the input in characters.
        length: usize,
        /// The configured maximum.
        max: usize,
    },

    /// Groups or value filters are nested deeper than the configured limit.
    #[error("filter nesting exceeds the maximum depth of {max}")]
    NestingTooDeep {
        /// The configured maximum.
        max: usize,
    },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(keyword) => format!(". Did you mean '{keyword}'?"),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates an unexpected character error.
    pub fn unexpected_character(character: char, position: usize, token_start: usize) -> Self {
        FilterError::UnexpectedCharacter {
            character,
            position,
            token_start,
        }
    }

    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>, position: usize) -> Self {
        FilterError::UnexpectedToken {
            token: token.into(),
            position,
        }
    }

    /// Creates an unknown operator error without a suggestion.
    pub fn unknown_operator(operator: impl Into<String>, position: usize) -> Self {
        FilterError::UnknownOperator {
            operator: operator.into(),
            position,
            suggestion: None,
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(position: usize, message: impl Into<String>) -> Self {
        FilterError::InvalidValue {
            position,
            message: message.into(),
        }
    }

    /// Wraps an error raised while parsing an attribute path token.
    pub fn invalid_attribute_path(position: usize, source: FilterError) -> Self {
        FilterError::InvalidAttributePath {
            position,
            source: Box::new(source),
        }
    }

    /// Returns the character offset the error refers to, when known.
    pub fn position(&self) -> Option<usize> {
        match self {
            FilterError::UnexpectedCharacter { position, .. }
            | FilterError::AttributeNameExpected { position }
            | FilterError::OpenParenExpected { position }
            | FilterError::UnmatchedCloseParen { position }
            | FilterError::UnclosedBracket { position }
            | FilterError::UnexpectedToken { position, .. }
            | FilterError::UnknownOperator { position, .. }
            | FilterError::InvalidValue { position, .. }
            | FilterError::InvalidAttributePath { position, .. } => Some(*position),
            FilterError::UnexpectedEndOfFilter
            | FilterError::UnexpectedEndOfPath
            | FilterError::TooFewOperands { .. }
            | FilterError::InputTooLong { .. }
            | FilterError::NestingTooDeep { .. } => None,
        }
    }
}
