//! Filter and path parsing.
//!
//! Parsing is a single left-to-right pass over a [`Cursor`]. The tokenizer
//! reads one token at a time, the expression reader arranges them by
//! precedence, and comparison values are handed to the JSON decoder directly
//! from the cursor.
//!
//! Error positions are character offsets into the original input.

mod cursor;
mod expression;
mod lexer;
mod path_reader;


use tracing::debug;

use crate::error::{FilterError, FilterResult};
use crate::filter::Filter;
use crate::options::ParseOptions;
use crate::path::Path;
use cursor::Cursor;
use expression::ExpressionReader;

/// Parses filters and paths under a set of [`ParseOptions`].
#[derive(Debug, Clone, Default)]
pub struct FilterParser {
    options: ParseOptions,
}

impl FilterParser {
    /// Creates a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// The options this parser applies.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses a filter expression.
    ///
    /// # Example
    ///
    /// ```
    /// use scim_filter_rs::{Filter, FilterParser, Path};
    ///
    /// let parser = FilterParser::new();
    /// let filter = parser.parse_filter("title pr and userType eq \"Employee\"").unwrap();
    /// assert_eq!(
    ///     filter,
    ///     Filter::and(
    ///         Filter::pr(Path::attribute("title")),
    ///         Filter::eq(Path::attribute("userType"), "Employee"),
    ///     )
    /// );
    /// ```
    pub fn parse_filter(&self, input: &str) -> FilterResult<Filter> {
        debug!(input, "parsing filter");
        let mut cursor = self.open(input)?;
        let result = ExpressionReader::filter(&mut cursor, &self.options).read();
        match &result {
            Ok(filter) => debug!(filter = %filter, "parsed filter"),
            Err(e) => debug!(error = %e, "filter rejected"),
        }
        result
    }

    /// Parses an attribute path.
    ///
    /// Empty input yields the root path.
    pub fn parse_path(&self, input: &str) -> FilterResult<Path> {
        debug!(input, "parsing path");
        let mut cursor = self.open(input)?;
        let result = path_reader::read_path(&mut cursor, &self.options, 0);
        match &result {
            Ok(path) => debug!(path = %path, "parsed path"),
            Err(e) => debug!(error = %e, "path rejected"),
        }
        result
    }

    /// Checks the length limit and positions a cursor past leading whitespace.
    fn open(&self, input: &str) -> FilterResult<Cursor> {
        if let Some(max) = self.options.max_length {
            let length = input.chars().count();
            if length > max {
                return Err(FilterError::InputTooLong { length, max });
            }
        }

        let trimmed = input.trim_end();
        let leading = trimmed.chars().take_while(|c| c.is_whitespace()).count();
        let mut cursor = Cursor::new(trimmed);
        cursor.skip(leading);
        Ok(cursor)
    }
}

/// Parses a filter expression with default options.
pub fn parse_filter(input: &str) -> FilterResult<Filter> {
    FilterParser::default().parse_filter(input)
}

/// Parses an attribute path with default options.
pub fn parse_path(input: &str) -> FilterResult<Path> {
    FilterParser::default().parse_path(input)
}
