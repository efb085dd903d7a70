//! Operator-precedence reader for filter expressions.
//!
//! Filters are read left to right with an operand stack and an operator
//! stack. `and` binds tighter than `or`: pushing `or` first folds any run of
//! pending `and`s into a single AND filter, and closing a group folds the
//! remaining runs. Parenthesized and `not` groups live on the operator stack;
//! bracketed value filters are read by a nested reader over the same cursor.
//!
//! # Grammar
//!
//! ```text
//! filter     ::= term (("and" | "or") term)*
//! term       ::= "(" filter ")"
//!              | "not" "(" filter ")"
//!              | path "[" filter "]"
//!              | path "pr"
//!              | path op json-scalar
//! op         ::= "eq" | "ne" | "co" | "sw" | "ew" | "gt" | "ge" | "lt" | "le"
//! ```

use strsim::levenshtein;
use tracing::trace;

use super::cursor::Cursor;
use super::lexer::{read_filter_token, FilterMode, FilterToken, PositionedToken};
use super::path_reader::read_path;
use crate::error::{FilterError, FilterResult};
use crate::filter::{ComparisonOperator, Filter};
use crate::options::ParseOptions;
use crate::path::Path;
use crate::value::{scan_literal, ValueNode};

/// Maximum edit distance for suggesting an attribute operator.
const MAX_SUGGESTION_DISTANCE: usize = 1;

/// Entries of the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    OpenGroup,
    Not,
    And,
    Or,
}

impl Operator {
    fn opens_group(self) -> bool {
        matches!(self, Operator::OpenGroup | Operator::Not)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    And,
    Or,
}

/// Reads one filter, or one bracketed value filter, from a shared cursor.
///
/// Each reader owns its stacks; nested value filters get a fresh reader.
pub(crate) struct ExpressionReader<'a> {
    cursor: &'a mut Cursor,
    options: &'a ParseOptions,
    /// Position of the `[` token that opened this value filter, if any.
    bracket: Option<usize>,
    /// Nesting level of this reader.
    depth: usize,
    open_groups: usize,
    operands: Vec<Filter>,
    operators: Vec<Operator>,
}

impl<'a> ExpressionReader<'a> {
    /// A reader for top-level filter text.
    pub fn filter(cursor: &'a mut Cursor, options: &'a ParseOptions) -> Self {
        Self::new(cursor, options, None, 0)
    }

    fn new(
        cursor: &'a mut Cursor,
        options: &'a ParseOptions,
        bracket: Option<usize>,
        depth: usize,
    ) -> Self {
        Self {
            cursor,
            options,
            bracket,
            depth,
            open_groups: 0,
            operands: Vec::new(),
            operators: Vec::new(),
        }
    }

    fn mode(&self) -> FilterMode {
        if self.bracket.is_some() {
            FilterMode::ValueFilter
        } else {
            FilterMode::Filter
        }
    }

    fn nesting(&self) -> usize {
        self.depth + self.open_groups
    }

    fn next_token(&mut self) -> FilterResult<Option<PositionedToken>> {
        let mode = self.mode();
        read_filter_token(self.cursor, mode)
    }

    /// Reads until the end of input or, for a value filter, the closing `]`.
    pub fn read(mut self) -> FilterResult<Filter> {
        let mut expects_operand = true;
        let mut closed = false;

        while let Some(PositionedToken { token, position }) = self.next_token()? {
            trace!(token = %token, position, expects_operand, "filter token");

            match token {
                FilterToken::OpenParen if expects_operand => {
                    self.open_group(Operator::OpenGroup)?;
                }
                ref word if expects_operand && word.is_keyword("not") => {
                    match self.next_token()? {
                        None => return Err(FilterError::UnexpectedEndOfFilter),
                        Some(PositionedToken {
                            token: FilterToken::OpenParen,
                            ..
                        }) => {}
                        Some(other) => {
                            return Err(FilterError::OpenParenExpected {
                                position: other.position,
                            })
                        }
                    }
                    self.open_group(Operator::Not)?;
                }
                FilterToken::CloseParen if !expects_operand => {
                    match self.close_group(false)? {
                        Some(Operator::Not) => {
                            let inner = self.pop_operand()?;
                            self.operands.push(Filter::negate(inner));
                        }
                        Some(_) => {}
                        None => return Err(FilterError::UnmatchedCloseParen { position }),
                    }
                }
                ref word if !expects_operand && word.is_keyword("and") => {
                    self.operators.push(Operator::And);
                    expects_operand = true;
                }
                ref word if !expects_operand && word.is_keyword("or") => {
                    self.fold_pending_ands()?;
                    self.operators.push(Operator::Or);
                    expects_operand = true;
                }
                FilterToken::ValuePath(prefix) if expects_operand => {
                    let filter = self.read_complex_value(&prefix, position)?;
                    self.operands.push(filter);
                    expects_operand = false;
                }
                FilterToken::CloseBracket if !expects_operand => {
                    closed = true;
                    break;
                }
                FilterToken::Word(word) if expects_operand => {
                    let filter = self.read_attribute_filter(&word, position)?;
                    self.operands.push(filter);
                    expects_operand = false;
                }
                other => return Err(FilterError::unexpected_token(other.to_string(), position)),
            }
        }

        if let (Some(position), false) = (self.bracket, closed) {
            return Err(FilterError::UnclosedBracket { position });
        }

        self.close_group(true)?;
        self.pop_operand()
    }

    fn open_group(&mut self, operator: Operator) -> FilterResult<()> {
        if self.nesting() >= self.options.max_depth {
            return Err(FilterError::NestingTooDeep {
                max: self.options.max_depth,
            });
        }
        self.open_groups += 1;
        self.operators.push(operator);
        Ok(())
    }

    fn pop_operand(&mut self) -> FilterResult<Filter> {
        self.operands
            .pop()
            .ok_or(FilterError::UnexpectedEndOfFilter)
    }

    /// Replaces the operand under `members` with one combining filter.
    ///
    /// `members` holds the operands popped so far, most recent first; one
    /// more operand is taken from the stack to start the run.
    fn fold_run(&mut self, combinator: Combinator, mut members: Vec<Filter>) -> FilterResult<()> {
        members.push(self.pop_operand()?);
        members.reverse();
        let combined = match combinator {
            Combinator::And => Filter::and_all(members)?,
            Combinator::Or => Filter::or_all(members)?,
        };
        self.operands.push(combined);
        Ok(())
    }

    /// Folds the `and`s on top of the operator stack before an `or` is pushed.
    fn fold_pending_ands(&mut self) -> FilterResult<()> {
        let mut members = Vec::new();
        while self.operators.last() == Some(&Operator::And) {
            self.operators.pop();
            members.push(self.pop_operand()?);
        }
        if !members.is_empty() {
            self.fold_run(Combinator::And, members)?;
        }
        Ok(())
    }

    /// Pops operators down to the innermost group opener, folding runs of
    /// equal combinators into single filters.
    ///
    /// Returns the opener found, or `None` when the stack ran out. Finding an
    /// opener when `at_end` is set means a group was never closed.
    fn close_group(&mut self, at_end: bool) -> FilterResult<Option<Operator>> {
        let mut run: Option<(Combinator, Vec<Filter>)> = None;
        let mut boundary = None;

        while let Some(operator) = self.operators.pop() {
            let combinator = match operator {
                Operator::And => Combinator::And,
                Operator::Or => Combinator::Or,
                opener => {
                    debug_assert!(opener.opens_group());
                    if at_end {
                        return Err(FilterError::UnexpectedEndOfFilter);
                    }
                    self.open_groups -= 1;
                    boundary = Some(opener);
                    break;
                }
            };

            if matches!(run, Some((current, _)) if current == combinator) {
                let operand = self.pop_operand()?;
                if let Some((_, members)) = run.as_mut() {
                    members.push(operand);
                }
            } else {
                if let Some((current, members)) = run.take() {
                    self.fold_run(current, members)?;
                }
                run = Some((combinator, vec![self.pop_operand()?]));
            }
        }

        if let Some((current, members)) = run {
            self.fold_run(current, members)?;
        }
        Ok(boundary)
    }

    /// `path[filter]`, with the cursor just past the `[`.
    fn read_complex_value(&mut self, prefix: &str, position: usize) -> FilterResult<Filter> {
        if prefix.is_empty() {
            return Err(FilterError::AttributeNameExpected { position });
        }
        let attribute_path = self.parse_attribute_path(prefix, position)?;
        let value_filter = read_value_filter(self.cursor, self.options, self.nesting(), position)?;
        Ok(Filter::complex_value(attribute_path, value_filter))
    }

    /// `path pr` or `path op value`, with the path token already read.
    fn read_attribute_filter(&mut self, text: &str, position: usize) -> FilterResult<Filter> {
        let attribute_path = self.parse_attribute_path(text, position)?;

        let PositionedToken { token, position } = self
            .next_token()?
            .ok_or(FilterError::UnexpectedEndOfFilter)?;
        let keyword = match token {
            FilterToken::Word(keyword) => keyword,
            other => return Err(FilterError::unknown_operator(other.to_string(), position)),
        };

        if keyword.eq_ignore_ascii_case("pr") {
            return Ok(Filter::pr(attribute_path));
        }
        let operator = ComparisonOperator::from_keyword(&keyword).ok_or_else(|| {
            FilterError::UnknownOperator {
                suggestion: suggest_operator(&keyword),
                operator: keyword.clone(),
                position,
            }
        })?;
        let value = self.read_value()?;
        Ok(Filter::comparison(operator, attribute_path, value))
    }

    fn parse_attribute_path(&self, text: &str, position: usize) -> FilterResult<Path> {
        let mut cursor = Cursor::new(text);
        read_path(&mut cursor, self.options, self.nesting())
            .map_err(|e| FilterError::invalid_attribute_path(position, e))
    }

    /// Reads a JSON scalar and moves the cursor past it.
    ///
    /// The decoder reports how many characters it used; the cursor is reset
    /// to where decoding started and skips exactly that many.
    fn read_value(&mut self) -> FilterResult<ValueNode> {
        self.cursor.mark();
        let position = self.cursor.mark_position();
        let scanned = scan_literal(&self.cursor.remaining(), position)?;
        self.cursor.reset();

        let literal = scanned.ok_or(FilterError::UnexpectedEndOfFilter)?;
        self.cursor.skip(literal.consumed);
        Ok(literal.value)
    }
}

/// Reads the body of a `[...]` value filter, including the closing `]`.
///
/// `depth` is the nesting level of the caller and `opened_at` the position
/// of the token that ended in `[`.
pub(crate) fn read_value_filter(
    cursor: &mut Cursor,
    options: &ParseOptions,
    depth: usize,
    opened_at: usize,
) -> FilterResult<Filter> {
    if depth >= options.max_depth {
        return Err(FilterError::NestingTooDeep {
            max: options.max_depth,
        });
    }
    ExpressionReader::new(cursor, options, Some(opened_at), depth + 1).read()
}

fn suggest_operator(keyword: &str) -> Option<String> {
    let lower = keyword.to_ascii_lowercase();
    ComparisonOperator::ALL
        .iter()
        .map(|op| op.keyword())
        .chain(["pr"])
        .map(|candidate| (candidate, levenshtein(&lower, candidate)))
        .filter(|(_, distance)| *distance > 0 && *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate.to_string())
}
