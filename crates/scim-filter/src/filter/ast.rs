//! Abstract Syntax Tree (AST) for filter expressions.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FilterError, FilterResult};
use crate::parser;
use crate::path::Path;
use crate::value::ValueNode;

/// The attribute operators that take a comparison value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// `eq`
    Equal,
    /// `ne`
    NotEqual,
    /// `co`
    Contains,
    /// `sw`
    StartsWith,
    /// `ew`
    EndsWith,
    /// `gt`
    GreaterThan,
    /// `ge`
    GreaterOrEqual,
    /// `lt`
    LessThan,
    /// `le`
    LessOrEqual,
}

impl ComparisonOperator {
    /// Every comparison operator, in keyword-listing order.
    pub const ALL: [ComparisonOperator; 9] = [
        ComparisonOperator::Equal,
        ComparisonOperator::NotEqual,
        ComparisonOperator::Contains,
        ComparisonOperator::StartsWith,
        ComparisonOperator::EndsWith,
        ComparisonOperator::GreaterThan,
        ComparisonOperator::GreaterOrEqual,
        ComparisonOperator::LessThan,
        ComparisonOperator::LessOrEqual,
    ];

    /// The keyword used in filter text.
    pub fn keyword(self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "eq",
            ComparisonOperator::NotEqual => "ne",
            ComparisonOperator::Contains => "co",
            ComparisonOperator::StartsWith => "sw",
            ComparisonOperator::EndsWith => "ew",
            ComparisonOperator::GreaterThan => "gt",
            ComparisonOperator::GreaterOrEqual => "ge",
            ComparisonOperator::LessThan => "lt",
            ComparisonOperator::LessOrEqual => "le",
        }
    }

    /// Looks up an operator by keyword, ignoring case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.keyword().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The kind of a filter node, one per keyword of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    /// `eq`
    Equal,
    /// `ne`
    NotEqual,
    /// `co`
    Contains,
    /// `sw`
    StartsWith,
    /// `ew`
    EndsWith,
    /// `gt`
    GreaterThan,
    /// `ge`
    GreaterOrEqual,
    /// `lt`
    LessThan,
    /// `le`
    LessOrEqual,
    /// `pr`
    Present,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `attr[filter]`
    ComplexValue,
}

impl FilterType {
    /// The keyword naming this filter type.
    pub fn keyword(self) -> &'static str {
        match self {
            FilterType::Equal => "eq",
            FilterType::NotEqual => "ne",
            FilterType::Contains => "co",
            FilterType::StartsWith => "sw",
            FilterType::EndsWith => "ew",
            FilterType::GreaterThan => "gt",
            FilterType::GreaterOrEqual => "ge",
            FilterType::LessThan => "lt",
            FilterType::LessOrEqual => "le",
            FilterType::Present => "pr",
            FilterType::And => "and",
            FilterType::Or => "or",
            FilterType::Not => "not",
            FilterType::ComplexValue => "complex",
        }
    }
}

impl From<ComparisonOperator> for FilterType {
    fn from(op: ComparisonOperator) -> Self {
        match op {
            ComparisonOperator::Equal => FilterType::Equal,
            ComparisonOperator::NotEqual => FilterType::NotEqual,
            ComparisonOperator::Contains => FilterType::Contains,
            ComparisonOperator::StartsWith => FilterType::StartsWith,
            ComparisonOperator::EndsWith => FilterType::EndsWith,
            ComparisonOperator::GreaterThan => FilterType::GreaterThan,
            ComparisonOperator::GreaterOrEqual => FilterType::GreaterOrEqual,
            ComparisonOperator::LessThan => FilterType::LessThan,
            ComparisonOperator::LessOrEqual => FilterType::LessOrEqual,
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `attribute op value`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparisonFilter {
    operator: ComparisonOperator,
    attribute_path: Path,
    value: ValueNode,
}

impl ComparisonFilter {
    /// The comparison operator.
    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    /// The attribute being compared.
    pub fn attribute_path(&self) -> &Path {
        &self.attribute_path
    }

    /// The value compared against.
    pub fn value(&self) -> &ValueNode {
        &self.value
    }
}

/// `attribute pr`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PresentFilter {
    attribute_path: Path,
}

impl PresentFilter {
    /// The attribute that must have a value.
    pub fn attribute_path(&self) -> &Path {
        &self.attribute_path
    }
}

/// The operands of an `and` or `or` filter.
///
/// Two combining filters are equal when each operand of one is contained in
/// the other, so operand order and repetition do not matter.
#[derive(Debug, Clone)]
pub struct CombiningFilter {
    operands: Vec<Filter>,
}

impl CombiningFilter {
    fn new(operands: Vec<Filter>) -> FilterResult<Self> {
        if operands.len() < 2 {
            return Err(FilterError::TooFewOperands {
                count: operands.len(),
            });
        }
        Ok(Self { operands })
    }

    /// The operands, in the order they were written.
    pub fn operands(&self) -> &[Filter] {
        &self.operands
    }

    fn contains_all(&self, other: &CombiningFilter) -> bool {
        other.operands.iter().all(|f| self.operands.contains(f))
    }
}

impl PartialEq for CombiningFilter {
    fn eq(&self, other: &Self) -> bool {
        self.contains_all(other) && other.contains_all(self)
    }
}

impl Eq for CombiningFilter {}

impl Hash for CombiningFilter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equal operand sets must hash alike whatever their order or repetition.
        let mut hashes: Vec<u64> = self
            .operands
            .iter()
            .map(|operand| {
                let mut hasher = DefaultHasher::new();
                operand.hash(&mut hasher);
                hasher.finish()
            })
            .collect();
        hashes.sort_unstable();
        hashes.dedup();
        hashes.hash(state);
    }
}

/// `attribute[filter]`: true when a value of a multi-valued attribute matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplexValueFilter {
    attribute_path: Path,
    value_filter: Box<Filter>,
}

impl ComplexValueFilter {
    /// The multi-valued attribute.
    pub fn attribute_path(&self) -> &Path {
        &self.attribute_path
    }

    /// The filter applied to each value of the attribute.
    pub fn value_filter(&self) -> &Filter {
        &self.value_filter
    }
}

/// Represents a parsed filter expression.
///
/// Nodes are built through the factory functions (`Filter::eq`,
/// `Filter::and`, ...) or by parsing, and are immutable afterwards.
///
/// # Example
///
/// ```
/// use scim_filter_rs::{Filter, Path};
///
/// let filter: Filter = "title pr and userType eq \"Employee\"".parse().unwrap();
/// assert_eq!(
///     filter,
///     Filter::and(
///         Filter::pr(Path::attribute("title")),
///         Filter::eq(Path::attribute("userType"), "Employee"),
///     )
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter {
    /// A comparison between an attribute and a value.
    Comparison(ComparisonFilter),

    /// The attribute has a value.
    Present(PresentFilter),

    /// Every operand matches.
    And(CombiningFilter),

    /// At least one operand matches.
    Or(CombiningFilter),

    /// The operand does not match.
    Not(Box<Filter>),

    /// A value of a multi-valued attribute matches a nested filter.
    ComplexValue(ComplexValueFilter),
}

impl Filter {
    // ==================== Comparison factories ====================

    /// Creates a comparison filter.
    pub fn comparison(
        operator: ComparisonOperator,
        attribute_path: Path,
        value: impl Into<ValueNode>,
    ) -> Self {
        Filter::Comparison(ComparisonFilter {
            operator,
            attribute_path,
            value: value.into(),
        })
    }

    /// `attribute eq value`
    pub fn eq(attribute_path: Path, value: impl Into<ValueNode>) -> Self {
        Self::comparison(ComparisonOperator::Equal, attribute_path, value)
    }

    /// `attribute ne value`
    pub fn ne(attribute_path: Path, value: impl Into<ValueNode>) -> Self {
        Self::comparison(ComparisonOperator::NotEqual, attribute_path, value)
    }

    /// `attribute co value`
    pub fn co(attribute_path: Path, value: impl Into<ValueNode>) -> Self {
        Self::comparison(ComparisonOperator::Contains, attribute_path, value)
    }

    /// `attribute sw value`
    pub fn sw(attribute_path: Path, value: impl Into<ValueNode>) -> Self {
        Self::comparison(ComparisonOperator::StartsWith, attribute_path, value)
    }

    /// `attribute ew value`
    pub fn ew(attribute_path: Path, value: impl Into<ValueNode>) -> Self {
        Self::comparison(ComparisonOperator::EndsWith, attribute_path, value)
    }

    /// `attribute gt value`
    pub fn gt(attribute_path: Path, value: impl Into<ValueNode>) -> Self {
        Self::comparison(ComparisonOperator::GreaterThan, attribute_path, value)
    }

    /// `attribute ge value`
    pub fn ge(attribute_path: Path, value: impl Into<ValueNode>) -> Self {
        Self::comparison(ComparisonOperator::GreaterOrEqual, attribute_path, value)
    }

    /// `attribute lt value`
    pub fn lt(attribute_path: Path, value: impl Into<ValueNode>) -> Self {
        Self::comparison(ComparisonOperator::LessThan, attribute_path, value)
    }

    /// `attribute le value`
    pub fn le(attribute_path: Path, value: impl Into<ValueNode>) -> Self {
        Self::comparison(ComparisonOperator::LessOrEqual, attribute_path, value)
    }

    /// `attribute pr`
    pub fn pr(attribute_path: Path) -> Self {
        Filter::Present(PresentFilter { attribute_path })
    }

    // ==================== Logical factories ====================

    /// Creates an AND filter from two filters.
    pub fn and(left: Filter, right: Filter) -> Self {
        Filter::And(CombiningFilter {
            operands: vec![left, right],
        })
    }

    /// Creates an OR filter from two filters.
    pub fn or(left: Filter, right: Filter) -> Self {
        Filter::Or(CombiningFilter {
            operands: vec![left, right],
        })
    }

    /// Creates an AND filter over two or more operands.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::TooFewOperands` for fewer than two operands.
    pub fn and_all(operands: Vec<Filter>) -> FilterResult<Self> {
        CombiningFilter::new(operands).map(Filter::And)
    }

    /// Creates an OR filter over two or more operands.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::TooFewOperands` for fewer than two operands.
    pub fn or_all(operands: Vec<Filter>) -> FilterResult<Self> {
        CombiningFilter::new(operands).map(Filter::Or)
    }

    /// Creates a NOT filter from another filter.
    pub fn negate(inner: Filter) -> Self {
        Filter::Not(Box::new(inner))
    }

    /// Creates a complex value filter, `attribute[value_filter]`.
    pub fn complex_value(attribute_path: Path, value_filter: Filter) -> Self {
        Filter::ComplexValue(ComplexValueFilter {
            attribute_path,
            value_filter: Box::new(value_filter),
        })
    }

    /// Parses a filter string.
    pub fn parse(text: &str) -> FilterResult<Self> {
        parser::parse_filter(text)
    }

    // ==================== Accessors ====================

    /// The kind of this node.
    pub fn filter_type(&self) -> FilterType {
        match self {
            Filter::Comparison(c) => c.operator.into(),
            Filter::Present(_) => FilterType::Present,
            Filter::And(_) => FilterType::And,
            Filter::Or(_) => FilterType::Or,
            Filter::Not(_) => FilterType::Not,
            Filter::ComplexValue(_) => FilterType::ComplexValue,
        }
    }

    /// The attribute this filter applies to, for comparison, presence and
    /// complex value filters.
    pub fn attribute_path(&self) -> Option<&Path> {
        match self {
            Filter::Comparison(c) => Some(&c.attribute_path),
            Filter::Present(p) => Some(&p.attribute_path),
            Filter::ComplexValue(c) => Some(&c.attribute_path),
            Filter::And(_) | Filter::Or(_) | Filter::Not(_) => None,
        }
    }

    /// The comparison value, for comparison filters.
    pub fn comparison_value(&self) -> Option<&ValueNode> {
        match self {
            Filter::Comparison(c) => Some(&c.value),
            _ => None,
        }
    }

    /// The operands, for `and` and `or` filters.
    pub fn combined_filters(&self) -> Option<&[Filter]> {
        match self {
            Filter::And(c) | Filter::Or(c) => Some(c.operands()),
            _ => None,
        }
    }

    /// The negated filter, for `not` filters.
    pub fn inverted_filter(&self) -> Option<&Filter> {
        match self {
            Filter::Not(inner) => Some(inner),
            _ => None,
        }
    }

    /// The nested filter, for complex value filters.
    pub fn value_filter(&self) -> Option<&Filter> {
        match self {
            Filter::ComplexValue(c) => Some(&c.value_filter),
            _ => None,
        }
    }

    /// Returns true for the comparison filters (`eq` through `le`).
    pub fn is_comparison(&self) -> bool {
        matches!(self, Filter::Comparison(_))
    }

    /// Returns true for `and` and `or`.
    pub fn is_combining(&self) -> bool {
        matches!(self, Filter::And(_) | Filter::Or(_))
    }
}

fn write_combined(f: &mut fmt::Formatter<'_>, keyword: &str, operands: &[Filter]) -> fmt::Result {
    f.write_str("(")?;
    for (index, operand) in operands.iter().enumerate() {
        if index > 0 {
            write!(f, " {keyword} ")?;
        }
        write!(f, "{operand}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Filter {
    /// Writes the canonical filter text, which parses back to an equal filter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Comparison(c) => {
                write!(f, "{} {} {}", c.attribute_path, c.operator, c.value)
            }
            Filter::Present(p) => write!(f, "{} pr", p.attribute_path),
            Filter::And(c) => write_combined(f, "and", &c.operands),
            Filter::Or(c) => write_combined(f, "or", &c.operands),
            Filter::Not(inner) => write!(f, "not({inner})"),
            Filter::ComplexValue(c) => write!(f, "{}[{}]", c.attribute_path, c.value_filter),
        }
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::parse(s)
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Filter::parse(&text).map_err(serde::de::Error::custom)
    }
}
