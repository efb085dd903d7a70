//! Filter expression AST and visitor contract.
//!
//! # Supported Syntax
//!
//! ## Attribute Operators
//! - `eq`, `ne` - Equal, not equal
//! - `co`, `sw`, `ew` - Contains, starts with, ends with
//! - `gt`, `ge`, `lt`, `le` - Ordering comparisons
//! - `pr` - Attribute has a value (takes no comparison value)
//!
//! Comparison values are JSON scalars: `"string"`, `42`, `4.2`, `true`,
//! `false`, `null`.
//!
//! ## Logical Operators
//! - `and` - AND (binds tighter than `or`)
//! - `or` - OR
//! - `not (...)` - NOT, always followed by a parenthesized group
//! - `()` - Grouping
//!
//! ## Complex Values
//! - `emails[type eq "work" and value co "@example.com"]` - at least one value
//!   of the multi-valued attribute matches the bracketed filter
//!
//! Keywords are case-insensitive.
//!
//! # Example
//!
//! ```
//! use scim_filter_rs::filter::{Filter, FilterType};
//!
//! let filter = Filter::parse("not (userName ew \"sen\")").unwrap();
//! assert_eq!(filter.filter_type(), FilterType::Not);
//! assert_eq!(filter.to_string(), "not(userName ew \"sen\")");
//! ```

mod ast;
mod visitor;

pub use ast::{
    CombiningFilter, ComparisonFilter, ComparisonOperator, ComplexValueFilter, Filter,
    FilterType, PresentFilter,
};
pub use visitor::FilterVisitor;
