//! Parser for SCIM attribute paths and filter expressions.
//!
//! Turns strings such as `emails[type eq "work"].value` or
//! `title pr and (userType eq "Employee" or userType eq "Intern")` into typed
//! trees ([`Path`] and [`Filter`]) that can be inspected, compared, walked
//! with a [`FilterVisitor`] and written back as canonical text.
//!
//! # Example
//!
//! ```
//! use scim_filter_rs::{parse_filter, Filter, FilterType, Path};
//!
//! let filter = parse_filter("userName eq \"bjensen\" or name.familyName sw \"J\"").unwrap();
//! assert_eq!(filter.filter_type(), FilterType::Or);
//! assert_eq!(
//!     filter,
//!     Filter::or(
//!         Filter::sw(Path::attribute("name").sub("familyName"), "J"),
//!         Filter::eq(Path::attribute("userName"), "bjensen"),
//!     )
//! );
//! ```

pub mod error;
pub mod filter;
pub mod options;
pub mod parser;
pub mod path;
pub mod value;

pub use error::{FilterError, FilterResult};
pub use filter::{
    CombiningFilter, ComparisonFilter, ComparisonOperator, ComplexValueFilter, Filter,
    FilterType, FilterVisitor, PresentFilter,
};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::{parse_filter, parse_path, FilterParser};
pub use path::{Path, PathElement};
pub use value::ValueNode;
