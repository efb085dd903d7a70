//! Visitor dispatch over filter trees.
//!
//! Evaluators and rewriters implement [`FilterVisitor`] and hand themselves to
//! [`Filter::visit`]. Whatever the visitor returns, success or error, is passed
//! back to the caller as is.

use super::ast::{CombiningFilter, ComparisonFilter, ComplexValueFilter, Filter, PresentFilter};

/// Visitor over every filter variant.
///
/// `P` is a parameter threaded through each call, typically the record being
/// matched.
pub trait FilterVisitor<P> {
    /// The value produced for a visited filter.
    type Output;

    /// The error a visit can fail with.
    type Error;

    /// Visit `attribute op value`.
    fn visit_comparison(
        &mut self,
        filter: &ComparisonFilter,
        param: P,
    ) -> Result<Self::Output, Self::Error>;

    /// Visit `attribute pr`.
    fn visit_present(&mut self, filter: &PresentFilter, param: P) -> Result<Self::Output, Self::Error>;

    /// Visit an `and` filter.
    fn visit_and(&mut self, filter: &CombiningFilter, param: P) -> Result<Self::Output, Self::Error>;

    /// Visit an `or` filter.
    fn visit_or(&mut self, filter: &CombiningFilter, param: P) -> Result<Self::Output, Self::Error>;

    /// Visit `not(inverted)`.
    fn visit_not(&mut self, inverted: &Filter, param: P) -> Result<Self::Output, Self::Error>;

    /// Visit `attribute[value_filter]`.
    fn visit_complex_value(
        &mut self,
        filter: &ComplexValueFilter,
        param: P,
    ) -> Result<Self::Output, Self::Error>;
}

impl Filter {
    /// Dispatches to the visitor method for this filter's variant.
    pub fn visit<V, P>(&self, visitor: &mut V, param: P) -> Result<V::Output, V::Error>
    where
        V: FilterVisitor<P> + ?Sized,
    {
        match self {
            Filter::Comparison(filter) => visitor.visit_comparison(filter, param),
            Filter::Present(filter) => visitor.visit_present(filter, param),
            Filter::And(filter) => visitor.visit_and(filter, param),
            Filter::Or(filter) => visitor.visit_or(filter, param),
            Filter::Not(inverted) => visitor.visit_not(inverted, param),
            Filter::ComplexValue(filter) => visitor.visit_complex_value(filter, param),
        }
    }
}
