//! Comparison values and the JSON literal reader used by the filter parser.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::{FilterError, FilterResult};

/// A JSON scalar used as the right-hand side of a comparison filter.
///
/// Integers and decimals stay distinct: `25` and `25.0` are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueNode {
    /// JSON `null`.
    Null,
    /// JSON `true` or `false`.
    Bool(bool),
    /// A JSON number, integer or decimal.
    Number(Number),
    /// A JSON string.
    String(String),
}

impl ValueNode {
    /// Returns true for JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ValueNode::Null)
    }

    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ValueNode::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ValueNode::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an `i64`, if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ValueNode::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Returns the value as an `f64`, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ValueNode::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Returns the number, if this is a number.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            ValueNode::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for ValueNode {
    /// Writes the value as JSON text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::from(self.clone()))
    }
}

impl From<ValueNode> for Value {
    fn from(node: ValueNode) -> Self {
        match node {
            ValueNode::Null => Value::Null,
            ValueNode::Bool(b) => Value::Bool(b),
            ValueNode::Number(n) => Value::Number(n),
            ValueNode::String(s) => Value::String(s),
        }
    }
}

impl TryFrom<Value> for ValueNode {
    type Error = Value;

    /// Converts a JSON scalar; arrays and objects are handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(ValueNode::Null),
            Value::Bool(b) => Ok(ValueNode::Bool(b)),
            Value::Number(n) => Ok(ValueNode::Number(n)),
            Value::String(s) => Ok(ValueNode::String(s)),
            other @ (Value::Array(_) | Value::Object(_)) => Err(other),
        }
    }
}

impl From<&str> for ValueNode {
    fn from(s: &str) -> Self {
        ValueNode::String(s.to_string())
    }
}

impl From<String> for ValueNode {
    fn from(s: String) -> Self {
        ValueNode::String(s)
    }
}

impl From<bool> for ValueNode {
    fn from(b: bool) -> Self {
        ValueNode::Bool(b)
    }
}

impl From<i32> for ValueNode {
    fn from(n: i32) -> Self {
        ValueNode::Number(Number::from(n))
    }
}

impl From<i64> for ValueNode {
    fn from(n: i64) -> Self {
        ValueNode::Number(Number::from(n))
    }
}

impl From<u64> for ValueNode {
    fn from(n: u64) -> Self {
        ValueNode::Number(Number::from(n))
    }
}

impl From<f64> for ValueNode {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(ValueNode::Null, ValueNode::Number)
    }
}

/// A literal decoded from the front of the remaining input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScannedLiteral {
    /// The decoded value.
    pub value: ValueNode,
    /// Characters consumed, including leading whitespace and one terminating
    /// space when present.
    pub consumed: usize,
}

/// Characters that end an unquoted literal (number, `true`, `false`, `null`).
fn ends_bare_literal(c: char) -> bool {
    matches!(c, ' ' | ')' | ']')
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Decodes one JSON scalar from the start of `rest`.
///
/// Returns `Ok(None)` when `rest` holds nothing but whitespace. `position` is
/// the offset of `rest` in the original input and is only used for errors.
///
/// serde_json's stream reader insists that a bare number or keyword is
/// followed by a JSON delimiter, and `)` is not one, so unquoted literals are
/// cut at the first filter delimiter before decoding. Quoted strings decode
/// from the full remainder and stop at their closing quote.
pub(crate) fn scan_literal(rest: &str, position: usize) -> FilterResult<Option<ScannedLiteral>> {
    let body = rest.trim_start_matches([' ', '\t', '\n', '\r']);
    let leading = rest.len() - body.len();
    if body.is_empty() {
        return Ok(None);
    }

    let bound = if body.starts_with(['"', '[', '{']) {
        body.len()
    } else {
        body.find(ends_bare_literal).unwrap_or(body.len())
    };

    if bound == 0 {
        let found: String = body.chars().take(1).collect();
        return Err(FilterError::invalid_value(
            position,
            format!("expected a value, found '{found}'"),
        ));
    }

    let mut stream = serde_json::Deserializer::from_str(&body[..bound]).into_iter::<Value>();
    let value = match stream.next() {
        None => return Ok(None),
        Some(Ok(value)) => value,
        Some(Err(e)) => return Err(FilterError::invalid_value(position, e.to_string())),
    };
    let literal = &body[..stream.byte_offset()];
    let end = leading + literal.len();

    // Without arbitrary precision, integers past u64/i64 come back as f64.
    if matches!(&value, Value::Number(n) if n.is_f64()) && is_integer_literal(literal) {
        return Err(FilterError::invalid_value(
            position,
            format!("integer {literal} is out of range"),
        ));
    }

    let value = ValueNode::try_from(value).map_err(|other| {
        FilterError::invalid_value(position, format!("expected a JSON scalar, found {other}"))
    })?;

    let terminator = usize::from(rest[end..].starts_with(' '));
    Ok(Some(ScannedLiteral {
        value,
        consumed: rest[..end].chars().count() + terminator,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(rest: &str) -> ScannedLiteral {
        scan_literal(rest, 0).unwrap().unwrap()
    }

    #[test]
    fn test_scan_string_followed_by_bracket() {
        let literal = scan("\"Austin\"]");
        assert_eq!(literal.value, ValueNode::from("Austin"));
        assert_eq!(literal.consumed, 8);
    }

    #[test]
    fn test_scan_string_consumes_one_trailing_space() {
        let literal = scan("\"john\"  and x pr");
        assert_eq!(literal.consumed, 7);
    }

    #[test]
    fn test_scan_number_followed_by_paren() {
        let literal = scan("25)");
        assert_eq!(literal.value, ValueNode::from(25));
        assert_eq!(literal.consumed, 2);
    }

    #[test]
    fn test_scan_number_at_end_of_input() {
        let literal = scan("25.52");
        assert_eq!(literal.value, ValueNode::from(25.52));
        assert_eq!(literal.consumed, 5);
    }

    #[test]
    fn test_scan_keywords() {
        assert_eq!(scan("true ").value, ValueNode::Bool(true));
        assert_eq!(scan("false]").value, ValueNode::Bool(false));
        assert_eq!(scan("null").value, ValueNode::Null);
    }

    #[test]
    fn test_scan_skips_leading_whitespace() {
        let literal = scan("   12 and");
        assert_eq!(literal.value, ValueNode::from(12));
        assert_eq!(literal.consumed, 6);
    }

    #[test]
    fn test_scan_counts_characters_not_bytes() {
        let literal = scan("\"h\u{e9}llo\" and");
        assert_eq!(literal.value, ValueNode::from("h\u{e9}llo"));
        assert_eq!(literal.consumed, 8);
    }

    #[test]
    fn test_scan_unicode_escapes() {
        let literal = scan(r#""\ufe00\"\n\t\\""#);
        assert_eq!(literal.value, ValueNode::from("\u{fe00}\"\n\t\\"));
    }

    #[test]
    fn test_scan_empty_input_is_none() {
        assert_eq!(scan_literal("", 0).unwrap(), None);
        assert_eq!(scan_literal("   ", 0).unwrap(), None);
    }

    #[test]
    fn test_scan_rejects_malformed_literals() {
        for bad in ["'bjensen'", "\"bjensen", "bjensen", "(\"john\")", "\"\\a\"", "\"\\ufe\"", "25abc"] {
            let err = scan_literal(bad, 4).unwrap_err();
            assert!(
                matches!(err, FilterError::InvalidValue { position: 4, .. }),
                "expected invalid value for {bad}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_scan_rejects_missing_value_before_delimiter() {
        for (rest, found) in [(")", ')'), ("]", ']'), ("  )", ')')] {
            let err = scan_literal(rest, 5).unwrap_err();
            assert_eq!(
                err,
                FilterError::invalid_value(5, format!("expected a value, found '{found}'"))
            );
        }
    }

    #[test]
    fn test_scan_rejects_integers_out_of_range() {
        for bad in ["12345678901234567890123", "-12345678901234567890123"] {
            let err = scan_literal(bad, 6).unwrap_err();
            assert_eq!(
                err,
                FilterError::invalid_value(6, format!("integer {bad} is out of range"))
            );
        }
    }

    #[test]
    fn test_scan_keeps_large_integers_in_range() {
        assert_eq!(scan("18446744073709551615").value, ValueNode::from(u64::MAX));
        assert_eq!(scan("-9223372036854775808]").value, ValueNode::from(i64::MIN));
        assert!(scan("1e30").value.as_number().is_some_and(|n| n.is_f64()));
    }

    #[test]
    fn test_scan_rejects_arrays_and_objects() {
        assert!(scan_literal("[1, 2]", 0).is_err());
        assert!(scan_literal("{\"a\": 1}", 0).is_err());
    }

    #[test]
    fn test_integer_and_decimal_are_distinct() {
        assert_ne!(scan("25").value, scan("25.0").value);
    }

    #[test]
    fn test_display_is_json() {
        assert_eq!(ValueNode::from("a\"b").to_string(), r#""a\"b""#);
        assert_eq!(ValueNode::from(25.52).to_string(), "25.52");
        assert_eq!(ValueNode::Null.to_string(), "null");
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert!(ValueNode::from(f64::NAN).is_null());
    }
}
