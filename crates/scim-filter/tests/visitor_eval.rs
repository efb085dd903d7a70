//! Evaluating parsed filters against JSON resources with a visitor.

use serde_json::{json, Value};

use scim_filter_rs::{
    parse_filter, CombiningFilter, ComparisonFilter, ComparisonOperator, ComplexValueFilter,
    Filter, FilterVisitor, Path, PresentFilter,
};

#[derive(Debug, PartialEq)]
enum EvalError {
    /// Ordering operators only apply to numbers and strings.
    NotOrdered(String),
}

/// Matches filters against a JSON resource. Attribute names ignore case.
struct Matcher;

fn lookup<'a>(resource: &'a Value, name: &str) -> Option<&'a Value> {
    resource
        .as_object()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

/// Resolves a path, flattening multi-valued attributes along the way.
fn resolve<'a>(resource: &'a Value, path: &Path) -> Vec<&'a Value> {
    let mut current = vec![resource];
    for element in path.elements() {
        current = current
            .into_iter()
            .filter_map(|value| lookup(value, element.attribute()))
            .flat_map(|value| match value {
                Value::Array(items) => items.iter().collect(),
                other => vec![other],
            })
            .collect();
    }
    current
}

fn compare(op: ComparisonOperator, actual: &Value, expected: &Value) -> Result<bool, EvalError> {
    use ComparisonOperator::*;

    Ok(match (op, actual, expected) {
        (Equal, a, e) => a == e,
        (NotEqual, a, e) => a != e,
        (Contains, Value::String(a), Value::String(e)) => a.contains(e.as_str()),
        (StartsWith, Value::String(a), Value::String(e)) => a.starts_with(e.as_str()),
        (EndsWith, Value::String(a), Value::String(e)) => a.ends_with(e.as_str()),
        (Contains | StartsWith | EndsWith, _, _) => false,
        (op, Value::Number(a), Value::Number(e)) => {
            let (a, e) = (a.as_f64().unwrap_or(f64::NAN), e.as_f64().unwrap_or(f64::NAN));
            match op {
                GreaterThan => a > e,
                GreaterOrEqual => a >= e,
                LessThan => a < e,
                _ => a <= e,
            }
        }
        (op, Value::String(a), Value::String(e)) => match op {
            GreaterThan => a > e,
            GreaterOrEqual => a >= e,
            LessThan => a < e,
            _ => a <= e,
        },
        (op, _, _) => return Err(EvalError::NotOrdered(op.to_string())),
    })
}

impl<'a> FilterVisitor<&'a Value> for Matcher {
    type Output = bool;
    type Error = EvalError;

    fn visit_comparison(&mut self, filter: &ComparisonFilter, resource: &'a Value) -> Result<bool, EvalError> {
        let expected = Value::from(filter.value().clone());
        for actual in resolve(resource, filter.attribute_path()) {
            if compare(filter.operator(), actual, &expected)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn visit_present(&mut self, filter: &PresentFilter, resource: &'a Value) -> Result<bool, EvalError> {
        Ok(resolve(resource, filter.attribute_path())
            .iter()
            .any(|value| !value.is_null()))
    }

    fn visit_and(&mut self, filter: &CombiningFilter, resource: &'a Value) -> Result<bool, EvalError> {
        for operand in filter.operands() {
            if !operand.visit(self, resource)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn visit_or(&mut self, filter: &CombiningFilter, resource: &'a Value) -> Result<bool, EvalError> {
        for operand in filter.operands() {
            if operand.visit(self, resource)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn visit_not(&mut self, inverted: &Filter, resource: &'a Value) -> Result<bool, EvalError> {
        Ok(!inverted.visit(self, resource)?)
    }

    fn visit_complex_value(
        &mut self,
        filter: &ComplexValueFilter,
        resource: &'a Value,
    ) -> Result<bool, EvalError> {
        for value in resolve(resource, filter.attribute_path()) {
            if filter.value_filter().visit(self, value)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn user() -> Value {
    json!({
        "userName": "bjensen",
        "title": "Tour Guide",
        "userType": "Employee",
        "active": true,
        "name": { "familyName": "Jensen", "givenName": "Barbara" },
        "meta": { "lastModified": "2011-05-13T04:42:34Z" },
        "emails": [
            { "type": "work", "value": "bjensen@example.com", "primary": true },
            { "type": "home", "value": "babs@jensen.org" }
        ]
    })
}

fn matches(text: &str) -> bool {
    let filter = parse_filter(text).unwrap_or_else(|e| panic!("{text:?} failed: {e}"));
    filter
        .visit(&mut Matcher, &user())
        .unwrap_or_else(|e| panic!("{text:?} could not be evaluated: {e:?}"))
}

#[test]
fn test_evaluate_comparisons() {
    assert!(matches("userName eq \"bjensen\""));
    assert!(!matches("userName eq \"BJENSEN\""));
    assert!(matches("name.familyName sw \"J\""));
    assert!(matches("USERNAME ew \"sen\""));
    assert!(matches("meta.lastModified gt \"2011-05-13T00:00:00Z\""));
    assert!(matches("active eq true"));
}

#[test]
fn test_evaluate_logical_operators() {
    assert!(matches("title pr and userType eq \"Employee\""));
    assert!(matches("title eq \"Manager\" or userType eq \"Employee\""));
    assert!(!matches("not (title pr)"));
    assert!(matches("nickName pr or not (userType eq \"Intern\")"));
}

#[test]
fn test_evaluate_complex_values() {
    assert!(matches("emails[type eq \"work\" and value co \"@example.com\"]"));
    assert!(!matches("emails[type eq \"work\" and value co \"@jensen.org\"]"));
    assert!(matches("emails[not (primary pr)]"));
}

#[test]
fn test_evaluate_flattens_multi_valued_attributes() {
    assert!(matches("emails.value ew \"jensen.org\""));
    assert!(!matches("emails.type eq \"other\""));
}

#[test]
fn test_visitor_error_reaches_caller() {
    let filter = parse_filter("active gt true").unwrap();
    assert_eq!(
        filter.visit(&mut Matcher, &user()),
        Err(EvalError::NotOrdered("gt".to_string()))
    );
}

#[test]
fn test_short_circuit_skips_failing_operand() {
    let filter = parse_filter("userType eq \"Intern\" and active gt true").unwrap();
    assert_eq!(filter.visit(&mut Matcher, &user()), Ok(false));
}
