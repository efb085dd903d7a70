//! Attribute path reader.

use super::cursor::Cursor;
use super::expression::read_value_filter;
use super::lexer::read_path_token;
use crate::error::{FilterError, FilterResult};
use crate::options::ParseOptions;
use crate::path::{Path, PathElement};

/// Splits a leading `urn:...:attribute` token at its last colon.
fn split_schema_urn(name: &str) -> (Option<&str>, &str) {
    let is_urn = name
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("urn:"));
    match name.rfind(':') {
        Some(split) if is_urn => (Some(&name[..split]), &name[split + 1..]),
        _ => (None, name),
    }
}

/// Reads a full path from the cursor.
///
/// An element carrying a value filter must be followed by `.` or the end of
/// the input. No tokens at all yield the root path.
pub(crate) fn read_path(
    cursor: &mut Cursor,
    options: &ParseOptions,
    depth: usize,
) -> FilterResult<Path> {
    let mut path: Option<Path> = None;
    let mut needs_separator = false;

    while let Some(token) = read_path_token(cursor)? {
        if token.name.is_empty() && !token.opens_filter {
            // The `.` after `]` of a value-filtered element.
            if !needs_separator {
                return Err(FilterError::AttributeNameExpected {
                    position: token.position,
                });
            }
            needs_separator = false;
            continue;
        }
        if needs_separator {
            return Err(FilterError::unexpected_token(token.name, token.position));
        }

        let (schema_urn, attribute) = if path.is_none() {
            split_schema_urn(&token.name)
        } else {
            (None, token.name.as_str())
        };

        if attribute.is_empty() {
            return match schema_urn {
                Some(urn) if !token.opens_filter => Ok(Path::extension_root(urn)),
                _ => Err(FilterError::AttributeNameExpected {
                    position: token.position,
                }),
            };
        }

        let value_filter = if token.opens_filter {
            Some(read_value_filter(cursor, options, depth, token.position)?)
        } else {
            None
        };
        needs_separator = value_filter.is_some();

        let element = PathElement::new(attribute, value_filter);
        match path.as_mut() {
            Some(path) => path.push(element),
            None => {
                let mut first = Path::root();
                if let Some(urn) = schema_urn {
                    first.set_schema_urn(urn.to_string());
                }
                first.push(element);
                path = Some(first);
            }
        }
    }

    Ok(path.unwrap_or_default())
}
