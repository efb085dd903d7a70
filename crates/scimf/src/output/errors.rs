//! Parse error display with a caret under the offending character.

use owo_colors::OwoColorize;
use scim_filter_rs::FilterError;

/// The character offset to point at, when the error has one.
///
/// Errors inside an attribute path are relative to the path token, so the
/// token position is added. End-of-input errors point just past the input.
pub fn caret_offset(input: &str, error: &FilterError) -> Option<usize> {
    match error {
        FilterError::InvalidAttributePath { position, source } => {
            Some(position + source.position().unwrap_or(0))
        }
        FilterError::UnexpectedEndOfFilter | FilterError::UnexpectedEndOfPath => {
            Some(input.trim_end().chars().count())
        }
        other => other.position(),
    }
}

/// Renders the input with a caret line below it, or `None` when the error
/// has no position.
pub fn caret_snippet(input: &str, error: &FilterError, use_colors: bool) -> Option<String> {
    let offset = caret_offset(input, error)?;
    let caret = if use_colors {
        "^".red().bold().to_string()
    } else {
        "^".to_string()
    };
    Some(format!("  {input}\n  {:offset$}{caret}", ""))
}
