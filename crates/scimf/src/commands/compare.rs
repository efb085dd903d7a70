//! Compare command implementation.
//!
//! Two filters are equivalent when their trees are equal, with and/or operands
//! compared as sets.

use scim_filter_rs::Filter;
use serde_json::json;
use tracing::debug;

use super::filter::parse;
use super::{CommandContext, Result};

/// Parses both filters and reports whether they are equivalent.
///
/// Returns `Ok(false)` when both parse but differ.
pub fn execute(ctx: &CommandContext, left: &str, right: &str) -> Result<bool> {
    let left = parse(ctx, left)?;
    let right = parse(ctx, right)?;
    let equal = left == right;
    debug!(left = %left, right = %right, equal, "compared filters");

    if ctx.prints_results() {
        println!("{}", summary(ctx, &left, &right, equal));
    }

    Ok(equal)
}

fn summary(ctx: &CommandContext, left: &Filter, right: &Filter, equal: bool) -> String {
    if ctx.json_output {
        json!({
            "equal": equal,
            "left": left.to_string(),
            "right": right.to_string(),
        })
        .to_string()
    } else if equal {
        "equivalent".to_string()
    } else {
        format!("different:\n  {left}\n  {right}")
    }
}
