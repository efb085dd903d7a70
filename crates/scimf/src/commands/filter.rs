//! Filter command implementation.
//!
//! Parses a filter expression and prints its canonical form or tree.

use scim_filter_rs::Filter;
use serde_json::json;

use super::{read_input, CommandContext, CommandError, Result};
use crate::output::{filter_json, filter_tree};

/// Parses the expression given on the command line, or read from stdin.
pub fn execute(ctx: &CommandContext, expr: Option<&str>, tree: bool) -> Result<()> {
    let input = read_input(expr)?;
    let filter = parse(ctx, &input)?;
    if ctx.prints_results() {
        println!("{}", render(ctx, &filter, tree));
    }
    Ok(())
}

/// Parses `input` with the context's parser options.
pub fn parse(ctx: &CommandContext, input: &str) -> Result<Filter> {
    ctx.parser
        .parse_filter(input)
        .map_err(|e| CommandError::parse(input, e))
}

/// Formats a parsed filter for output.
pub fn render(ctx: &CommandContext, filter: &Filter, tree: bool) -> String {
    if ctx.json_output {
        json!({
            "filter": filter.to_string(),
            "tree": filter_json(filter),
        })
        .to_string()
    } else if tree {
        filter_tree(filter, ctx.use_colors)
    } else {
        filter.to_string()
    }
}
