//! Path command implementation.
//!
//! Parses an attribute path and prints its canonical form or elements.

use scim_filter_rs::Path;
use serde_json::json;

use super::{read_input, CommandContext, CommandError, Result};
use crate::output::{path_json, path_tree};

/// Parses the path given on the command line, or read from stdin.
pub fn execute(ctx: &CommandContext, path: Option<&str>, tree: bool) -> Result<()> {
    let input = read_input(path)?;
    let path = ctx
        .parser
        .parse_path(&input)
        .map_err(|e| CommandError::parse(&input, e))?;
    if ctx.prints_results() {
        println!("{}", render(ctx, &path, tree));
    }
    Ok(())
}

/// Formats a parsed path for output.
pub fn render(ctx: &CommandContext, path: &Path, tree: bool) -> String {
    if ctx.json_output {
        json!({
            "path": path.to_string(),
            "tree": path_json(path),
        })
        .to_string()
    } else if tree {
        path_tree(path, ctx.use_colors)
    } else {
        path.to_string()
    }
}
