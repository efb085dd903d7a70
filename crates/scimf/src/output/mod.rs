//! Output formatting for filters, paths and parse errors.

mod errors;
mod tree;

pub use errors::{caret_offset, caret_snippet};
pub use tree::{filter_json, filter_tree, path_json, path_tree};
