//! Parser limits.

use serde::{Deserialize, Serialize};

/// Default limit on nested groups and value filters.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Limits applied while parsing.
///
/// Deserializes from a config table, with every key optional:
///
/// ```toml
/// max_length = 4096
/// max_depth = 16
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum input length in characters. `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Maximum nesting of parenthesized groups, `not` groups and `[...]`
    /// value filters.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_length: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Returns these options with an input length cap.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Returns these options with a nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
