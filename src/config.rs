//!
//! Limits shared by the parser and the evaluator.
//!

///
/// Recursion limits for building and evaluating trees.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    ///
    /// Deepest tree the evaluator will walk or the default grammar will
    /// build, and deepest nesting of parentheses and unary operators the
    /// grammar will accept.
    ///
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}
