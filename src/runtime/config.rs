use crate::lexer::DEFAULT_INDENT_WIDTH;

/// Interpreter configuration
///
/// The defaults leave runs unguarded: an endless jump loop runs forever and unbounded
/// recursion exhausts the stack. The limits are opt-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Maximum number of instructions executed per run
    pub max_steps: Option<u64>,
    /// Maximum nesting of `call` instructions
    pub max_call_depth: Option<usize>,
    /// Spaces that open a block body; a tab always does
    pub indent_width: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            max_steps: None,
            max_call_depth: None,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl ExecutionConfig {
    /// Caps the instructions executed per run
    pub fn with_max_steps(mut self, limit: u64) -> Self {
        self.max_steps = Some(limit);
        self
    }

    /// Caps the nesting of calls
    pub fn with_max_call_depth(mut self, limit: usize) -> Self {
        self.max_call_depth = Some(limit);
        self
    }

    /// Sets the block indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}
