//! Error types for the regasm interpreter

use thiserror::Error;

use crate::lexer::Opcode;

/// regasm interpreter errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Run outcome
    /// A sequence was walked to its natural end without a proper terminator
    ///
    /// **Triggered by:** The last instruction reached by straight-line traversal is not
    /// `end`, `ret`, `jmp` or `call`, or the sequence is empty.
    /// **Example:** `mov a, 1` followed by `add a, 1` and nothing else
    /// **Prevention:** Finish every program and every block with one of the terminators
    #[error(
        "Malformed program: sequence ended on {} instead of end, ret, jmp or call",
        describe_last(.last)
    )]
    MalformedTermination {
        /// Opcode of the last instruction, `None` for an empty sequence
        last: Option<Opcode>,
    },

    /// Division by zero error
    ///
    /// **Triggered by:** `div` whose divisor resolves to zero at run time
    /// **Example:** `mov a, 10` then `div a, b` while `b` is still 0
    #[error("Division by zero")]
    DivisionByZero,

    // Syntax errors (only surfaced by the strict conversion helpers, the lexer skips them)
    /// Token is not one of the instruction keywords
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(String),

    /// Register operand is not a single lowercase letter
    #[error("Invalid register: {0}")]
    InvalidRegister(String),

    /// Integer literal is not an optionally negative run of decimal digits
    #[error("Invalid integer literal: {0}")]
    InvalidLiteral(String),

    /// Instruction is missing a required operand
    #[error("Missing operand for `{opcode}`")]
    MissingOperand {
        /// Instruction being parsed
        opcode: Opcode,
    },

    // Resource errors
    /// Execution limit exceeded
    #[error("Execution limit exceeded (max: {limit} instructions)")]
    ExecutionLimitExceeded {
        /// Maximum allowed instructions
        limit: u64,
    },

    /// Too many nested calls
    #[error("Call depth exceeded (max: {limit})")]
    CallDepthExceeded {
        /// Maximum allowed nesting
        limit: usize,
    },

    /// Program could not be serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

fn describe_last(last: &Option<Opcode>) -> String {
    match last {
        Some(opcode) => format!("`{}`", opcode),
        None => "an empty sequence".to_string(),
    }
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The program itself is broken; rerunning it will fail the same way
    Fatal,
    /// A configured resource limit stopped the run
    Resource,
    /// Malformed source text
    Syntax,
}

impl Error {
    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::MalformedTermination { .. } => ErrorSeverity::Fatal,
            Error::DivisionByZero => ErrorSeverity::Fatal,
            Error::SerializationError(_) => ErrorSeverity::Fatal,

            Error::ExecutionLimitExceeded { .. } => ErrorSeverity::Resource,
            Error::CallDepthExceeded { .. } => ErrorSeverity::Resource,

            Error::UnknownOpcode(_)
            | Error::InvalidRegister(_)
            | Error::InvalidLiteral(_)
            | Error::MissingOperand { .. } => ErrorSeverity::Syntax,
        }
    }

    /// True for the malformed-termination signal of the entry contract
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedTermination { .. })
    }
}

/// Result type for regasm operations
pub type Result<T> = std::result::Result<T, Error>;
