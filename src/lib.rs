//! # regasm - A Register Assembly Interpreter
//!
//! An interpreter for a small, line-oriented assembly language: 26 integer registers,
//! arithmetic, comparison-driven jumps, labeled blocks that double as subroutines, and a
//! formatted message instruction.
//!
//! ## Quick Start
//!
//! ```rust
//! use regasm::run;
//!
//! # fn main() -> regasm::Result<()> {
//! let code = r#"
//! mov   a, 5
//! inc   a
//! call  function
//! msg   '(5+1)/2 = ', a    ; output message
//! end
//!
//! function:
//!     div   a, 2
//!     ret
//! "#;
//!
//! assert_eq!(run(code)?, "(5+1)/2 = 3");
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Overview
//!
//! - `mov x, y` / `add x, y` / `sub x, y` / `mul x, y` / `div x, y` - `y` is a register or
//!   a signed integer; `div` truncates toward zero
//! - `inc x` / `dec x`
//! - `cmp x, y` then `jne`, `je`, `jge`, `jg`, `jle`, `jl label`; `jmp label` always jumps
//! - `call label` runs a block and resumes after the call; `ret` leaves it
//! - `msg 'text', x, ...` renders quoted text and register values; the last one wins
//! - `end` finishes the program
//! - `; comment` runs to the end of the line
//!
//! A label only becomes a jump or call target when its body follows on lines indented
//! by four spaces or a tab. A jump into a block is a context switch: there is no way
//! back, and the block's `ret` ends whatever invocation performed the jump.
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Lexer → Program (main sequence + FunctionTable) → Interpreter → Output
//! ```
//!
//! - [`Lexer`] - splits lines, parses instructions, registers blocks
//! - [`Program`] - top-level [`Instruction`]s plus the [`FunctionTable`]
//! - [`Interpreter`] - walks sequences against the [`RegisterBank`] and [`CompareState`]
//!
//! ## Error Handling
//!
//! A program must end every sequence it walks to completion on `end`, `ret`, `jmp` or
//! `call`:
//!
//! ```rust
//! use regasm::{run, Error};
//!
//! let err = run("mov a, 1\nadd a, 1").unwrap_err();
//! assert!(matches!(err, Error::MalformedTermination { .. }));
//! ```
//!
//! Unknown instructions and jumps to labels without a body are silently ignored.

/// Version of the regasm interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use error::{Error, ErrorSeverity, Result};
pub use lexer::{Lexer, Opcode};
pub use parser::{Block, FunctionTable, Instruction, JumpCondition, Operand, Program, Register};
pub use runtime::{CompareState, ExecutionConfig, Interpreter, RegisterBank};

/// Runs program text on a fresh interpreter and returns the last rendered message.
pub fn run(source: &str) -> Result<String> {
    Interpreter::new().run(source)
}

/// Lexes program text without executing it.
pub fn lex(source: &str) -> Program {
    Lexer::new(source).lex()
}
