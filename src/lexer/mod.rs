//! Lexical analysis for register assembly
//!
//! Converts source text into a top-level instruction stream plus the table of labeled
//! blocks, one line at a time.

mod line;
mod scanner;
mod token;

pub use line::{label_name, opens_indent, split_head, SourceLine, COMMENT_CHAR, LABEL_SUFFIX};
pub use scanner::{Lexer, DEFAULT_INDENT_WIDTH};
pub use token::Opcode;
