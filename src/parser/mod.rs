//! Instruction model and operand parsing
//!
//! The lexer recognises the opcode of each line and hands the remaining text to
//! [`parse_instruction`]; the resulting [`Instruction`]s and labeled [`Block`]s make up a
//! [`Program`].

mod ast;
mod function_table;
mod operands;

pub use ast::{Block, Instruction, JumpCondition, Operand, Program, Register};
pub use function_table::FunctionTable;
pub use operands::{parse_instruction, parse_literal, parse_operand, parse_register};
