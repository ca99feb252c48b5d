//! Per-opcode operand parsing
//!
//! Operands may be separated by commas, whitespace or both, so `mov a, 5`,
//! `mov a,5` and `mov a 5` are the same instruction. `msg` is the exception:
//! its template is kept verbatim for the formatter.

use crate::error::{Error, Result};
use crate::lexer::Opcode;
use crate::parser::{Instruction, JumpCondition, Operand, Register};

/// Parses the operand text that follows `opcode` on a line
pub fn parse_instruction(opcode: Opcode, rest: &str) -> Result<Instruction> {
    let mut args = rest
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|arg| !arg.is_empty());
    let mut next = || args.next().ok_or(Error::MissingOperand { opcode });

    let instruction = match opcode {
        Opcode::Move => Instruction::Move {
            dest: parse_register(next()?)?,
            src: parse_operand(next()?)?,
        },
        Opcode::Increment => Instruction::Increment {
            dest: parse_register(next()?)?,
        },
        Opcode::Decrement => Instruction::Decrement {
            dest: parse_register(next()?)?,
        },
        Opcode::Add => Instruction::Add {
            dest: parse_register(next()?)?,
            src: parse_operand(next()?)?,
        },
        Opcode::Subtract => Instruction::Subtract {
            dest: parse_register(next()?)?,
            src: parse_operand(next()?)?,
        },
        Opcode::Multiply => Instruction::Multiply {
            dest: parse_register(next()?)?,
            src: parse_operand(next()?)?,
        },
        Opcode::Divide => Instruction::Divide {
            dest: parse_register(next()?)?,
            src: parse_operand(next()?)?,
        },
        Opcode::Compare => Instruction::Compare {
            left: parse_operand(next()?)?,
            right: parse_operand(next()?)?,
        },
        Opcode::Jump
        | Opcode::JumpIfNotEqual
        | Opcode::JumpIfEqual
        | Opcode::JumpIfGreaterOrEqual
        | Opcode::JumpIfGreater
        | Opcode::JumpIfLessOrEqual
        | Opcode::JumpIfLess => {
            let condition = JumpCondition::from_opcode(opcode)
                .ok_or_else(|| Error::UnknownOpcode(opcode.to_string()))?;
            Instruction::Jump {
                condition,
                label: next()?.to_string(),
            }
        }
        Opcode::Call => Instruction::Call {
            label: next()?.to_string(),
        },
        Opcode::Return => Instruction::Return,
        Opcode::End => Instruction::End,
        Opcode::Message => Instruction::Message {
            template: rest.trim().to_string(),
        },
        Opcode::LabelHeader => return Err(Error::UnknownOpcode(opcode.to_string())),
    };

    Ok(instruction)
}

/// A single lowercase letter
pub fn parse_register(token: &str) -> Result<Register> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Register::try_from(letter),
        _ => Err(Error::InvalidRegister(token.to_string())),
    }
}

/// Optional `-` followed by decimal digits
pub fn parse_literal(token: &str) -> Result<i64> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidLiteral(token.to_string()));
    }
    token
        .parse()
        .map_err(|_| Error::InvalidLiteral(token.to_string()))
}

/// Register or integer literal
pub fn parse_operand(token: &str) -> Result<Operand> {
    if token.starts_with('-') || token.starts_with(|c: char| c.is_ascii_digit()) {
        parse_literal(token).map(Operand::Immediate)
    } else {
        parse_register(token).map(Operand::Register)
    }
}
