use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// All instruction kinds, in keyword-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// `mov`
    Move,
    /// `inc`
    Increment,
    /// `dec`
    Decrement,
    /// `add`
    Add,
    /// `sub`
    Subtract,
    /// `mul`
    Multiply,
    /// `div`
    Divide,
    /// `name:` header; recognised by the lexer but never emitted as an instruction
    LabelHeader,
    /// `jmp`
    Jump,
    /// `cmp`
    Compare,
    /// `jne`
    JumpIfNotEqual,
    /// `je`
    JumpIfEqual,
    /// `jge`
    JumpIfGreaterOrEqual,
    /// `jg`
    JumpIfGreater,
    /// `jle`
    JumpIfLessOrEqual,
    /// `jl`
    JumpIfLess,
    /// `call`
    Call,
    /// `ret`
    Return,
    /// `msg`
    Message,
    /// `end`
    End,
}

impl Opcode {
    /// Every keyword the lexer accepts, paired with its opcode
    pub const KEYWORDS: [(&'static str, Opcode); 19] = [
        ("mov", Opcode::Move),
        ("inc", Opcode::Increment),
        ("dec", Opcode::Decrement),
        ("add", Opcode::Add),
        ("sub", Opcode::Subtract),
        ("mul", Opcode::Multiply),
        ("div", Opcode::Divide),
        ("jmp", Opcode::Jump),
        ("cmp", Opcode::Compare),
        ("jne", Opcode::JumpIfNotEqual),
        ("je", Opcode::JumpIfEqual),
        ("jge", Opcode::JumpIfGreaterOrEqual),
        ("jg", Opcode::JumpIfGreater),
        ("jle", Opcode::JumpIfLessOrEqual),
        ("jl", Opcode::JumpIfLess),
        ("call", Opcode::Call),
        ("ret", Opcode::Return),
        ("msg", Opcode::Message),
        ("end", Opcode::End),
    ];

    /// Case-sensitive keyword lookup
    pub fn from_keyword(word: &str) -> Option<Opcode> {
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == word)
            .map(|(_, opcode)| *opcode)
    }

    /// Source keyword for this opcode (`label:` for headers)
    pub fn keyword(&self) -> &'static str {
        match self {
            Opcode::LabelHeader => "label:",
            other => Self::KEYWORDS
                .iter()
                .find(|(_, opcode)| opcode == other)
                .map(|(keyword, _)| *keyword)
                .unwrap_or("?"),
        }
    }

    /// Opcodes that may legally close a sequence
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Opcode::End | Opcode::Return | Opcode::Jump | Opcode::Call
        )
    }
}

impl FromStr for Opcode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::from_keyword(s).ok_or_else(|| Error::UnknownOpcode(s.to_string()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}
