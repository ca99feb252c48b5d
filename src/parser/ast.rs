use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::lexer::Opcode;
use crate::parser::FunctionTable;

/// One of the 26 registers, `a` through `z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Register(u8);

impl Register {
    /// Number of registers in the bank
    pub const COUNT: usize = 26;

    /// Register for a lowercase letter
    pub fn from_letter(letter: char) -> Option<Register> {
        if letter.is_ascii_lowercase() {
            Some(Register(letter as u8 - b'a'))
        } else {
            None
        }
    }

    /// Register at a bank index (0 = `a`)
    pub fn from_index(index: usize) -> Option<Register> {
        if index < Self::COUNT {
            Some(Register(index as u8))
        } else {
            None
        }
    }

    /// Bank index of this register
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Letter naming this register
    pub fn letter(&self) -> char {
        (b'a' + self.0) as char
    }
}

impl TryFrom<char> for Register {
    type Error = Error;

    fn try_from(letter: char) -> Result<Self> {
        Register::from_letter(letter).ok_or_else(|| Error::InvalidRegister(letter.to_string()))
    }
}

impl From<Register> for char {
    fn from(register: Register) -> char {
        register.letter()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Source operand: a register read or an immediate value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// Value of a register at execution time
    Register(Register),
    /// Literal integer
    Immediate(i64),
}

impl Operand {
    /// Register this operand reads, if any
    pub fn register(&self) -> Option<Register> {
        match self {
            Operand::Register(reg) => Some(*reg),
            Operand::Immediate(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Register(reg) => write!(f, "{}", reg),
            Operand::Immediate(value) => write!(f, "{}", value),
        }
    }
}

/// Relation a jump checks against the last comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpCondition {
    /// `jmp`, taken unconditionally
    Always,
    /// `jne`
    NotEqual,
    /// `je`
    Equal,
    /// `jge`
    GreaterOrEqual,
    /// `jg`
    Greater,
    /// `jle`
    LessOrEqual,
    /// `jl`
    Less,
}

impl JumpCondition {
    /// Condition for a jump opcode
    pub fn from_opcode(opcode: Opcode) -> Option<JumpCondition> {
        let condition = match opcode {
            Opcode::Jump => JumpCondition::Always,
            Opcode::JumpIfNotEqual => JumpCondition::NotEqual,
            Opcode::JumpIfEqual => JumpCondition::Equal,
            Opcode::JumpIfGreaterOrEqual => JumpCondition::GreaterOrEqual,
            Opcode::JumpIfGreater => JumpCondition::Greater,
            Opcode::JumpIfLessOrEqual => JumpCondition::LessOrEqual,
            Opcode::JumpIfLess => JumpCondition::Less,
            _ => return None,
        };
        Some(condition)
    }

    /// Opcode that encodes this condition
    pub fn opcode(&self) -> Opcode {
        match self {
            JumpCondition::Always => Opcode::Jump,
            JumpCondition::NotEqual => Opcode::JumpIfNotEqual,
            JumpCondition::Equal => Opcode::JumpIfEqual,
            JumpCondition::GreaterOrEqual => Opcode::JumpIfGreaterOrEqual,
            JumpCondition::Greater => Opcode::JumpIfGreater,
            JumpCondition::LessOrEqual => Opcode::JumpIfLessOrEqual,
            JumpCondition::Less => Opcode::JumpIfLess,
        }
    }

    /// Evaluates the relation on `left` and `right`
    pub fn holds(&self, left: i64, right: i64) -> bool {
        match self {
            JumpCondition::Always => true,
            JumpCondition::NotEqual => left != right,
            JumpCondition::Equal => left == right,
            JumpCondition::GreaterOrEqual => left >= right,
            JumpCondition::Greater => left > right,
            JumpCondition::LessOrEqual => left <= right,
            JumpCondition::Less => left < right,
        }
    }
}

/// A single parsed instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// `mov dest, src`
    Move {
        /// Register written
        dest: Register,
        /// Value copied
        src: Operand,
    },
    /// `inc dest`
    Increment {
        /// Register incremented in place
        dest: Register,
    },
    /// `dec dest`
    Decrement {
        /// Register decremented in place
        dest: Register,
    },
    /// `add dest, src`
    Add {
        /// Register updated in place
        dest: Register,
        /// Right-hand side
        src: Operand,
    },
    /// `sub dest, src`
    Subtract {
        /// Register updated in place
        dest: Register,
        /// Right-hand side
        src: Operand,
    },
    /// `mul dest, src`
    Multiply {
        /// Register updated in place
        dest: Register,
        /// Right-hand side
        src: Operand,
    },
    /// `div dest, src`, truncating toward zero
    Divide {
        /// Register updated in place
        dest: Register,
        /// Divisor
        src: Operand,
    },
    /// `cmp left, right`
    Compare {
        /// Left side of the comparison
        left: Operand,
        /// Right side of the comparison
        right: Operand,
    },
    /// `jmp`/`jne`/`je`/`jge`/`jg`/`jle`/`jl label`
    Jump {
        /// Relation checked against the comparison state
        condition: JumpCondition,
        /// Target block
        label: String,
    },
    /// `call label`
    Call {
        /// Block to run as a subroutine
        label: String,
    },
    /// `ret`
    Return,
    /// `msg template`
    Message {
        /// Raw template, rendered when the instruction executes
        template: String,
    },
    /// `end`
    End,
}

impl Instruction {
    /// Opcode of this instruction
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Move { .. } => Opcode::Move,
            Instruction::Increment { .. } => Opcode::Increment,
            Instruction::Decrement { .. } => Opcode::Decrement,
            Instruction::Add { .. } => Opcode::Add,
            Instruction::Subtract { .. } => Opcode::Subtract,
            Instruction::Multiply { .. } => Opcode::Multiply,
            Instruction::Divide { .. } => Opcode::Divide,
            Instruction::Compare { .. } => Opcode::Compare,
            Instruction::Jump { condition, .. } => condition.opcode(),
            Instruction::Call { .. } => Opcode::Call,
            Instruction::Return => Opcode::Return,
            Instruction::Message { .. } => Opcode::Message,
            Instruction::End => Opcode::End,
        }
    }

    /// Whether this instruction may legally close a sequence
    pub fn is_terminator(&self) -> bool {
        self.opcode().is_terminator()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let opcode = self.opcode();
        match self {
            Instruction::Move { dest, src }
            | Instruction::Add { dest, src }
            | Instruction::Subtract { dest, src }
            | Instruction::Multiply { dest, src }
            | Instruction::Divide { dest, src } => write!(f, "{} {}, {}", opcode, dest, src),
            Instruction::Increment { dest } | Instruction::Decrement { dest } => {
                write!(f, "{} {}", opcode, dest)
            }
            Instruction::Compare { left, right } => write!(f, "{} {}, {}", opcode, left, right),
            Instruction::Jump { label, .. } | Instruction::Call { label } => {
                write!(f, "{} {}", opcode, label)
            }
            Instruction::Message { template } => write!(f, "{} {}", opcode, template),
            Instruction::Return | Instruction::End => write!(f, "{}", opcode),
        }
    }
}

/// A labeled, indented instruction sequence usable as a jump or call target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Label without the trailing `:`
    pub label: String,
    /// Body, lexed with the same grammar as the top level
    pub instructions: Vec<Instruction>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}:", self.label)?;
        if self.instructions.is_empty() {
            // an inert nested label keeps the block registered with an empty body
            writeln!(f, "    {}:", self.label)?;
        }
        for instruction in &self.instructions {
            writeln!(f, "    {}", instruction)?;
        }
        Ok(())
    }
}

/// Lexed program: the top-level sequence plus every block found in the text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Program {
    /// Top-level instructions in source order
    pub main: Vec<Instruction>,
    /// Blocks, in registration order
    pub functions: FunctionTable,
}

impl Program {
    /// JSON dump of the instruction stream and function table
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::SerializationError(e.to_string()))
    }
}

/// Listing that lexes back into an equivalent program
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for instruction in &self.main {
            writeln!(f, "{}", instruction)?;
        }
        for block in self.functions.iter() {
            writeln!(f)?;
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}
