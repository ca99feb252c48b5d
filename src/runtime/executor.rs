use crate::error::{Error, Result};
use crate::lexer::Lexer;
use crate::parser::{Instruction, Program};
use crate::runtime::{message, CompareState, ExecutionConfig, RegisterBank};

/// How a sequence stopped without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceExit {
    /// `ret` ended the current invocation
    Returned,
    /// `end` ended the whole run, even from inside a call. Unwinds every active
    /// invocation instead of returning like `ret`.
    Halted,
    /// The last instruction (a valid terminator) ran and control fell off the end
    Exhausted,
}

/// Instruction pointer: the sequence being walked and the position in it
#[derive(Debug, Clone, Copy)]
struct Cursor<'p> {
    sequence: &'p [Instruction],
    pc: usize,
}

impl<'p> Cursor<'p> {
    fn new(sequence: &'p [Instruction]) -> Self {
        Cursor { sequence, pc: 0 }
    }

    fn current(&self) -> Option<&'p Instruction> {
        self.sequence.get(self.pc)
    }

    fn is_last(&self) -> bool {
        self.pc + 1 == self.sequence.len()
    }

    fn advance(&mut self) {
        self.pc += 1;
    }

    /// Context switch into another sequence; nothing remembers where we came from
    fn relocate(&mut self, sequence: &'p [Instruction]) {
        self.sequence = sequence;
        self.pc = 0;
    }
}

/// Register assembly interpreter
///
/// Holds the state of one run: registers, comparison state and the output buffer.
/// Every call to [`Interpreter::run`] or [`Interpreter::execute`] starts from a clean
/// slate, so one interpreter can be reused for any number of independent programs.
///
/// ```rust
/// use regasm::Interpreter;
///
/// let mut interpreter = Interpreter::new();
/// let output = interpreter.run("mov a, 5\nmsg 'a=', a\nend").unwrap();
/// assert_eq!(output, "a=5");
/// ```
pub struct Interpreter {
    /// Register bank
    registers: RegisterBank,
    /// Last comparison
    compare: CompareState,
    /// Rendering of the most recent `msg`
    output: String,
    /// Limits and lexer settings
    config: ExecutionConfig,
    /// Instructions executed in the current run
    steps: u64,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter with the default (unguarded) configuration
    pub fn new() -> Self {
        Self::with_config(ExecutionConfig::default())
    }

    /// Creates an interpreter with a custom configuration
    pub fn with_config(config: ExecutionConfig) -> Self {
        Interpreter {
            registers: RegisterBank::new(),
            compare: CompareState::default(),
            output: String::new(),
            config,
            steps: 0,
        }
    }

    /// Registers as left by the last run
    pub fn registers(&self) -> &RegisterBank {
        &self.registers
    }

    /// Comparison state as left by the last run
    pub fn compare_state(&self) -> &CompareState {
        &self.compare
    }

    /// Output buffer as left by the last run, including runs that failed
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Instructions executed by the last run
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Lexes and executes program text
    pub fn run(&mut self, source: &str) -> Result<String> {
        let program = Lexer::new(source)
            .with_indent_width(self.config.indent_width)
            .lex();
        self.execute(&program)
    }

    /// Executes an already lexed program from a fresh state.
    ///
    /// Returns the rendering of the last `msg` executed (empty if none ran), or the
    /// error that ended the run.
    pub fn execute(&mut self, program: &Program) -> Result<String> {
        self.reset();

        match self.execute_sequence(program, &program.main, 0) {
            Ok(exit) => {
                tracing::debug!(?exit, steps = self.steps, "run finished");
                Ok(self.output.clone())
            }
            Err(err) => {
                tracing::warn!(error = %err, steps = self.steps, "run failed");
                Err(err)
            }
        }
    }

    fn reset(&mut self) {
        self.registers.reset();
        self.compare = CompareState::default();
        self.output.clear();
        self.steps = 0;
    }

    /// Walks `sequence`, following jumps into blocks and recursing on calls
    fn execute_sequence<'p>(
        &mut self,
        program: &'p Program,
        sequence: &'p [Instruction],
        depth: usize,
    ) -> Result<SequenceExit> {
        let mut cursor = Cursor::new(sequence);

        loop {
            let Some(instruction) = cursor.current() else {
                if cursor.sequence.is_empty() {
                    return Err(Error::MalformedTermination { last: None });
                }
                return Ok(SequenceExit::Exhausted);
            };

            if cursor.is_last() && !instruction.is_terminator() {
                return Err(Error::MalformedTermination {
                    last: Some(instruction.opcode()),
                });
            }

            self.tick()?;
            tracing::trace!(depth, pc = cursor.pc, %instruction, "execute");

            match instruction {
                Instruction::Move { dest, src } => {
                    let value = self.registers.resolve(src);
                    self.registers.set(*dest, value);
                }
                Instruction::Increment { dest } => {
                    self.registers.update(*dest, |v| v.wrapping_add(1));
                }
                Instruction::Decrement { dest } => {
                    self.registers.update(*dest, |v| v.wrapping_sub(1));
                }
                Instruction::Add { dest, src } => {
                    let rhs = self.registers.resolve(src);
                    self.registers.update(*dest, |v| v.wrapping_add(rhs));
                }
                Instruction::Subtract { dest, src } => {
                    let rhs = self.registers.resolve(src);
                    self.registers.update(*dest, |v| v.wrapping_sub(rhs));
                }
                Instruction::Multiply { dest, src } => {
                    let rhs = self.registers.resolve(src);
                    self.registers.update(*dest, |v| v.wrapping_mul(rhs));
                }
                Instruction::Divide { dest, src } => {
                    let divisor = self.registers.resolve(src);
                    if divisor == 0 {
                        return Err(Error::DivisionByZero);
                    }
                    self.registers.update(*dest, |v| v.wrapping_div(divisor));
                }
                Instruction::Compare { left, right } => {
                    self.compare.record(&self.registers, left, right);
                }
                Instruction::Jump { condition, label } => {
                    let taken = condition.holds(self.compare.left, self.compare.right);
                    self.compare.outcome = taken;
                    if taken {
                        match program.functions.lookup(label) {
                            Some(block) => {
                                cursor.relocate(&block.instructions);
                                continue;
                            }
                            None => tracing::debug!(
                                label = %label,
                                "jump target not registered, falling through"
                            ),
                        }
                    }
                }
                Instruction::Call { label } => match program.functions.lookup(label) {
                    Some(block) => {
                        self.check_call_depth(depth + 1)?;
                        let exit =
                            self.execute_sequence(program, &block.instructions, depth + 1)?;
                        if exit == SequenceExit::Halted {
                            return Ok(SequenceExit::Halted);
                        }
                    }
                    None => {
                        tracing::debug!(label = %label, "call target not registered, skipping")
                    }
                },
                Instruction::Return => return Ok(SequenceExit::Returned),
                Instruction::Message { template } => {
                    self.output = message::render(template, &self.registers);
                }
                Instruction::End => return Ok(SequenceExit::Halted),
            }

            cursor.advance();
        }
    }

    fn tick(&mut self) -> Result<()> {
        self.steps += 1;
        match self.config.max_steps {
            Some(limit) if self.steps > limit => Err(Error::ExecutionLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    fn check_call_depth(&self, depth: usize) -> Result<()> {
        match self.config.max_call_depth {
            Some(limit) if depth > limit => Err(Error::CallDepthExceeded { limit }),
            _ => Ok(()),
        }
    }
}
