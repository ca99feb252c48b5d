use super::line::{label_name, opens_indent, split_head, SourceLine};
use super::token::Opcode;
use crate::parser::{parse_instruction, Block, FunctionTable, Instruction, Program};

/// Default number of spaces that opens a block body
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Line-oriented lexer for register assembly source
///
/// Produces the top-level instruction sequence and registers every labeled, indented
/// block it meets into a [`FunctionTable`]. Block bodies are lexed recursively with the
/// same grammar, so blocks nested inside blocks land in the same table.
///
/// The lexer never fails: lines it cannot make sense of are skipped.
pub struct Lexer<'a> {
    /// Source split into physical lines
    lines: Vec<SourceLine<'a>>,
    /// Index of the next line to consume
    current: usize,
    /// Spaces that count as one indentation step
    indent_width: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over program text
    pub fn new(source: &'a str) -> Self {
        Lexer {
            lines: SourceLine::split(source),
            current: 0,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }

    /// Sets the number of spaces that opens a block body (a tab always does)
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Lexes the whole text into a fresh [`Program`]
    pub fn lex(mut self) -> Program {
        let mut functions = FunctionTable::new();
        let main = self.lex_into(&mut functions);
        Program { main, functions }
    }

    /// Lexes the remaining lines, registering blocks into `functions`, and returns the
    /// instruction sequence of this scope
    pub fn lex_into(&mut self, functions: &mut FunctionTable) -> Vec<Instruction> {
        let mut instructions = Vec::new();

        while let Some(line) = self.advance() {
            let code = line.code();
            if code.is_empty() {
                continue;
            }
            self.lex_code(code, line.number, &mut instructions, functions);
        }

        instructions
    }

    /// Dispatches one line of code on its first token
    fn lex_code(
        &mut self,
        code: &str,
        number: usize,
        instructions: &mut Vec<Instruction>,
        functions: &mut FunctionTable,
    ) {
        let (head, rest) = split_head(code);
        if let Some(opcode) = Opcode::from_keyword(head) {
            match parse_instruction(opcode, rest) {
                Ok(instruction) => instructions.push(instruction),
                Err(err) => tracing::debug!(
                    line = number,
                    error = %err,
                    "skipping malformed instruction"
                ),
            }
        } else if let Some(label) = label_name(head) {
            // whitespace between the label and code sharing its line
            let gap = &code[head.len()..code.len() - rest.len()];
            if !rest.is_empty() && opens_indent(gap, self.indent_width) {
                self.lex_block(label, Some(rest), functions);
            } else {
                self.lex_block(label, None, functions);
                if !rest.is_empty() {
                    self.lex_code(rest, number, instructions, functions);
                }
            }
        } else {
            tracing::debug!(line = number, token = head, "skipping unrecognized line");
        }
    }

    /// Collects the indented body following `label` and registers it as a block.
    /// `inline` is code indented past the label on its own line, which opens the body.
    /// Bare labels consume nothing.
    fn lex_block(&mut self, label: &str, inline: Option<&str>, functions: &mut FunctionTable) {
        let mut body = String::new();
        let mut has_code = false;

        if let Some(first) = inline {
            body.push_str(first);
            body.push('\n');
            has_code = true;
        }

        while let Some(line) = self.peek() {
            if line.is_indented(self.indent_width) {
                body.push_str(line.dedent(self.indent_width));
                body.push('\n');
                has_code |= !line.is_blank();
                self.current += 1;
                continue;
            }

            // an unindented comment inside a body does not close it
            let resumes = self
                .lines
                .get(self.current + 1)
                .is_some_and(|next| next.is_indented(self.indent_width));
            if !body.is_empty() && line.is_comment_only() && resumes {
                self.current += 1;
                continue;
            }
            break;
        }

        if !has_code {
            tracing::debug!(label, "label has no indented body, not registered");
            return;
        }

        let instructions = Lexer::new(&body)
            .with_indent_width(self.indent_width)
            .lex_into(functions);
        functions.register(Block {
            label: label.to_string(),
            instructions,
        });
    }

    fn advance(&mut self) -> Option<SourceLine<'a>> {
        let line = self.lines.get(self.current).copied();
        if line.is_some() {
            self.current += 1;
        }
        line
    }

    fn peek(&self) -> Option<SourceLine<'a>> {
        self.lines.get(self.current).copied()
    }
}
