//! Example: Execute register assembly programs from files
//!
//! Usage: cargo run --example run_file <program.asm> [--listing|--json]

use anyhow::{bail, Context, Result};
use regasm::{Interpreter, Lexer};
use std::env;
use std::fs;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("Usage: cargo run --example run_file <program.asm> [--listing|--json]");
    }

    let file_path = &args[1];
    let code = fs::read_to_string(file_path)
        .with_context(|| format!("reading program file '{}'", file_path))?;

    let program = Lexer::new(&code).lex();
    match args.get(2).map(String::as_str) {
        Some("--listing") => print!("{}", program),
        Some("--json") => println!("{}", program.to_json()?),
        Some(other) => bail!("unknown flag '{}'", other),
        None => {}
    }

    let mut interpreter = Interpreter::new();
    let output = interpreter
        .execute(&program)
        .with_context(|| format!("running '{}'", file_path))?;
    println!("{}", output);
    Ok(())
}
