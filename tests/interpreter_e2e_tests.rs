//! End-to-end tests: whole programs through `run`

use regasm::{run, Error, Interpreter, Opcode, Register};

fn reg(letter: char) -> Register {
    Register::from_letter(letter).unwrap()
}

// ====================
// Sample Programs
// ====================

#[test]
fn test_factorial() {
    let source = include_str!("programs/factorial.asm");
    assert_eq!(run(source).unwrap(), "5! = 120");
}

#[test]
fn test_fibonacci() {
    let source = include_str!("programs/fibonacci.asm");
    assert_eq!(run(source).unwrap(), "Term 8 of Fibonacci series is: 21");
}

#[test]
fn test_gcd() {
    let source = include_str!("programs/gcd.asm");
    assert_eq!(run(source).unwrap(), "gcd(81, 153) = 9");
}

#[test]
fn test_power_with_recursive_calls() {
    let source = include_str!("programs/power.asm");
    assert_eq!(run(source).unwrap(), "2^10 = 1024");
}

#[test]
fn test_block_without_terminator_is_fatal() {
    let source = include_str!("programs/missing_end.asm");
    assert_eq!(
        run(source).unwrap_err(),
        Error::MalformedTermination {
            last: Some(Opcode::Message)
        }
    );
}

#[test]
fn test_mod_with_inline_comment_block_header() {
    let source = r#"
mov   a, 11           ; value1
mov   b, 3            ; value2
call  mod_func
msg   'mod(', a, ', ', b, ') = ', d        ; output
end

; Mod function
mod_func:
    mov   c, a        ; temp1
    div   c, b
    mul   c, b
    mov   d, a        ; temp2
    sub   d, c
    ret
"#;
    assert_eq!(run(source).unwrap(), "mod(11, 3) = 2");
}

// ====================
// Basic Semantics
// ====================

#[test]
fn test_simple_message() {
    assert_eq!(run("mov a, 5\nmsg 'a=', a\nend").unwrap(), "a=5");
}

#[test]
fn test_only_last_message_survives() {
    let source = "call foo\nmsg 'done'\nend\nfoo:\n    msg 'hi'\n    ret";
    assert_eq!(run(source).unwrap(), "done");
}

#[test]
fn test_intermediate_message_is_rendered() {
    let mut interpreter = Interpreter::new();
    // the run fails after `hi` has been rendered, so the buffer still holds it
    let source = "call foo\nmsg 'done'\nfoo:\n    msg 'hi'\n    ret";
    assert!(interpreter.run(source).unwrap_err().is_malformed());
    assert_eq!(interpreter.output(), "hi");
}

#[test]
fn test_arithmetic_without_terminator_is_fatal() {
    assert!(run("mov a, 1\nadd a, 1").unwrap_err().is_malformed());
}

#[test]
fn test_registers_after_run() {
    let mut interpreter = Interpreter::new();
    let source = "mov a, -17\nmov b, 5\ndiv a, b\nmov c, -17\nsub c, a\nmul b, -2\nend";
    interpreter.run(source).unwrap();
    let regs = interpreter.registers();
    assert_eq!(regs.get(reg('a')), -3);
    assert_eq!(regs.get(reg('b')), -10);
    assert_eq!(regs.get(reg('c')), -14);
    assert_eq!(regs.get(reg('z')), 0);
}

#[test]
fn test_negative_immediates_in_message_program() {
    let source = "mov a, -5\nadd a, -5\nmsg 'a is ', a\nend";
    assert_eq!(run(source).unwrap(), "a is -10");
}

#[test]
fn test_operands_without_commas() {
    assert_eq!(run("mov a 3\nadd a a\nmsg a\nend").unwrap(), "6");
}

#[test]
fn test_unknown_instructions_ignored() {
    let source = "mov a, 1\npush a\nnop\ninc a\nmsg a\nend";
    assert_eq!(run(source).unwrap(), "2");
}

#[test]
fn test_division_by_runtime_zero() {
    assert_eq!(
        run("mov a, 10\nmov b, 0\ndiv a, b\nmsg a\nend").unwrap_err(),
        Error::DivisionByZero
    );
}

#[test]
fn test_repeated_runs_are_identical() {
    let source = include_str!("programs/gcd.asm");
    let mut interpreter = Interpreter::new();
    let first = interpreter.run(source).unwrap();
    let first_regs = interpreter.registers().snapshot();
    let second = interpreter.run(source).unwrap();
    assert_eq!(first, second);
    assert_eq!(first_regs, interpreter.registers().snapshot());
    assert_eq!(run(source).unwrap(), first);
}
