//! Tests for jumps, calls and labeled blocks

use regasm::{lex, run, Error, ExecutionConfig, Interpreter, Opcode};

/// Runs `cmp left, right` followed by `op target` and reports whether the jump was taken
fn jump_taken(op: &str, left: i64, right: i64) -> bool {
    let source = format!(
        "mov a, {left}\nmov b, {right}\ncmp a, b\n{op} taken\nmsg 'fell'\nend\ntaken:\n    msg 'jumped'\n    ret\n"
    );
    match run(&source).unwrap().as_str() {
        "jumped" => true,
        "fell" => false,
        other => panic!("unexpected output {other:?}"),
    }
}

// ====================
// Conditional Jumps
// ====================

#[test]
fn test_jne() {
    assert!(jump_taken("jne", 1, 2));
    assert!(!jump_taken("jne", 2, 2));
}

#[test]
fn test_je() {
    assert!(jump_taken("je", -4, -4));
    assert!(!jump_taken("je", 4, -4));
}

#[test]
fn test_jge() {
    assert!(jump_taken("jge", 3, 3));
    assert!(jump_taken("jge", 4, 3));
    assert!(!jump_taken("jge", 2, 3));
}

#[test]
fn test_jg() {
    assert!(jump_taken("jg", 4, 3));
    assert!(!jump_taken("jg", 3, 3));
}

#[test]
fn test_jle() {
    assert!(jump_taken("jle", 3, 3));
    assert!(jump_taken("jle", -10, 3));
    assert!(!jump_taken("jle", 4, 3));
}

#[test]
fn test_jl() {
    assert!(jump_taken("jl", -10, 3));
    assert!(!jump_taken("jl", 3, 3));
}

#[test]
fn test_jmp_ignores_comparison() {
    assert!(jump_taken("jmp", 1, 2));
    assert!(jump_taken("jmp", 2, 2));
}

#[test]
fn test_compare_immediates() {
    let source = "cmp 5, -5\njg big\nmsg 'small'\nend\nbig:\n    msg 'big'\n    end\n";
    assert_eq!(run(source).unwrap(), "big");
}

#[test]
fn test_comparison_persists_until_next_cmp() {
    // the second jump reuses the first comparison even though `a` changed
    let source = "\
mov a, 1
cmp a, 1
inc a
jne wrong
je right
msg 'none'
end
wrong:
    msg 'wrong'
    end
right:
    msg 'right'
    end
";
    assert_eq!(run(source).unwrap(), "right");
}

// ====================
// Labels and Blocks
// ====================

#[test]
fn test_jump_to_bare_label_is_noop() {
    let source = "mov a, 1\njmp skip\ninc a\nskip:\ninc a\nmsg a\nend";
    assert_eq!(run(source).unwrap(), "3");
}

#[test]
fn test_call_to_unknown_label_is_noop() {
    assert_eq!(run("call missing\nmsg 'ok'\nend").unwrap(), "ok");
}

#[test]
fn test_jump_into_block_never_returns_to_jump_site() {
    let source = "\
mov a, 1
jmp block
mov a, 100
msg a
end
block:
    inc a
    msg a
    end
";
    assert_eq!(run(source).unwrap(), "2");
}

#[test]
fn test_ret_after_jump_ends_callers_invocation() {
    // inside `outer`, the jump to `leaf` replaces outer's sequence, so leaf's `ret`
    // returns straight to the top level
    let source = "\
call outer
msg 'back at top, a=', a
end
outer:
    jmp leaf
    mov a, 99
    ret
leaf:
    mov a, 7
    ret
";
    assert_eq!(run(source).unwrap(), "back at top, a=7");
}

#[test]
fn test_loop_via_self_jump() {
    let source = "\
mov a, 0
call count
msg 'a=', a
end
count:
    inc a
    cmp a, 10
    jl count
    ret
";
    assert_eq!(run(source).unwrap(), "a=10");
}

#[test]
fn test_nested_block_reachable_from_top_level() {
    let source = "\
call inner
msg 'x=', x
end
outer:
    ret
    inner:
        mov x, 42
        ret
";
    assert_eq!(run(source).unwrap(), "x=42");
}

#[test]
fn test_duplicate_labels_first_wins() {
    let source = "\
call f
msg r
end
f:
    mov r, 1
    ret
f:
    mov r, 2
    ret
";
    assert_eq!(run(source).unwrap(), "1");
}

#[test]
fn test_block_ending_in_conditional_jump_is_fatal() {
    let source = "\
call f
end
f:
    cmp a, 0
    je f
";
    assert_eq!(
        run(source).unwrap_err(),
        Error::MalformedTermination {
            last: Some(Opcode::JumpIfEqual)
        }
    );
}

#[test]
fn test_block_with_unrecognised_body_is_fatal_when_called() {
    let source = "call f\nend\nf:\n    nonsense here\n";
    assert_eq!(
        run(source).unwrap_err(),
        Error::MalformedTermination { last: None }
    );
}

#[test]
fn test_code_on_label_line() {
    assert_eq!(run("foo: mov a, 5\nmsg a\nend\n").unwrap(), "5");
    let source = "call foo\nmsg a\nend\nfoo:    mov a, 9\n    ret\n";
    assert_eq!(run(source).unwrap(), "9");
}

#[test]
fn test_end_in_called_block_halts() {
    let source = "call f\nmsg 'after'\nend\nf:\n    msg 'inside'\n    end\n";
    assert_eq!(run(source).unwrap(), "inside");
}

// ====================
// Limits
// ====================

#[test]
fn test_mutual_jump_loop_stopped_by_step_limit() {
    let source = "\
jmp ping
ping:
    jmp pong
pong:
    jmp ping
";
    let config = ExecutionConfig::default().with_max_steps(1_000);
    let mut interpreter = Interpreter::with_config(config);
    assert_eq!(
        interpreter.run(source).unwrap_err(),
        Error::ExecutionLimitExceeded { limit: 1_000 }
    );
    assert_eq!(interpreter.steps(), 1_001);
}

// ====================
// Listing
// ====================

#[test]
fn test_listing_lexes_back_to_same_program() {
    let program = lex(include_str!("programs/gcd.asm"));
    let listing = program.to_string();
    assert_eq!(lex(&listing), program);
    assert_eq!(
        Interpreter::new().execute(&program).unwrap(),
        "gcd(81, 153) = 9"
    );
}

#[test]
fn test_listing_keeps_block_with_unrecognised_body() {
    let program = lex("call f\nmsg 'after'\nend\nf:\n    nonsense here\n");
    assert!(program.functions.lookup("f").unwrap().instructions.is_empty());

    let relexed = lex(&program.to_string());
    assert_eq!(relexed, program);
    assert_eq!(
        Interpreter::new().execute(&relexed).unwrap_err(),
        Error::MalformedTermination { last: None }
    );
}

#[test]
fn test_json_dump() {
    let program = lex("mov a, 1\ncall f\nend\nf:\n    ret\n");
    let json = program.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["main"][0]["op"], "move");
    assert_eq!(value["main"][0]["dest"], "a");
    assert_eq!(value["main"][0]["src"]["immediate"], 1);
    assert_eq!(value["functions"][0]["label"], "f");
    assert_eq!(value["functions"][0]["instructions"][0]["op"], "return");
}
