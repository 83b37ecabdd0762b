use lexforge_dsl::parse;
use lexforge_util::Handler;

use crate::{compile, Action, CompileError, Mode};

fn compiled(src: &str) -> crate::CompiledLexer {
    let handler = Handler::new();
    let table = parse(src.as_bytes(), &handler).expect("parse");
    compile(&table).expect("compile")
}

fn compile_err(src: &str) -> CompileError {
    let handler = Handler::new();
    let table = parse(src.as_bytes(), &handler).expect("parse");
    compile(&table).expect_err("expected a compile error")
}

#[test]
fn minimal_identity() {
    let c = compiled(r#"state s initial: transition on("a") skip; ;"#);
    assert_eq!(c.state_count, 1);
    assert_eq!(c.class_count, 3);
    assert_eq!(c.class_map[b'a' as usize], 1);
    assert_eq!(c.class_map[0], 0);
    assert_eq!(c.initial_state_id, 0);

    let t = c.transitions[0][1];
    assert_eq!(t.next_state, 0);
    assert_eq!(t.action, Action::Continue);
    assert_eq!(t.mode, Mode::Skip);
    assert_eq!(t.arg, 0);

    for (class, cell) in c.transitions[0].iter().enumerate() {
        if class != 1 {
            assert_eq!(*cell, Default::default(), "class {class} should be Invalid");
        }
    }
}

#[test]
fn two_disjoint_sets() {
    let c = compiled(
        r#"state s initial: transition on("ab") skip; transition on("c") skip; ;"#,
    );
    assert_eq!(c.class_count, 4);
    assert_eq!(c.class_map[b'a' as usize], c.class_map[b'b' as usize]);
    assert_eq!(c.class_map[b'a' as usize], 1);
    assert_eq!(c.class_map[b'c' as usize], 2);
}

#[test]
fn reclamation_returns_max_class_id_to_one() {
    let c = compiled(
        r#"state s initial: transition on("abc") skip; transition on("abc") skip; ;"#,
    );
    // class 0 = everything else, class 1 = {a,b,c}, class 2 = EOS.
    assert_eq!(c.class_count, 3);
}

#[test]
fn default_rule_fills_the_row() {
    let c = compiled(
        r#"
        state s initial: transition on("a") go(t) skip; transition skip; ;
        state t: transition skip; ;
        "#,
    );
    let a_class = c.class_map[b'a' as usize] as usize;
    for (class, cell) in c.transitions[0].iter().enumerate() {
        if class != a_class {
            assert_eq!(cell.action, Action::Continue);
            assert_eq!(cell.mode, Mode::Skip);
            assert_eq!(cell.next_state, 0);
        } else {
            assert_eq!(cell.next_state, 1);
        }
    }
}

#[test]
fn token_interning_shares_ids_for_repeated_names() {
    let c = compiled(
        r#"
        state s initial:
          transition on("x") token(T1);
          transition on("y") token(T1);
          transition on("z") token(T2);
        ;
        "#,
    );
    assert_eq!(c.tokens, vec!["T1".to_string(), "T2".to_string()]);
    let x_class = c.class_map[b'x' as usize] as usize;
    let y_class = c.class_map[b'y' as usize] as usize;
    let z_class = c.class_map[b'z' as usize] as usize;
    assert_eq!(c.transitions[0][x_class].arg, 0);
    assert_eq!(c.transitions[0][y_class].arg, 0);
    assert_eq!(c.transitions[0][z_class].arg, 1);
    assert_eq!(c.transitions[0][x_class].action, Action::Token);
}

#[test]
fn on_end_alone_occupies_only_the_eos_class() {
    let c = compiled(r#"state s initial: transition on(end) failure("unterminated"); ;"#);
    let eos_class = (c.class_count - 1) as usize;
    assert_eq!(c.transitions[0][eos_class].action, Action::Failure);
    assert_eq!(c.failure_messages, vec!["unterminated".to_string()]);
    for class in 0..eos_class {
        assert_eq!(c.transitions[0][class].action, Action::Invalid);
    }
}

#[test]
fn later_rule_wins_for_a_shared_byte() {
    let c = compiled(
        r#"
        state s initial: transition on("a") go(s) skip; transition on("ab") go(s) clear; ;
        "#,
    );
    let class = c.class_map[b'a' as usize] as usize;
    assert_eq!(c.transitions[0][class].action, Action::Clear);
}

#[test]
fn default_rule_in_a_non_initial_state_self_loops_rather_than_jumping_to_state_zero() {
    let c = compiled(
        r#"
        state s initial: transition on("a") go(t) skip; ;
        state t: transition on("a") go(s) skip; transition skip; ;
        "#,
    );
    let a_class = c.class_map[b'a' as usize] as usize;
    for (class, cell) in c.transitions[1].iter().enumerate() {
        if class != a_class {
            assert_eq!(cell.next_state, 1, "default rule in state `t` must target itself");
        }
    }
}

#[test]
fn failure_rule_in_a_non_initial_state_reports_that_state_as_next_state() {
    let c = compiled(
        r#"
        state s initial: transition on("a") go(t) skip; ;
        state t: transition on(end) failure("bad"); transition skip; ;
        "#,
    );
    let eos_class = (c.class_count - 1) as usize;
    assert_eq!(c.transitions[1][eos_class].next_state, 1);
}

#[test]
fn unknown_target_state_is_a_compile_error() {
    let err = compile_err(r#"state s initial: transition on("a") go(nowhere); ;"#);
    assert!(matches!(err, CompileError::UnknownTargetState { name, .. } if name == "nowhere"));
}

#[test]
fn failure_incompatible_with_go() {
    let err = compile_err(
        r#"state s initial: transition on("a") failure("bad") go(s); ;"#,
    );
    assert!(matches!(err, CompileError::FailureIncompatible { .. }));
}

#[test]
fn token_incompatible_with_clear() {
    let err = compile_err(r#"state s initial: transition on("a") token(T1) clear; ;"#);
    assert!(matches!(err, CompileError::TokenClearIncompatible { .. }));
}

#[test]
fn keep_incompatible_with_skip() {
    let err = compile_err(r#"state s initial: transition on("a") keep skip; ;"#);
    assert!(matches!(err, CompileError::KeepSkipIncompatible { .. }));
}

#[test]
fn empty_group_with_only_a_default_rule_still_compiles() {
    let c = compiled(r#"state s initial: transition clear; ;"#);
    for cell in &c.transitions[0] {
        assert_eq!(cell.action, Action::Clear);
    }
}
