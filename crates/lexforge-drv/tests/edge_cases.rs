//! End-to-end CLI tests driving the `lexforge` binary over stdin/stdout.

use assert_cmd::Command;
use predicates::prelude::*;

fn lexforge() -> Command {
    Command::cargo_bin("lexforge").unwrap()
}

#[test]
fn test_edge_minimal_identity() {
    lexforge()
        .write_stdin(r#"state s initial: transition on("a") skip; ;"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("pub const CLASS_COUNT: u32 = 3;"))
        .stdout(predicate::str::contains("pub const STATE_COUNT: u32 = 1;"));
}

#[test]
fn test_edge_two_disjoint_sets() {
    lexforge()
        .write_stdin(
            r#"state s initial: transition on("ab") skip; transition on("c") skip; ;"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("pub const CLASS_COUNT: u32 = 4;"));
}

#[test]
fn test_edge_reclamation() {
    lexforge()
        .write_stdin(
            r#"state s initial: transition on("abc") skip; transition on("abc") skip; ;"#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("pub const CLASS_COUNT: u32 = 3;"));
}

#[test]
fn test_edge_default_rule_fills_row() {
    lexforge()
        .write_stdin(
            r#"
            state s initial: transition on("a") go(t) skip; transition skip; ;
            state t: transition skip; ;
            "#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("pub const STATE_COUNT: u32 = 2;"));
}

#[test]
fn test_edge_token_interning() {
    lexforge()
        .write_stdin(
            r#"
            state s initial:
              transition on("x") token(T1);
              transition on("y") token(T1);
              transition on("z") token(T2);
            ;
            "#,
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("enum Tokens"))
        .stdout(predicate::str::contains("T1 = 0,"))
        .stdout(predicate::str::contains("T2 = 1,"));
}

#[test]
fn test_edge_initial_state_conflict_is_a_semantic_error() {
    lexforge()
        .write_stdin(
            r#"
            state a initial: transition skip; ;
            state b initial: transition skip; ;
            "#,
        )
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_edge_verbose_traces_pipeline_phases() {
    lexforge()
        .arg("-v")
        .write_stdin(r#"state s initial: transition on("a") skip; ;"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("parsing..."))
        .stderr(predicate::str::contains("compiling..."))
        .stderr(predicate::str::contains("emitting..."));
}

#[test]
fn test_edge_emit_ir_dumps_state_table_without_compiling() {
    lexforge()
        .arg("--emit=ir")
        .write_stdin(r#"state s initial: transition on("a") go(nowhere); ;"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("RuleGroup"));
}

#[test]
fn test_edge_unrecognized_flag_is_a_usage_error() {
    lexforge()
        .arg("--bogus")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("usage error"));
}

#[test]
fn test_edge_unterminated_state_is_a_syntax_error() {
    lexforge().write_stdin("state").assert().failure();
}

#[test]
fn test_edge_redeclared_state_name_warns_but_succeeds() {
    lexforge()
        .write_stdin(
            r#"
            state s initial: transition on("a") skip; ;
            state s: transition on("b") go(s); ;
            "#,
        )
        .assert()
        .success()
        .stderr(predicate::str::contains("warning"));
}
