//! Parser edge cases: one test per SyntaxError/SemanticError/Warning kind
//! named in §7, plus the grammar-level scenarios from §8.

use lexforge_util::Handler;

use crate::ast::OnSpec;
use crate::error::ParseError;
use crate::parser::parse;

fn parse_ok(src: &str) -> (crate::ast::StateTable, Handler) {
    let handler = Handler::new();
    let table = parse(src.as_bytes(), &handler).expect("expected parse to succeed");
    (table, handler)
}

fn parse_err(src: &str) -> ParseError {
    let handler = Handler::new();
    parse(src.as_bytes(), &handler).expect_err("expected parse to fail")
}

#[test]
fn minimal_single_rule_state() {
    let (table, handler) = parse_ok(r#"state s initial: transition on("a") skip; ;"#);
    assert_eq!(table.groups.len(), 1);
    assert_eq!(table.groups[0].name, "s");
    assert_eq!(table.groups[0].rules.len(), 1);
    assert_eq!(table.groups[0].rules[0].on, OnSpec::Chars(b"a".to_vec()));
    assert!(table.groups[0].rules[0].skip);
    assert_eq!(table.initial_state, Some(0));
    assert!(!handler.has_errors());
    assert_eq!(handler.warning_count(), 0);
}

#[test]
fn first_declared_state_is_initial_by_default() {
    let (table, _) = parse_ok(
        r#"
        state s: transition skip; ;
        state t: transition skip; ;
        "#,
    );
    assert_eq!(table.initial_state_id(), 0);
}

#[test]
fn repeated_state_name_appends_rules_and_warns() {
    let (table, handler) = parse_ok(
        r#"
        state s initial: transition on("a") skip; ;
        state s: transition on("b") skip; ;
        "#,
    );
    assert_eq!(table.groups.len(), 1);
    assert_eq!(table.groups[0].rules.len(), 2);
    assert_eq!(handler.warning_count(), 1);
}

#[test]
fn multiple_distinct_initial_states_is_an_error() {
    let err = parse_err(
        r#"
        state a initial: transition skip; ;
        state b initial: transition skip; ;
        "#,
    );
    assert!(matches!(err, ParseError::MultipleInitialStates { .. }));
}

#[test]
fn redeclaring_initial_on_the_same_state_is_not_an_error() {
    let (table, _) = parse_ok(
        r#"
        state a initial: transition skip; ;
        state a initial: transition skip; ;
        "#,
    );
    assert_eq!(table.initial_state, Some(0));
}

#[test]
fn on_end_alone_sets_eos_spec() {
    let (table, _) = parse_ok(r#"state s initial: transition on(end) failure("eof"); ;"#);
    assert_eq!(table.groups[0].rules[0].on, OnSpec::Eos);
}

#[test]
fn empty_on_string_is_a_semantic_error() {
    let err = parse_err(r#"state s initial: transition on("") skip; ;"#);
    assert!(matches!(err, ParseError::EmptyOnSet { .. }));
}

#[test]
fn duplicate_on_is_an_error() {
    let err = parse_err(r#"state s initial: transition on("a") on("b") skip; ;"#);
    assert!(matches!(err, ParseError::DuplicateOption { option: "on", .. }));
}

#[test]
fn duplicate_go_is_an_error() {
    let err = parse_err(
        r#"
        state s initial: transition on("a") go(t) go(t) skip; ;
        state t: transition skip; ;
        "#,
    );
    assert!(matches!(err, ParseError::DuplicateOption { option: "go", .. }));
}

#[test]
fn duplicate_token_is_an_error() {
    let err = parse_err(r#"state s initial: transition on("a") token(T) token(T) skip; ;"#);
    assert!(matches!(err, ParseError::DuplicateOption { option: "token", .. }));
}

#[test]
fn duplicate_failure_is_an_error() {
    let err = parse_err(r#"state s initial: transition failure("x") failure("y"); ;"#);
    assert!(matches!(err, ParseError::DuplicateOption { option: "failure", .. }));
}

#[test]
fn duplicate_keep_is_a_warning_not_an_error() {
    let (table, handler) = parse_ok(r#"state s initial: transition on("a") keep keep; ;"#);
    assert!(!handler.has_errors());
    assert_eq!(handler.warning_count(), 1);
    assert!(table.groups[0].rules[0].keep);
}

#[test]
fn duplicate_skip_is_a_warning() {
    let (_, handler) = parse_ok(r#"state s initial: transition on("a") skip skip; ;"#);
    assert_eq!(handler.warning_count(), 1);
}

#[test]
fn duplicate_clear_is_a_warning() {
    let (_, handler) = parse_ok(r#"state s initial: transition on("a") clear clear skip; ;"#);
    assert_eq!(handler.warning_count(), 1);
}

#[test]
fn unknown_option_is_a_syntax_error() {
    let err = parse_err(r#"state s initial: transition on("a") bogus; ;"#);
    assert!(matches!(err, ParseError::UnknownOption { .. }));
}

#[test]
fn missing_state_name_is_a_syntax_error() {
    let err = parse_err("state : transition skip; ;");
    assert!(matches!(err, ParseError::MissingStateName { .. }));
}

#[test]
fn missing_colon_is_a_syntax_error() {
    let err = parse_err("state s transition skip; ;");
    assert!(matches!(err, ParseError::MissingColon { .. }));
}

#[test]
fn missing_left_paren_is_a_syntax_error() {
    let err = parse_err(r#"state s initial: transition on "a") skip; ;"#);
    assert!(matches!(err, ParseError::MissingLeftParen { .. }));
}

#[test]
fn missing_right_paren_is_a_syntax_error() {
    let err = parse_err(r#"state s initial: transition on("a" skip; ;"#);
    assert!(matches!(err, ParseError::MissingRightParen { .. }));
}

#[test]
fn missing_target_state_is_a_syntax_error() {
    let err = parse_err(r#"state s initial: transition on("a") go() skip; ;"#);
    assert!(matches!(err, ParseError::MissingTargetState { .. }));
}

#[test]
fn missing_token_name_is_a_syntax_error() {
    let err = parse_err(r#"state s initial: transition on("a") token(); ;"#);
    assert!(matches!(err, ParseError::MissingTokenName { .. }));
}

#[test]
fn missing_failure_message_is_a_syntax_error() {
    let err = parse_err(r#"state s initial: transition failure(); ;"#);
    assert!(matches!(err, ParseError::MissingFailureMessage { .. }));
}

#[test]
fn missing_transition_terminator_is_a_syntax_error() {
    let err = parse_err(r#"state s initial: transition on("a") skip ;"#);
    assert!(matches!(err, ParseError::MissingTransitionTerminator { .. }));
}

#[test]
fn missing_state_terminator_is_a_syntax_error() {
    let err = parse_err(r#"state s initial: transition on("a") skip;"#);
    assert!(matches!(err, ParseError::MissingStateTerminator { .. }));
}

#[test]
fn missing_declaration_when_source_is_empty() {
    let err = parse_err("   \n\t  ");
    assert!(matches!(err, ParseError::MissingDeclaration { .. }));
}

#[test]
fn trailing_garbage_after_states_is_an_error() {
    let err = parse_err(r#"state s initial: transition skip; ; garbage"#);
    assert!(matches!(err, ParseError::TrailingInput { .. }));
}

#[test]
fn string_escapes_are_decoded() {
    let (table, _) = parse_ok(r#"state s initial: transition on("\n\r\t\f\v\x\"\\") skip; ;"#);
    let OnSpec::Chars(bytes) = &table.groups[0].rules[0].on else { panic!("expected Chars") };
    assert_eq!(bytes, b"\n\r\t\x0c\x0bx\"\\");
}

#[test]
fn go_keep_skip_clear_token_failure_all_parse_in_any_order() {
    let (table, _) = parse_ok(
        r#"
        state s initial: transition clear token(T) go(t) on("a"); ;
        state t: transition skip; ;
        "#,
    );
    let rule = &table.groups[0].rules[0];
    assert!(rule.clear);
    assert_eq!(rule.token.as_deref(), Some("T"));
    assert_eq!(rule.go.as_deref(), Some("t"));
    assert_eq!(rule.on, OnSpec::Chars(b"a".to_vec()));
}

#[test]
fn default_rule_omits_on() {
    let (table, _) = parse_ok(
        r#"
        state s initial: transition on("a") go(t) skip; transition skip; ;
        state t: transition skip; ;
        "#,
    );
    assert_eq!(table.groups[0].rules[1].on, OnSpec::None);
}

#[test]
fn byte_order_within_on_literal_does_not_affect_parse() {
    let (a, _) = parse_ok(r#"state s initial: transition on("abc") skip; ;"#);
    let (b, _) = parse_ok(r#"state s initial: transition on("cba") skip; ;"#);
    let OnSpec::Chars(a_bytes) = &a.groups[0].rules[0].on else { panic!() };
    let OnSpec::Chars(b_bytes) = &b.groups[0].rules[0].on else { panic!() };
    let mut a_sorted = a_bytes.clone();
    let mut b_sorted = b_bytes.clone();
    a_sorted.sort();
    b_sorted.sort();
    assert_eq!(a_sorted, b_sorted);
}
