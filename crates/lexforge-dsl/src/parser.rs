//! Parser combinators over [`Scanner`] implementing the grammar of §4.2:
//!
//! ```text
//! file        := state+
//! state       := 'state' Ident ['initial'] ':' transition* ';'
//! transition  := 'transition' option* ';'
//! option      := 'on' '(' ( 'end' | String ) ')'
//!              | 'go' '(' Ident ')'
//!              | 'token' '(' Ident ')'
//!              | 'failure' '(' String ')'
//!              | 'keep' | 'skip' | 'clear'
//! ```
//!
//! Each combinator is an explicit try/commit method rather than the
//! reference's overloaded streaming operator (see the design note in
//! `SPEC_FULL.md` §9): it returns `bool`/`Option<T>` and rewinds the
//! scanner itself on failure, so callers chain with `?`/`if` instead of a
//! sentinel trailing value.

use lexforge_scan::Scanner;
use lexforge_util::{Handler, Position};

use crate::ast::{OnSpec, Rule, StateTable};
use crate::error::{ParseError, ParseResult};

fn is_space_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Thin wrapper over [`Scanner`] exposing the DSL's lexical combinators.
struct Parser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { scanner: Scanner::new(input) }
    }

    fn position(&self) -> Position {
        self.scanner.position()
    }

    fn at_end(&self) -> bool {
        self.scanner.at_end()
    }

    /// Unconditionally consumes whitespace. Never fails.
    fn skip_ws(&mut self) {
        self.scanner.begin_checkpoint(false);
        self.scanner.get_while(|b, _| is_space_byte(b));
        self.scanner.commit_checkpoint();
        self.scanner.set_ok(true);
    }

    /// Tries to match the exact keyword `kw` as a maximal identifier run.
    /// Rewinds and returns `false` on any mismatch, including a longer or
    /// shorter identifier.
    fn try_keyword(&mut self, kw: &str) -> bool {
        self.scanner.begin_checkpoint(true);
        let bytes = self.scanner.get_while(|b, idx| {
            if idx == 0 { is_ident_start(b) } else { is_ident_continue(b) }
        });
        if bytes == kw.as_bytes() {
            self.scanner.commit_checkpoint();
            self.scanner.set_ok(true);
            true
        } else {
            let _ = self.scanner.rollback(0);
            self.scanner.set_ok(false);
            false
        }
    }

    /// Tries to match an identifier, returning its text.
    fn try_ident(&mut self) -> Option<String> {
        self.scanner.begin_checkpoint(false);
        let bytes = self.scanner.get_while(|b, idx| {
            if idx == 0 { is_ident_start(b) } else { is_ident_continue(b) }
        });
        if bytes.is_empty() {
            let _ = self.scanner.rollback(0);
            self.scanner.set_ok(false);
            None
        } else {
            self.scanner.commit_checkpoint();
            self.scanner.set_ok(true);
            Some(String::from_utf8_lossy(&bytes).into_owned())
        }
    }

    /// Tries to match a single delimiter byte.
    fn try_delim(&mut self, expected: u8) -> bool {
        self.scanner.begin_checkpoint(true);
        match self.scanner.get_byte() {
            Some(b) if b == expected => {
                self.scanner.commit_checkpoint();
                self.scanner.set_ok(true);
                true
            }
            _ => {
                let _ = self.scanner.rollback(0);
                self.scanner.set_ok(false);
                false
            }
        }
    }

    /// Tries to match a `"..."` string literal with the escapes of §4.2:
    /// `\n \r \t \f \v`, and `\x` for any other byte `x` (including `\\`
    /// and `\"`) meaning "the literal byte `x`".
    fn try_string(&mut self) -> Option<String> {
        self.scanner.begin_checkpoint(true);
        match self.scanner.get_byte() {
            Some(b'"') => {}
            _ => {
                let _ = self.scanner.rollback(0);
                self.scanner.set_ok(false);
                return None;
            }
        }

        let mut value = Vec::new();
        loop {
            match self.scanner.get_byte() {
                Some(b'"') => {
                    self.scanner.commit_checkpoint();
                    self.scanner.set_ok(true);
                    return Some(String::from_utf8_lossy(&value).into_owned());
                }
                Some(b'\\') => match self.scanner.get_byte() {
                    Some(b'n') => value.push(b'\n'),
                    Some(b'r') => value.push(b'\r'),
                    Some(b't') => value.push(b'\t'),
                    Some(b'f') => value.push(0x0c),
                    Some(b'v') => value.push(0x0b),
                    Some(c) => value.push(c),
                    None => {
                        let _ = self.scanner.rollback(0);
                        self.scanner.set_ok(false);
                        return None;
                    }
                },
                Some(c) => value.push(c),
                None => {
                    let _ = self.scanner.rollback(0);
                    self.scanner.set_ok(false);
                    return None;
                }
            }
        }
    }

    fn expect_lparen(&mut self) -> ParseResult<()> {
        self.skip_ws();
        let position = self.position();
        if self.try_delim(b'(') {
            Ok(())
        } else {
            Err(ParseError::MissingLeftParen { position })
        }
    }

    fn expect_rparen(&mut self) -> ParseResult<()> {
        self.skip_ws();
        let position = self.position();
        if self.try_delim(b')') {
            Ok(())
        } else {
            Err(ParseError::MissingRightParen { position })
        }
    }
}

/// Parses a complete DSL source into a [`StateTable`].
///
/// Warnings (redeclared state names, duplicate idempotent flags) are
/// reported through `handler` and do not abort the parse. The first
/// error aborts and is returned.
pub fn parse(input: &[u8], handler: &Handler) -> ParseResult<StateTable> {
    let mut parser = Parser::new(input);
    let mut table = StateTable::new();

    loop {
        parser.skip_ws();
        let state_position = parser.position();
        if !parser.try_keyword("state") {
            break;
        }
        parse_state(&mut parser, &mut table, handler, state_position)?;
    }

    parser.skip_ws();
    if parser.at_end() {
        if table.groups.is_empty() {
            return Err(ParseError::MissingDeclaration { position: parser.position() });
        }
        Ok(table)
    } else {
        Err(ParseError::TrailingInput { position: parser.position() })
    }
}

fn parse_state(
    parser: &mut Parser<'_>,
    table: &mut StateTable,
    handler: &Handler,
    state_position: Position,
) -> ParseResult<()> {
    parser.skip_ws();
    let name_position = parser.position();
    let name = parser
        .try_ident()
        .ok_or(ParseError::MissingStateName { position: name_position })?;

    parser.skip_ws();
    let is_initial = parser.try_keyword("initial");

    let colon_position = parser.position();
    parser.skip_ws();
    if !parser.try_delim(b':') {
        return Err(ParseError::MissingColon { position: colon_position });
    }

    let (state_id, existed) = table.group_index(&name, state_position);
    if existed {
        handler.warning(format!("redefinition of state `{name}`"), state_position);
    }

    if is_initial {
        match table.initial_state {
            Some(existing) if existing != state_id => {
                let first_name = table.groups[existing].name.clone();
                let first_position = table.groups[existing].position;
                return Err(ParseError::MultipleInitialStates {
                    name: first_name,
                    position: state_position,
                    first_position,
                });
            }
            _ => table.initial_state = Some(state_id),
        }
    }

    loop {
        parser.skip_ws();
        let transition_position = parser.position();
        if !parser.try_keyword("transition") {
            break;
        }
        let rule = parse_transition(parser, handler, transition_position)?;
        table.groups[state_id].rules.push(rule);
    }

    parser.skip_ws();
    let terminator_position = parser.position();
    if !parser.try_delim(b';') {
        return Err(ParseError::MissingStateTerminator { position: terminator_position });
    }
    Ok(())
}

fn parse_transition(
    parser: &mut Parser<'_>,
    handler: &Handler,
    transition_position: Position,
) -> ParseResult<Rule> {
    let mut rule = Rule::new(transition_position);

    let mut on_position: Option<Position> = None;
    let mut go_position: Option<Position> = None;
    let mut token_position: Option<Position> = None;
    let mut failure_position: Option<Position> = None;

    loop {
        parser.skip_ws();
        let option_position = parser.position();
        let Some(name) = parser.try_ident() else { break };

        match name.as_str() {
            "on" => {
                if let Some(first_position) = on_position {
                    return Err(ParseError::DuplicateOption {
                        option: "on",
                        position: option_position,
                        first_position,
                    });
                }
                on_position = Some(option_position);

                parser.expect_lparen()?;
                parser.skip_ws();
                let value_position = parser.position();
                if parser.try_keyword("end") {
                    rule.on = OnSpec::Eos;
                } else if let Some(s) = parser.try_string() {
                    rule.on = OnSpec::Chars(s.into_bytes());
                } else {
                    rule.on = OnSpec::Chars(Vec::new());
                }
                let is_empty_chars = matches!(&rule.on, OnSpec::Chars(v) if v.is_empty());
                if is_empty_chars {
                    return Err(ParseError::EmptyOnSet { position: value_position });
                }
                parser.expect_rparen()?;
            }
            "go" => {
                if let Some(first_position) = go_position {
                    return Err(ParseError::DuplicateOption {
                        option: "go",
                        position: option_position,
                        first_position,
                    });
                }
                go_position = Some(option_position);

                parser.expect_lparen()?;
                parser.skip_ws();
                let target_position = parser.position();
                let target = parser
                    .try_ident()
                    .ok_or(ParseError::MissingTargetState { position: target_position })?;
                rule.go = Some(target);
                parser.expect_rparen()?;
            }
            "token" => {
                if let Some(first_position) = token_position {
                    return Err(ParseError::DuplicateOption {
                        option: "token",
                        position: option_position,
                        first_position,
                    });
                }
                token_position = Some(option_position);

                parser.expect_lparen()?;
                parser.skip_ws();
                let name_position = parser.position();
                let token_name = parser
                    .try_ident()
                    .ok_or(ParseError::MissingTokenName { position: name_position })?;
                rule.token = Some(token_name);
                parser.expect_rparen()?;
            }
            "failure" => {
                if let Some(first_position) = failure_position {
                    return Err(ParseError::DuplicateOption {
                        option: "failure",
                        position: option_position,
                        first_position,
                    });
                }
                failure_position = Some(option_position);

                parser.expect_lparen()?;
                parser.skip_ws();
                let message_position = parser.position();
                let message = parser
                    .try_string()
                    .ok_or(ParseError::MissingFailureMessage { position: message_position })?;
                rule.failure = Some(message);
                parser.expect_rparen()?;
            }
            "keep" => {
                if rule.keep {
                    handler.warning("redefinition of option `keep`", option_position);
                }
                rule.keep = true;
            }
            "skip" => {
                if rule.skip {
                    handler.warning("redefinition of option `skip`", option_position);
                }
                rule.skip = true;
            }
            "clear" => {
                if rule.clear {
                    handler.warning("redefinition of option `clear`", option_position);
                }
                rule.clear = true;
            }
            other => {
                return Err(ParseError::UnknownOption {
                    name: other.to_string(),
                    position: option_position,
                });
            }
        }
    }

    parser.skip_ws();
    let terminator_position = parser.position();
    if !parser.try_delim(b';') {
        return Err(ParseError::MissingTransitionTerminator { position: terminator_position });
    }
    Ok(rule)
}
