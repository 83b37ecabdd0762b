//! Renders a [`CompiledLexer`] as a standalone `.rs` source file defining
//! the same constants the teacher's `faxc_gen::AsmGenerator` accumulates
//! assembly into: a `String` output buffer with an indent counter, built up
//! with `write!`/`writeln!` rather than a templating engine.

use std::fmt::Write as _;

use lexforge_compile::{Action, CompiledLexer, Mode};

use crate::error::EmitResult;
use crate::escape::escape_str;
use crate::identifiers::check_identifier;
use crate::Emitter;

/// Emits tables as plain Rust source: a module of `pub const` items plus a
/// `Transition` struct definition, mirroring the field layout and naming of
/// the generated output schema.
#[derive(Default)]
pub struct RustTableEmitter {
    output: String,
    indent: usize,
}

impl RustTableEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn emit_header(&mut self, lexer: &CompiledLexer) {
        self.line(&format!("pub const CHARSET_SIZE: u32 = {};", lexer.charset_size));
        self.line(&format!("pub const CLASS_COUNT: u32 = {};", lexer.class_count));
        self.line(&format!("pub const STATE_COUNT: u32 = {};", lexer.state_count));
        self.line(&format!("pub const INITIAL_STATE_ID: u32 = {};", lexer.initial_state_id));
        self.output.push('\n');
    }

    fn emit_class_map(&mut self, lexer: &CompiledLexer) {
        self.line("pub const CLASS_MAP: [u8; CHARSET_SIZE as usize] = [");
        self.indent += 1;
        for chunk in lexer.class_map.chunks(16) {
            let mut row = String::new();
            for class in chunk {
                let _ = write!(row, "{class:3}, ");
            }
            self.line(row.trim_end());
        }
        self.indent -= 1;
        self.line("];");
        self.output.push('\n');
    }

    fn emit_failure_messages(&mut self, lexer: &CompiledLexer) {
        if lexer.failure_messages.is_empty() {
            return;
        }
        self.line("pub const FAILURE_MESSAGES: &[&str] = &[");
        self.indent += 1;
        for message in &lexer.failure_messages {
            self.line(&format!("\"{}\",", escape_str(message)));
        }
        self.indent -= 1;
        self.line("];");
        self.output.push('\n');
    }

    fn emit_tokens(&mut self, lexer: &CompiledLexer) -> EmitResult<()> {
        if lexer.tokens.is_empty() {
            return Ok(());
        }
        for token in &lexer.tokens {
            check_identifier(token)?;
        }
        self.line("#[derive(Clone, Copy, Debug, PartialEq, Eq)]");
        self.line("#[repr(u32)]");
        self.line("pub enum Tokens {");
        self.indent += 1;
        for (index, token) in lexer.tokens.iter().enumerate() {
            self.line(&format!("{token} = {index},"));
        }
        self.indent -= 1;
        self.line("}");
        self.output.push('\n');
        Ok(())
    }

    fn emit_transition_type(&mut self) {
        self.line("#[derive(Clone, Copy, Debug, PartialEq, Eq)]");
        self.line("pub struct Transition {");
        self.indent += 1;
        self.line("pub next_state: u32,");
        self.line("pub action: u8,");
        self.line("pub mode: u8,");
        self.line("pub arg: u32,");
        self.indent -= 1;
        self.line("}");
        self.output.push('\n');

        self.line("pub const ACTION_INVALID: u8 = 0;");
        self.line("pub const ACTION_CONTINUE: u8 = 1;");
        self.line("pub const ACTION_CLEAR: u8 = 2;");
        self.line("pub const ACTION_TOKEN: u8 = 3;");
        self.line("pub const ACTION_FAILURE: u8 = 4;");
        self.output.push('\n');

        self.line("pub const MODE_LEAVE: u8 = 0;");
        self.line("pub const MODE_KEEP: u8 = 1;");
        self.line("pub const MODE_SKIP: u8 = 2;");
        self.output.push('\n');
    }

    fn emit_transitions(&mut self, lexer: &CompiledLexer) {
        self.line("pub const TRANSITIONS: &[&[Transition]] = &[");
        self.indent += 1;
        for row in &lexer.transitions {
            let mut cells = String::from("&[");
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    cells.push(' ');
                }
                let _ = write!(
                    cells,
                    "Transition {{ next_state: {}, action: {}, mode: {}, arg: {} }},",
                    cell.next_state,
                    action_const(cell.action),
                    mode_const(cell.mode),
                    cell.arg,
                );
            }
            cells.push_str("],");
            self.line(&cells);
        }
        self.indent -= 1;
        self.line("];");
    }
}

fn action_const(action: Action) -> &'static str {
    match action {
        Action::Invalid => "ACTION_INVALID",
        Action::Continue => "ACTION_CONTINUE",
        Action::Clear => "ACTION_CLEAR",
        Action::Token => "ACTION_TOKEN",
        Action::Failure => "ACTION_FAILURE",
    }
}

fn mode_const(mode: Mode) -> &'static str {
    match mode {
        Mode::Leave => "MODE_LEAVE",
        Mode::Keep => "MODE_KEEP",
        Mode::Skip => "MODE_SKIP",
    }
}

impl Emitter for RustTableEmitter {
    fn emit(&mut self, lexer: &CompiledLexer) -> EmitResult<String> {
        self.output.clear();
        self.indent = 0;

        self.emit_header(lexer);
        self.emit_class_map(lexer);
        self.emit_failure_messages(lexer);
        self.emit_tokens(lexer)?;
        self.emit_transition_type();
        self.emit_transitions(lexer);

        Ok(std::mem::take(&mut self.output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexforge_compile::compile;
    use lexforge_dsl::parse;
    use lexforge_util::Handler;

    fn lexer(src: &str) -> CompiledLexer {
        let handler = Handler::new();
        let table = parse(src.as_bytes(), &handler).expect("parse");
        compile(&table).expect("compile")
    }

    #[test]
    fn minimal_identity_emits_expected_constants() {
        let l = lexer(r#"state s initial: transition on("a") skip; ;"#);
        let out = RustTableEmitter::new().emit(&l).unwrap();
        assert!(out.contains("pub const CHARSET_SIZE: u32 = 256;"));
        assert!(out.contains("pub const CLASS_COUNT: u32 = 3;"));
        assert!(out.contains("pub const STATE_COUNT: u32 = 1;"));
        assert!(out.contains("pub const INITIAL_STATE_ID: u32 = 0;"));
        assert!(out.contains("pub const TRANSITIONS"));
        assert!(!out.contains("FAILURE_MESSAGES"));
        assert!(!out.contains("enum Tokens"));
    }

    #[test]
    fn failure_messages_are_escaped_and_emitted() {
        let l = lexer(r#"state s initial: transition on(end) failure("bad\nstring"); ;"#);
        let out = RustTableEmitter::new().emit(&l).unwrap();
        assert!(out.contains("pub const FAILURE_MESSAGES: &[&str] = &["));
        assert!(out.contains("\"bad\\nstring\","));
    }

    #[test]
    fn tokens_emit_a_dense_enum_in_first_seen_order() {
        let l = lexer(
            r#"
            state s initial:
              transition on("x") token(T1);
              transition on("y") token(T1);
              transition on("z") token(T2);
            ;
            "#,
        );
        let out = RustTableEmitter::new().emit(&l).unwrap();
        let t1_pos = out.find("T1 = 0,").unwrap();
        let t2_pos = out.find("T2 = 1,").unwrap();
        assert!(t1_pos < t2_pos);
    }

    #[test]
    fn reserved_token_name_is_rejected() {
        let l = lexer(r#"state s initial: transition on("x") token(match); ;"#);
        let err = RustTableEmitter::new().emit(&l).unwrap_err();
        assert!(matches!(err, crate::EmitError::ReservedIdentifier { .. }));
    }
}
