//! Driver crate: CLI argument handling plus orchestration of the
//! parse → compile → emit pipeline, modeled on the teacher's
//! `faxc_drv::{Config, Session}` split — a plain options struct and a
//! session that owns the diagnostic handler for one translation.

mod error;

pub use error::{DriverError, DriverResult};

use std::io::{Read, Write};

use lexforge_emit::{Emitter, RustTableEmitter};
use lexforge_util::Handler;

/// Options controlling one translation run.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// `-v` / `--verbose`: trace each pipeline phase to stderr.
    pub verbose: bool,
    /// `--emit=ir`: dump the parsed state table instead of compiling it.
    pub emit_ir: bool,
}

/// Parses CLI arguments (excluding argv[0]) into a [`Config`].
///
/// There is no flag value syntax beyond `--emit=ir`; unrecognized arguments
/// are a usage error, matching the teacher driver's practice of rejecting
/// unknown flags rather than silently ignoring them.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> DriverResult<Config> {
    let mut config = Config::default();
    for arg in args {
        match arg.as_str() {
            "-v" | "--verbose" => config.verbose = true,
            "--emit=ir" => config.emit_ir = true,
            other => return Err(DriverError::Usage(format!("unrecognized argument `{other}`"))),
        }
    }
    Ok(config)
}

/// One translation invocation: owns the diagnostic handler and the config
/// that governs it.
pub struct Session {
    pub config: Config,
    pub handler: Handler,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config, handler: Handler::new() }
    }

    fn report_diagnostics(&self) {
        for diagnostic in self.handler.diagnostics() {
            eprintln!("{diagnostic}");
        }
    }

    /// Runs the full pipeline over `input`, writing generated source to
    /// `out`. Returns `Err` on the first syntax, semantic, or emit error;
    /// diagnostics accumulated along the way are always printed first.
    pub fn run(&mut self, input: &[u8], out: &mut impl Write) -> DriverResult<()> {
        if self.config.verbose {
            eprintln!("parsing...");
        }

        let table = match lexforge_dsl::parse(input, &self.handler) {
            Ok(table) => table,
            Err(err) => {
                self.report_diagnostics();
                return Err(err.into());
            }
        };

        self.report_diagnostics();

        if self.config.emit_ir {
            writeln!(out, "{table:#?}")?;
            return Ok(());
        }

        if self.config.verbose {
            eprintln!("compiling...");
        }

        let compiled = lexforge_compile::compile(&table)?;

        if self.config.verbose {
            eprintln!("emitting...");
        }

        let rendered = RustTableEmitter::new().emit(&compiled)?;
        out.write_all(rendered.as_bytes())?;

        Ok(())
    }
}

/// Entry point shared by `main`: reads all of stdin, runs the session, and
/// writes generated source to stdout.
pub fn main() -> DriverResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(args)?;

    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;

    let mut session = Session::new(config);
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    session.run(&input, &mut lock)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(config: Config, src: &str) -> DriverResult<String> {
        let mut session = Session::new(config);
        let mut out = Vec::new();
        session.run(src.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn unrecognized_argument_is_a_usage_error() {
        let err = parse_args(["--bogus".to_string()]).unwrap_err();
        assert!(matches!(err, DriverError::Usage(_)));
    }

    #[test]
    fn verbose_and_emit_ir_flags_parse() {
        let config = parse_args(["-v".to_string(), "--emit=ir".to_string()]).unwrap();
        assert!(config.verbose);
        assert!(config.emit_ir);
    }

    #[test]
    fn minimal_program_emits_rust_tables() {
        let out = run_to_string(
            Config::default(),
            r#"state s initial: transition on("a") skip; ;"#,
        )
        .unwrap();
        assert!(out.contains("pub const STATE_COUNT: u32 = 1;"));
    }

    #[test]
    fn emit_ir_dumps_debug_of_the_state_table_and_skips_compilation() {
        let out = run_to_string(
            Config { emit_ir: true, ..Config::default() },
            r#"state s initial: transition on("a") skip; ;"#,
        )
        .unwrap();
        assert!(out.contains("RuleGroup"));
    }

    #[test]
    fn syntax_error_aborts_before_compilation() {
        let err = run_to_string(Config::default(), "state").unwrap_err();
        assert!(matches!(err, DriverError::Parse(_)));
    }

    #[test]
    fn semantic_error_from_compile_stage_propagates() {
        let err = run_to_string(
            Config::default(),
            r#"state s initial: transition on("a") go(nowhere); ;"#,
        )
        .unwrap_err();
        assert!(matches!(err, DriverError::Compile(_)));
    }
}
