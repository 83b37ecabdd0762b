use lexforge_util::Position;
use thiserror::Error;

/// Semantic errors raised while resolving the parsed [`lexforge_dsl::StateTable`]
/// into classes and transitions — the "compile" half of §7's SemanticError
/// taxonomy (the parser owns the grammar-level half).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("input character `{byte}` which is already in use specified for transition (state `{state}`)")]
    DuplicateByteInRule { byte: u8, state: String, position: Position },

    #[error("more than 254 live character classes would be required (state `{state}`)")]
    TooManyClasses { state: String, position: Position },

    #[error("infinite transition declared (state `{state}`): at least one of `keep`, `skip`, `go`, `failure` is needed")]
    InfiniteRule { state: String, position: Position },

    #[error("redefinition of default (with `on` option omitted) transition (state `{state}`)")]
    DuplicateDefaultRule { state: String, position: Position, first_position: Position },

    #[error("unknown next state `{name}` transition (state `{state}`)")]
    UnknownTargetState { name: String, state: String, position: Position },

    #[error("option `failure` is incompatible with `go`, `clear` and `token` options of transition (state `{state}`)")]
    FailureIncompatible { state: String, position: Position },

    #[error("option `token` is incompatible with `clear` option of transition (state `{state}`)")]
    TokenClearIncompatible { state: String, position: Position },

    #[error("option `keep` is incompatible with `skip` option of transition (state `{state}`)")]
    KeepSkipIncompatible { state: String, position: Position },
}

pub type CompileResult<T> = Result<T, CompileError>;
