use thiserror::Error;

/// Errors raised while rendering a [`lexforge_compile::CompiledLexer`] as
/// target-language source. Distinct from [`lexforge_compile::CompileError`]:
/// by the time a `CompiledLexer` exists the model is semantically sound,
/// but names drawn verbatim from the DSL source may still be unusable in
/// the chosen target syntax.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("token `{name}` is a reserved word in the target language and cannot be used as an enum variant")]
    ReservedIdentifier { name: String },
}

pub type EmitResult<T> = Result<T, EmitError>;
