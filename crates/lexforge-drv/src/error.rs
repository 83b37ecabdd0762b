use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Parse(#[from] lexforge_dsl::ParseError),

    #[error("{0}")]
    Compile(#[from] lexforge_compile::CompileError),

    #[error("{0}")]
    Emit(#[from] lexforge_emit::EmitError),
}

pub type DriverResult<T> = Result<T, DriverError>;
