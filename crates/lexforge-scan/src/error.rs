use thiserror::Error;

/// Failures intrinsic to the scanner's checkpoint/rollback contract.
///
/// These never surface to the DSL user — a combinator that hits one of
/// these has misused the scanner, not described a malformed input — but the
/// type exists so the contract is checked rather than assumed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("rollback(0) with no open checkpoint")]
    NoOpenCheckpoint,

    #[error("rollback({requested}) requested but only {available} buffered bytes are available")]
    InsufficientBuffer { requested: usize, available: usize },
}

pub type ScanResult<T> = Result<T, ScanError>;
