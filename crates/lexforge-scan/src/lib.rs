//! Byte-oriented look-ahead scanner shared by the DSL tokenizer.
//!
//! The scanner owns nothing about the DSL's grammar — it only exposes
//! look-ahead, checkpoint/rollback, and position tracking over a byte
//! slice. Everything that decides what the bytes *mean* lives one layer up,
//! in `lexforge-dsl`.

mod error;
mod scanner;

pub use error::{ScanError, ScanResult};
pub use scanner::{Scanner, COMMIT_TRIM_THRESHOLD};
