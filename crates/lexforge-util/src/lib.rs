//! Shared foundation types for the lexforge translator: source positions,
//! diagnostic collection, and the ordered interner used for token and
//! failure-message tables.
//!
//! Each downstream crate (`lexforge-scan`, `lexforge-dsl`,
//! `lexforge-compile`, `lexforge-emit`, `lexforge-drv`) defines its own
//! `thiserror`-derived error enum for its stage; this crate only owns the
//! types those enums and the diagnostic handler share.

mod diagnostic;
mod intern;
mod position;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use intern::{InternId, Interner};
pub use position::Position;

/// Re-exported for the unordered `name -> index` lookups in this crate's
/// consumers (e.g. `StateTable::state_map`), where `rustc-hash`'s
/// non-cryptographic hasher is a better fit than `indexmap`'s
/// insertion-ordered map — ordering there is already carried by the
/// parallel `Vec` each such map indexes into.
pub use rustc_hash::FxHashMap;
