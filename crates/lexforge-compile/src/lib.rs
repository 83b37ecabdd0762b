//! Resolves a parsed [`lexforge_dsl::StateTable`] into a [`CompiledLexer`]:
//! byte-class compression (§4.3) followed by transition materialization
//! (§4.4).

mod classes;
mod error;
mod materializer;
mod model;

pub use error::{CompileError, CompileResult};
pub use model::{Action, ClassMap, CompiledLexer, Mode, Transition, UNALLOCATED_CLASS};

use lexforge_dsl::StateTable;

/// Runs the class compressor then the transition materializer over `table`,
/// producing a fully resolved [`CompiledLexer`] ready for an emitter.
pub fn compile(table: &StateTable) -> CompileResult<CompiledLexer> {
    let compression = classes::compress(table)?;
    materializer::materialize(table, &compression)
}

#[cfg(test)]
mod edge_cases;
