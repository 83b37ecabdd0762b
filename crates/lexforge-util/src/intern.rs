//! First-seen-order string interning for the token and failure-message
//! tables.
//!
//! The teacher crate's `Symbol`/`StringTable` pair is a global, concurrent,
//! leak-on-intern table sized for a whole compiler session. None of that is
//! appropriate here: a translation interns a handful of names once and the
//! result must be emitted in first-seen order, so this is a small
//! translation-scoped wrapper over `indexmap::IndexSet` instead.

use indexmap::IndexSet;

/// Dense, insertion-ordered index into an [`Interner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InternId(pub u32);

impl InternId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interns strings in first-seen order, handing back a dense [`InternId`].
#[derive(Default, Debug, Clone)]
pub struct Interner {
    entries: IndexSet<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `value`, returning its id. Repeated interning of an equal
    /// string returns the id from the first occurrence.
    pub fn intern(&mut self, value: impl Into<String>) -> InternId {
        let (index, _) = self.entries.insert_full(value.into());
        InternId(index as u32)
    }

    pub fn get(&self, id: InternId) -> Option<&str> {
        self.entries.get_index(id.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All interned strings in first-seen order — the order the emitted
    /// enumeration must use.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
