//! Intermediate representation produced by the DSL parser: per-state rule
//! groups, not yet resolved into a transition table.
//!
//! Mirrors the shape of the teacher's `faxc_par::ast` AST nodes — plain data
//! structs carrying a [`Position`] for diagnostics, built up by the parser
//! and consumed by `lexforge-compile` without further validation of syntax.

use lexforge_util::{FxHashMap, Position};

/// What a `transition` rule fires on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OnSpec {
    /// The rule omits `on` entirely — it is the state's default.
    None,
    /// `on(end)` — fires only on end-of-input.
    Eos,
    /// `on("...")` — fires on this set of literal bytes, in first-seen
    /// order as written in the source (duplicates are rejected by the
    /// class compressor, not here).
    Chars(Vec<u8>),
}

impl OnSpec {
    pub fn is_none(&self) -> bool {
        matches!(self, OnSpec::None)
    }
}

/// One parsed `transition` clause.
#[derive(Clone, Debug)]
pub struct Rule {
    pub on: OnSpec,
    pub go: Option<String>,
    pub keep: bool,
    pub skip: bool,
    pub clear: bool,
    pub token: Option<String>,
    pub failure: Option<String>,
    pub position: Position,
}

impl Rule {
    pub fn new(position: Position) -> Self {
        Self {
            on: OnSpec::None,
            go: None,
            keep: false,
            skip: false,
            clear: false,
            token: None,
            failure: None,
            position,
        }
    }

    /// At least one of `keep`, `skip`, `go`, `failure`, `token`, `clear` must
    /// be present or the rule describes an infinite self-loop without
    /// progress. `token` and `clear` count too: a rule that only emits a
    /// token or only clears the lexeme buffer still has an observable effect
    /// each time it fires (§8 scenario 5 relies on token-only rules being
    /// legal).
    pub fn makes_progress(&self) -> bool {
        self.keep
            || self.skip
            || self.go.is_some()
            || self.failure.is_some()
            || self.token.is_some()
            || self.clear
    }
}

/// An ordered list of [`Rule`]s tagged with a state name.
///
/// A state name may appear more than once in the DSL source; subsequent
/// declarations append to the same group, which is why `rules` accumulates
/// across calls to the parser rather than being fixed at creation.
#[derive(Clone, Debug)]
pub struct RuleGroup {
    pub name: String,
    pub rules: Vec<Rule>,
    /// Position of the group's first `state` declaration.
    pub position: Position,
}

impl RuleGroup {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self { name: name.into(), rules: Vec::new(), position }
    }
}

/// The full parsed program: an ordered list of [`RuleGroup`]s plus the
/// name-to-index map that lets `go(name)` and repeated `state` declarations
/// resolve to the same group.
#[derive(Clone, Debug, Default)]
pub struct StateTable {
    pub groups: Vec<RuleGroup>,
    pub state_map: FxHashMap<String, usize>,
    pub initial_state: Option<usize>,
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up or creates the group for `name`, returning its index.
    /// Returns `(index, true)` if the group already existed.
    pub fn group_index(&mut self, name: &str, position: Position) -> (usize, bool) {
        if let Some(&idx) = self.state_map.get(name) {
            (idx, true)
        } else {
            let idx = self.groups.len();
            self.groups.push(RuleGroup::new(name, position));
            self.state_map.insert(name.to_string(), idx);
            (idx, false)
        }
    }

    /// The initial state's index, defaulting to the first declared state
    /// when no `initial` marker appeared anywhere in the source.
    pub fn initial_state_id(&self) -> usize {
        self.initial_state.unwrap_or(0)
    }
}
