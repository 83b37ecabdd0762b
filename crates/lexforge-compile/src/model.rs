//! The compiled model: plain data, no formatting — per the design note in
//! §9, the emitter is a separate concern entirely (`lexforge-emit`).

/// Class id reserved for bytes no rule has mentioned.
pub const UNALLOCATED_CLASS: u8 = 0;

/// `byte -> class id` lookup built by the class compressor.
pub type ClassMap = [u8; 256];

/// The materialized outcome for one `(state, class)` cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Transition {
    pub next_state: u32,
    pub action: Action,
    pub mode: Mode,
    pub arg: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Action {
    #[default]
    Invalid,
    Continue,
    Clear,
    Token,
    Failure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Leave,
    Keep,
    Skip,
}

/// The full compiled lexer: tables and metadata ready for an emitter.
#[derive(Clone, Debug)]
pub struct CompiledLexer {
    pub charset_size: u32,
    pub class_count: u32,
    pub state_count: u32,
    pub initial_state_id: u32,
    pub class_map: ClassMap,
    pub tokens: Vec<String>,
    pub failure_messages: Vec<String>,
    /// `transitions[state][class]`, shape `state_count x class_count`.
    pub transitions: Vec<Vec<Transition>>,
}
