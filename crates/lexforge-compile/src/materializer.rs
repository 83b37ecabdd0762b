//! Transition materializer (§4.4): resolves each state's rules into a dense
//! `class -> Transition` row, folding overlapping rules with last-rule-wins
//! precedence and interning tokens/failure messages along the way.

use lexforge_dsl::{OnSpec, Rule, StateTable};
use lexforge_util::Interner;

use crate::classes::ClassCompression;
use crate::error::{CompileError, CompileResult};
use crate::model::{Action, CompiledLexer, Mode, Transition};

/// Class id the EOS rule targets, one past the live byte classes.
fn eos_class(max_class_id: u8) -> u32 {
    max_class_id as u32 + 1
}

pub fn materialize(
    table: &StateTable,
    compression: &ClassCompression,
) -> CompileResult<CompiledLexer> {
    let class_count = eos_class(compression.max_class_id) + 1;
    let state_count = table.groups.len() as u32;

    let mut tokens = Interner::new();
    let mut failure_messages = Interner::new();
    let mut transitions = vec![vec![Transition::default(); class_count as usize]; state_count as usize];

    for (state_id, group) in table.groups.iter().enumerate() {
        let row = &mut transitions[state_id];
        let mut default_classes: Vec<bool> = vec![true; class_count as usize];
        let mut default_transition = Transition::default();
        let mut has_default_rule = false;

        for rule in &group.rules {
            let transition = resolve_transition(
                rule,
                table,
                &mut tokens,
                &mut failure_messages,
                group.name.as_str(),
                state_id as u32,
            )?;

            match &rule.on {
                OnSpec::Chars(chars) => {
                    for &byte in chars {
                        let class = compression.class_map[byte as usize] as usize;
                        row[class] = transition;
                        default_classes[class] = false;
                    }
                }
                OnSpec::Eos => {
                    let class = eos_class(compression.max_class_id) as usize;
                    row[class] = transition;
                    default_classes[class] = false;
                }
                OnSpec::None => {
                    default_transition = transition;
                    has_default_rule = true;
                }
            }
        }

        if has_default_rule {
            for (class, is_default) in default_classes.iter().enumerate() {
                if *is_default {
                    row[class] = default_transition;
                }
            }
        }
    }

    Ok(CompiledLexer {
        charset_size: 256,
        class_count,
        state_count,
        initial_state_id: table.initial_state_id() as u32,
        class_map: compression.class_map,
        tokens: tokens.iter().map(|s| s.to_string()).collect(),
        failure_messages: failure_messages.iter().map(|s| s.to_string()).collect(),
        transitions,
    })
}

fn resolve_transition(
    rule: &Rule,
    table: &StateTable,
    tokens: &mut Interner,
    failure_messages: &mut Interner,
    state_name: &str,
    current_state_id: u32,
) -> CompileResult<Transition> {
    if rule.failure.is_some() && (rule.go.is_some() || rule.clear || rule.token.is_some()) {
        return Err(CompileError::FailureIncompatible {
            state: state_name.to_string(),
            position: rule.position,
        });
    }
    if rule.token.is_some() && rule.clear {
        return Err(CompileError::TokenClearIncompatible {
            state: state_name.to_string(),
            position: rule.position,
        });
    }
    if rule.keep && rule.skip {
        return Err(CompileError::KeepSkipIncompatible {
            state: state_name.to_string(),
            position: rule.position,
        });
    }

    let mode = if rule.keep {
        Mode::Keep
    } else if rule.skip {
        Mode::Skip
    } else {
        Mode::Leave
    };

    if let Some(message) = &rule.failure {
        let arg = failure_messages.intern(message).index() as u32;
        return Ok(Transition { next_state: current_state_id, action: Action::Failure, mode, arg });
    }

    let next_state = match &rule.go {
        Some(name) => *table.state_map.get(name).ok_or_else(|| CompileError::UnknownTargetState {
            name: name.clone(),
            state: state_name.to_string(),
            position: rule.position,
        })? as u32,
        None => current_state_id,
    };

    let (action, arg) = if let Some(token) = &rule.token {
        (Action::Token, tokens.intern(token).index() as u32)
    } else if rule.clear {
        (Action::Clear, 0)
    } else {
        (Action::Continue, 0)
    };

    Ok(Transition { next_state, action, mode, arg })
}
