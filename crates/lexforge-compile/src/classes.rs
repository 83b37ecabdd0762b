//! Character-class compressor (§4.3).
//!
//! Runs once over all rules of all states in source order (state groups in
//! first-declared order, each group's rules in append order — the same
//! order a single concatenated declaration of that state would use).
//! Maintains `class_map`/`class_usage`/`max_class_id`, preserving the
//! invariant that two bytes share a class iff no rule processed so far has
//! distinguished them.

use lexforge_dsl::{OnSpec, StateTable};

use crate::error::{CompileError, CompileResult};
use crate::model::{ClassMap, UNALLOCATED_CLASS};

/// The highest class id an implementation may allocate before widening the
/// id type would be required: one id each is reserved for class 0 and the
/// EOS class, leaving `254` as the largest legal `max_class_id`.
const MAX_ALLOCATABLE_CLASS_ID: u8 = 254;

pub struct ClassCompression {
    pub class_map: ClassMap,
    pub max_class_id: u8,
}

/// Compresses the 256-byte alphabet into equivalence classes and checks the
/// grammar-independent semantic rules that belong to this pass: no rule may
/// reuse a byte within its own `on` set, no state may declare more than one
/// default rule, and every rule must make progress.
pub fn compress(table: &StateTable) -> CompileResult<ClassCompression> {
    let mut class_map: ClassMap = [UNALLOCATED_CLASS; 256];
    let mut class_usage = [0u32; 256];
    class_usage[UNALLOCATED_CLASS as usize] = 256;
    let mut max_class_id: u8 = 0;

    for group in &table.groups {
        let mut has_default_rule: Option<lexforge_util::Position> = None;

        for rule in &group.rules {
            if !rule.makes_progress() {
                return Err(CompileError::InfiniteRule {
                    state: group.name.clone(),
                    position: rule.position,
                });
            }

            match &rule.on {
                OnSpec::Chars(chars) => {
                    compress_rule(
                        chars,
                        &mut class_map,
                        &mut class_usage,
                        &mut max_class_id,
                        &group.name,
                        rule.position,
                    )?;
                }
                OnSpec::Eos => {}
                OnSpec::None => {
                    if let Some(first_position) = has_default_rule {
                        return Err(CompileError::DuplicateDefaultRule {
                            state: group.name.clone(),
                            position: rule.position,
                            first_position,
                        });
                    }
                    has_default_rule = Some(rule.position);
                }
            }
        }
    }

    debug_assert_eq!(class_usage.iter().sum::<u32>(), 256);
    Ok(ClassCompression { class_map, max_class_id })
}

fn compress_rule(
    chars: &[u8],
    class_map: &mut ClassMap,
    class_usage: &mut [u32; 256],
    max_class_id: &mut u8,
    state_name: &str,
    position: lexforge_util::Position,
) -> CompileResult<()> {
    let mut seen = [false; 256];
    for &c in chars {
        if seen[c as usize] {
            return Err(CompileError::DuplicateByteInRule {
                byte: c,
                state: state_name.to_string(),
                position,
            });
        }
        seen[c as usize] = true;
    }

    // §4.3 step 3 walks the rule's bytes "in increasing byte order" so that
    // permuting a literal's bytes can never change which allocation/reclaim
    // decisions get made.
    let mut sorted_chars = chars.to_vec();
    sorted_chars.sort_unstable();

    // relocations[old_class] = new_class picked for this rule; 0 means
    // "not yet relocated" (0 can never be a genuine target since it is the
    // reserved unallocated class and never freshly allocated).
    let mut relocations = [0u8; 256];

    for &c in &sorted_chars {
        let old = class_map[c as usize];
        let mut new = relocations[old as usize];
        if new == 0 {
            if *max_class_id >= MAX_ALLOCATABLE_CLASS_ID {
                return Err(CompileError::TooManyClasses {
                    state: state_name.to_string(),
                    position,
                });
            }
            *max_class_id += 1;
            new = *max_class_id;
            relocations[old as usize] = new;
        }

        class_usage[old as usize] -= 1;
        class_usage[new as usize] += 1;

        if class_usage[old as usize] == 0 {
            class_usage.swap(old as usize, new as usize);
            relocations[old as usize] = old;
            *max_class_id -= 1;
        }
    }

    for &c in &sorted_chars {
        let old = class_map[c as usize];
        class_map[c as usize] = relocations[old as usize];
    }

    Ok(())
}
