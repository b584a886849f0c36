use super::rewards::ProgressionStep;
use crate::uniteon::{BattleUnit, MoveInstance};
use schema::{MoveTemplate, SpeciesTemplate};
use std::sync::Arc;

/// Learn whatever the species grants at `level`, skipping moves already
/// known. Moves that do not fit are returned for the forget prompt.
pub(crate) fn learn_moves_for_level(unit: &mut BattleUnit, level: u8) -> Vec<ProgressionStep> {
    let candidates = unit.species().moves_learned_at(level);
    let mut steps = Vec::new();
    for template in candidates {
        if unit.knows_move(template.id) {
            continue;
        }
        if unit.learn_move(Arc::clone(&template)) {
            tracing::debug!(unit = unit.name(), move_name = %template.name, "learned move");
            steps.push(ProgressionStep::Learned(template));
        } else {
            steps.push(ProgressionStep::NeedsForget(template));
        }
    }
    steps
}

/// What became of a move offered through the forget prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum ForgetOutcome {
    Replaced {
        forgotten: MoveInstance,
        learned: Arc<MoveTemplate>,
    },
    Declined(Arc<MoveTemplate>),
}

/// Resolve the forget prompt. `slot` of `None` declines and leaves every
/// known move and its PP untouched.
pub fn forget_and_learn(
    unit: &mut BattleUnit,
    slot: Option<usize>,
    candidate: Arc<MoveTemplate>,
) -> Option<ForgetOutcome> {
    match slot {
        None => Some(ForgetOutcome::Declined(candidate)),
        Some(slot) if slot < SpeciesTemplate::MAX_MOVES => {
            let forgotten = unit.replace_move(slot, Arc::clone(&candidate))?;
            Some(ForgetOutcome::Replaced {
                forgotten,
                learned: candidate,
            })
        }
        Some(_) => None,
    }
}
