use crate::battle::rng::BattleRng;
use crate::battle::state::Side;
use crate::battle::stats::effective_speed;
use crate::uniteon::{BattleUnit, MoveChoice};
use schema::MoveTemplate;
use std::cmp::Ordering;

/// What a side committed to for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAction {
    UseMove(MoveChoice),
    /// Switch the active unit out for the party member in this slot.
    Switch(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedAction {
    pub side: Side,
    pub action: RoundAction,
}

/// Sort key for a committed action: switches first, then move priority,
/// then speed after stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionPriority {
    action_priority: i8,
    move_priority: i8,
    speed: u16,
}

impl ActionPriority {
    const SWITCH: i8 = 6;
    const MOVE: i8 = 0;

    pub fn switch() -> Self {
        Self {
            action_priority: Self::SWITCH,
            move_priority: 0,
            speed: 0,
        }
    }

    pub fn for_move(template: &MoveTemplate, unit: &BattleUnit) -> Self {
        Self {
            action_priority: Self::MOVE,
            move_priority: template.priority,
            speed: effective_speed(unit),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        other
            .action_priority
            .cmp(&self.action_priority)
            .then(other.move_priority.cmp(&self.move_priority))
            .then(other.speed.cmp(&self.speed))
    }
}

/// Order the two committed actions of a round. An exact tie is settled by a
/// coin from the battle RNG; nothing is drawn otherwise.
pub fn determine_action_order(
    first: (QueuedAction, ActionPriority),
    second: (QueuedAction, ActionPriority),
    rng: &mut dyn BattleRng,
) -> [QueuedAction; 2] {
    let (a, a_priority) = first;
    let (b, b_priority) = second;
    let swap = match a_priority.compare(&b_priority) {
        Ordering::Less => false,
        Ordering::Greater => true,
        Ordering::Equal => {
            let coin = rng.next_index(2, "speed tie");
            tracing::debug!(coin, "speed tie broken");
            coin == 1
        }
    };
    if swap {
        [b, a]
    } else {
        [a, b]
    }
}
