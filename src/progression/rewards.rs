use super::curve::ProgressionCurve;
use crate::uniteon::{BattleUnit, MAX_LEVEL};
use schema::MoveTemplate;
use std::sync::Arc;

/// Divisor applied to every experience award.
const EXPERIENCE_DIVISOR: f64 = 7.0;

/// Calculator for experience awarded by a defeated unit
pub struct RewardCalculator;

impl RewardCalculator {
    /// floor(base experience × defeated level × bonus / 7)
    pub fn experience_yield(&self, defeated: &BattleUnit, bonus: f64) -> u32 {
        let base = defeated.template().base_experience as f64;
        (base * defeated.level() as f64 * bonus / EXPERIENCE_DIVISOR).floor() as u32
    }
}

/// One thing that happened while experience was applied, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressionStep {
    LevelUp(u8),
    /// A move went straight into a free slot.
    Learned(Arc<MoveTemplate>),
    /// All four slots are taken; the player must pick one to forget or decline.
    NeedsForget(Arc<MoveTemplate>),
}

/// Add experience and run every level-up it pays for.
///
/// Units at level 100 gain nothing. Experience is capped at the level-100
/// threshold so the level can never be pushed further.
pub fn apply_experience(unit: &mut BattleUnit, amount: u32) -> Vec<ProgressionStep> {
    let mut steps = Vec::new();
    if unit.level() >= MAX_LEVEL {
        return steps;
    }

    let curve = unit.template().growth_rate;
    unit.experience = unit
        .experience
        .saturating_add(amount)
        .min(curve.experience_cap());

    while unit.level() < MAX_LEVEL && curve.level_for_experience(unit.experience) > unit.level() {
        unit.level_up();
        let level = unit.level();
        tracing::debug!(unit = unit.name(), level, "level up");
        steps.push(ProgressionStep::LevelUp(level));
        steps.extend(super::moves::learn_moves_for_level(unit, level));
    }
    steps
}
