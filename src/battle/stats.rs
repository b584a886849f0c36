use crate::battle::rng::BattleRng;
use crate::uniteon::BattleUnit;
use schema::{MoveTemplate, StatType};
use serde::{Deserialize, Serialize};
use strum::EnumCount;

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// Multiplier for Attack, Defense, Sp. Atk, Sp. Def and Speed stages.
/// Positive stages: (2 + stage) / 2. Negative stages: 2 / (2 - stage).
pub fn stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE) as f64;
    if stage >= 0.0 {
        (2.0 + stage) / 2.0
    } else {
        2.0 / (2.0 - stage)
    }
}

/// Multiplier for Accuracy and Evasion stages. Same ladder as the other
/// stats: (2 + stage) / 2 going up, divided by (2 - stage) / 2 going down.
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    stage_multiplier(stage)
}

/// Which way a stage change went, and whether it was stopped by the limit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageDirection {
    Rose,
    Fell,
    WontGoHigher,
    WontGoLower,
}

/// Battle-only stage counters for the seven stageable stats.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatStages {
    stages: [i8; StatType::COUNT],
}

impl StatStages {
    pub fn get(&self, stat: StatType) -> i8 {
        self.stages[stat.index()]
    }

    /// Shift a stage by `delta`, clamping into [-6, 6].
    pub fn apply(&mut self, stat: StatType, delta: i8) -> StageDirection {
        let old = self.get(stat);
        let new = old.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
        self.stages[stat.index()] = new;
        match (delta >= 0, new != old) {
            (true, true) => StageDirection::Rose,
            (true, false) => StageDirection::WontGoHigher,
            (false, true) => StageDirection::Fell,
            (false, false) => StageDirection::WontGoLower,
        }
    }

    pub(crate) fn set(&mut self, stat: StatType, stage: i8) {
        if !(MIN_STAGE..=MAX_STAGE).contains(&stage) {
            crate::errors::report_invariant_violation(format!(
                "{:?} stage {} outside [{}, {}]",
                stat, stage, MIN_STAGE, MAX_STAGE
            ));
        }
        self.stages[stat.index()] = stage.clamp(MIN_STAGE, MAX_STAGE);
    }

    pub fn reset(&mut self) {
        self.stages = [0; StatType::COUNT];
    }

    pub fn is_neutral(&self) -> bool {
        self.stages.iter().all(|&stage| stage == 0)
    }
}

/// A stat after its stage multiplier, rounded like the displayed value.
pub fn effective_stat(unit: &BattleUnit, stat: StatType) -> u16 {
    let base = match stat {
        StatType::Attack => unit.stats().attack,
        StatType::Defense => unit.stats().defense,
        StatType::SpecialAttack => unit.stats().sp_attack,
        StatType::SpecialDefense => unit.stats().sp_defense,
        StatType::Speed => unit.stats().speed,
        // Accuracy and evasion have no base value; they only scale hit chance.
        StatType::Accuracy | StatType::Evasion => return 0,
    };
    apply_stat_stage_multiplier(base, unit.stage(stat))
}

pub fn effective_speed(unit: &BattleUnit) -> u16 {
    effective_stat(unit, StatType::Speed)
}

fn apply_stat_stage_multiplier(base_stat: u16, stage: i8) -> u16 {
    if stage == 0 {
        return base_stat;
    }
    ((base_stat as f64) * stage_multiplier(stage)).round() as u16
}

/// Hit chance after the attacker's accuracy and the defender's evasion stages.
/// Not capped at 100: a boosted move simply always lands.
pub fn effective_accuracy(move_: &MoveTemplate, attacker: &BattleUnit, defender: &BattleUnit) -> Option<f64> {
    let base_accuracy = move_.accuracy? as f64;
    Some(
        base_accuracy * accuracy_stage_multiplier(attacker.stage(StatType::Accuracy))
            / accuracy_stage_multiplier(defender.stage(StatType::Evasion)),
    )
}

/// Roll whether a move connects. Moves that never miss draw nothing from the RNG.
pub fn move_hits(
    move_: &MoveTemplate,
    attacker: &BattleUnit,
    defender: &BattleUnit,
    rng: &mut dyn BattleRng,
) -> bool {
    let Some(accuracy) = effective_accuracy(move_, attacker, defender) else {
        return true;
    };
    let roll = rng.next_percent("accuracy");
    let hit = (roll as f64) <= accuracy;
    tracing::debug!(move_name = %move_.name, roll, accuracy, hit, "accuracy check");
    hit
}
