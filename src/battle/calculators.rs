use crate::battle::rng::BattleRng;
use crate::battle::stats::{effective_stat, StageDirection};
use crate::uniteon::BattleUnit;
use schema::{MoveCategory, MoveEffect, MoveTemplate, StatType, UniteonType};
use serde::{Deserialize, Serialize};

const CRITICAL_MULTIPLIER: f64 = 2.0;

/// How a hit's type matchup is announced.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectivenessTier {
    /// x4
    Mega,
    /// x2
    Super,
    Neutral,
    /// x0.5
    NotVery,
    /// x0.25
    Barely,
    NoEffect,
}

impl EffectivenessTier {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier <= 0.0 {
            EffectivenessTier::NoEffect
        } else if multiplier >= 4.0 {
            EffectivenessTier::Mega
        } else if multiplier >= 2.0 {
            EffectivenessTier::Super
        } else if multiplier >= 1.0 {
            EffectivenessTier::Neutral
        } else if multiplier >= 0.5 {
            EffectivenessTier::NotVery
        } else {
            EffectivenessTier::Barely
        }
    }

    /// Dialog line for the tier. Neutral hits say nothing.
    pub fn message(self) -> Option<&'static str> {
        match self {
            EffectivenessTier::Mega => Some("It's mega effective!"),
            EffectivenessTier::Super => Some("It's super effective!"),
            EffectivenessTier::Neutral => None,
            EffectivenessTier::NotVery => Some("It's not very effective..."),
            EffectivenessTier::Barely => Some("It barely had an effect..."),
            EffectivenessTier::NoEffect => Some("It had no effect!"),
        }
    }
}

/// Outcome of one damaging hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageReport {
    pub damage: u16,
    pub critical: bool,
    pub effectiveness: f64,
    pub tier: EffectivenessTier,
    pub fainted: bool,
}

/// Combined type multiplier of `move_type` against the defender's types.
pub fn type_multiplier(move_type: UniteonType, defender: &BattleUnit) -> f64 {
    UniteonType::effectiveness_against(
        move_type,
        defender.primary_type(),
        defender.secondary_type(),
    ) as f64
}

/// Damage before it is applied. `spread` is in `0.85..=1.0`.
pub fn calculate_damage(
    level: u8,
    power: u16,
    attack: u16,
    defense: u16,
    spread: f64,
    critical: bool,
    effectiveness: f64,
) -> u16 {
    let defense = defense.max(1) as f64;
    let base = ((2.0 * level as f64 + 10.0) / 250.0) * power as f64 * (attack as f64 / defense) + 2.0;
    let critical = if critical { CRITICAL_MULTIPLIER } else { 1.0 };
    let damage = (base * spread * critical * effectiveness).floor();
    damage.clamp(0.0, u16::MAX as f64) as u16
}

/// Roll a damaging move that already hit and take the HP off the defender.
/// Draws the critical roll first, then the damage spread.
pub fn resolve_damage(
    attacker: &BattleUnit,
    defender: &mut BattleUnit,
    move_: &MoveTemplate,
    critical_hit_percent: f64,
    rng: &mut dyn BattleRng,
) -> DamageReport {
    let (attack_stat, defense_stat) = match move_.category {
        MoveCategory::Special => (StatType::SpecialAttack, StatType::SpecialDefense),
        _ => (StatType::Attack, StatType::Defense),
    };
    let attack = effective_stat(attacker, attack_stat);
    let defense = effective_stat(defender, defense_stat);

    let critical = (rng.next_percent("critical hit") as f64) <= critical_hit_percent;
    let spread = rng.next_spread("damage spread");
    let effectiveness = type_multiplier(move_.move_type, defender);

    let damage = calculate_damage(
        attacker.level(),
        move_.power,
        attack,
        defense,
        spread,
        critical,
        effectiveness,
    );
    let dealt = defender.take_damage(damage);
    tracing::debug!(
        move_name = %move_.name,
        attack,
        defense,
        critical,
        spread,
        effectiveness,
        damage = dealt,
        "damage resolved"
    );

    DamageReport {
        damage: dealt,
        critical,
        effectiveness,
        tier: EffectivenessTier::from_multiplier(effectiveness),
        fainted: defender.is_fainted(),
    }
}

/// Apply a status move's stage changes. Every boost reports its direction,
/// including the ones stopped by the stage limit.
pub fn apply_stat_effect(
    target: &mut BattleUnit,
    effect: &MoveEffect,
) -> Vec<(StatType, StageDirection)> {
    effect
        .boosts
        .iter()
        .map(|boost| {
            let direction = target.stat_stages.apply(boost.stat, boost.stages);
            (boost.stat, direction)
        })
        .collect()
}
