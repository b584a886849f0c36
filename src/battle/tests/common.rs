use crate::battle::engine::BattleSession;
use crate::battle::rng::ScriptedRng;
use crate::battle::state::{BattleEvent, BattleKind, Intent, MessageKey};
use crate::config::BattleConfig;
use crate::dex::Species;
use crate::errors::BattleResult;
use crate::party::Party;
use crate::uniteon::{BattleUnit, Stats};
use schema::{
    BaseStats, GrowthRate, LearnableMove, MoveCategory, MoveEffect, MoveId, MoveTarget,
    MoveTemplate, SpeciesId, SpeciesTemplate, StatBoost, StatType, UniteonType,
};
use std::sync::Arc;

/// PP given to every move built by [`test_move`].
pub const TEST_MOVE_PP: u8 = 10;

/// A single-target Normeon move with the given stats and 10 PP.
pub fn test_move(
    id: u16,
    name: &str,
    category: MoveCategory,
    power: u16,
    accuracy: Option<u16>,
) -> MoveTemplate {
    MoveTemplate {
        id: MoveId(id),
        name: name.to_string(),
        move_type: UniteonType::Normeon,
        category,
        power,
        accuracy,
        max_pp: TEST_MOVE_PP,
        priority: 0,
        target: MoveTarget::Opponent,
        effect: None,
    }
}

/// A status move that shifts one stat of `target` by `stages`.
pub fn stat_move(id: u16, name: &str, target: MoveTarget, stat: StatType, stages: i8) -> MoveTemplate {
    MoveTemplate {
        target,
        effect: Some(MoveEffect {
            boosts: vec![StatBoost { stat, stages }],
        }),
        ..test_move(id, name, MoveCategory::Status, 0, Some(100))
    }
}

fn base_stats(value: u8) -> BaseStats {
    BaseStats {
        hp: value,
        attack: value,
        defense: value,
        sp_attack: value,
        sp_defense: value,
        speed: value,
    }
}

/// A species whose learnset entries all resolve to a 40 power physical move
/// named "Move {id}".
pub fn test_species(name: &str, learnset: Vec<LearnableMove>) -> Arc<Species> {
    test_species_with(name, GrowthRate::MediumFast, learnset)
}

pub fn test_species_with(
    name: &str,
    growth_rate: GrowthRate,
    learnset: Vec<LearnableMove>,
) -> Arc<Species> {
    let resolved = learnset
        .iter()
        .map(|learnable| {
            let template = test_move(
                learnable.move_id.0,
                &format!("Move {}", learnable.move_id.0),
                MoveCategory::Physical,
                40,
                Some(100),
            );
            (learnable.level, template)
        })
        .collect();
    build_species(
        name,
        vec![UniteonType::Normeon],
        64,
        growth_rate,
        resolved,
    )
}

fn build_species(
    name: &str,
    types: Vec<UniteonType>,
    base_experience: u16,
    growth_rate: GrowthRate,
    mut learnset: Vec<(u8, MoveTemplate)>,
) -> Arc<Species> {
    learnset.sort_by_key(|(level, _)| *level);
    let template = SpeciesTemplate {
        id: SpeciesId(999),
        name: name.to_string(),
        description: String::new(),
        types,
        base_stats: base_stats(50),
        base_experience,
        growth_rate,
        learnable_moves: learnset
            .iter()
            .map(|(level, template)| LearnableMove {
                level: *level,
                move_id: template.id,
            })
            .collect(),
    };
    Arc::new(Species {
        template,
        learnset: learnset
            .into_iter()
            .map(|(level, template)| (level, Arc::new(template)))
            .collect(),
    })
}

/// A builder for creating test units with common defaults: level 5, Normeon,
/// MediumFast growth, base experience 64, and a single 100% Tackle.
///
/// # Example
/// ```ignore
/// let unit = TestUnitBuilder::new("Flamlet")
///     .with_stats([20, 10, 10, 10, 10, 20])
///     .with_hp(1)
///     .build();
/// ```
pub struct TestUnitBuilder {
    name: String,
    level: u8,
    stats: Option<[u16; 6]>,
    moves: Option<Vec<MoveTemplate>>,
    current_hp: Option<u16>,
    types: Vec<UniteonType>,
    base_experience: u16,
    growth_rate: GrowthRate,
    learnset: Vec<(u8, MoveTemplate)>,
}

impl TestUnitBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 5,
            stats: None,
            moves: None,
            current_hp: None,
            types: vec![UniteonType::Normeon],
            base_experience: 64,
            growth_rate: GrowthRate::MediumFast,
            learnset: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Fixed stats in `[hp, attack, defense, sp_attack, sp_defense, speed]`
    /// order, replacing the level formula. HP starts full unless `with_hp` is used.
    pub fn with_stats(mut self, stats: [u16; 6]) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_moves(mut self, moves: Vec<MoveTemplate>) -> Self {
        self.moves = Some(moves);
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn with_types(mut self, types: Vec<UniteonType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_base_experience(mut self, base_experience: u16) -> Self {
        self.base_experience = base_experience;
        self
    }

    /// Moves the species grants on level-up. Known moves still come from `with_moves`.
    pub fn with_learnset(mut self, learnset: Vec<(u8, MoveTemplate)>) -> Self {
        self.learnset = learnset;
        self
    }

    pub fn build(self) -> BattleUnit {
        let species = build_species(
            &self.name,
            self.types,
            self.base_experience,
            self.growth_rate,
            self.learnset,
        );
        let moves = self
            .moves
            .unwrap_or_else(|| vec![test_move(1, "Tackle", MoveCategory::Physical, 40, Some(100))]);
        let mut unit =
            BattleUnit::with_moves(species, self.level, moves.into_iter().map(Arc::new).collect());

        if let Some([hp, attack, defense, sp_attack, sp_defense, speed]) = self.stats {
            unit.stats = Stats {
                hp,
                attack,
                defense,
                sp_attack,
                sp_defense,
                speed,
            };
            unit.current_hp = hp;
        }
        if let Some(hp) = self.current_hp {
            unit.current_hp = hp.min(unit.stats.hp);
        }
        unit
    }
}

pub fn wild() -> BattleKind {
    BattleKind::Wild { capturable: false }
}

/// Builds a session over scripted RNG outcomes and plays the intro.
pub fn start_battle<'p>(
    gamer: &'p mut Party,
    foe: &'p mut Party,
    kind: BattleKind,
    outcomes: Vec<u8>,
) -> BattleSession<'p, ScriptedRng> {
    let mut session = assert_ok(BattleSession::with_rng(
        gamer,
        foe,
        kind,
        BattleConfig::default(),
        ScriptedRng::new(outcomes),
    ));
    assert_ok(session.handle(Intent::Confirm));
    session
}

/// Keys of every dialog line in `events`, in order.
pub fn message_keys(events: &[BattleEvent]) -> Vec<MessageKey> {
    events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::MessageLine { key, .. } => Some(*key),
            _ => None,
        })
        .collect()
}

pub fn has_event(events: &[BattleEvent], wanted: &BattleEvent) -> bool {
    events.iter().any(|event| event == wanted)
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
