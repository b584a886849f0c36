use crate::battle::state::MessageKey;
use crate::battle::stats::StatStages;
use crate::dex::Species;
use crate::progression::curve::ProgressionCurve;
use schema::{
    BaseStats, MoveCategory, MoveId, MoveTarget, MoveTemplate, SpeciesTemplate, StatType,
    UniteonType,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 100;

/// A known move and its remaining PP.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveInstance {
    pub(crate) template: Arc<MoveTemplate>,
    pub(crate) pp: i16,
}

impl MoveInstance {
    /// PP value marking the fallback move. It is never decremented.
    pub const STRUGGLE_PP: i16 = -1;

    /// Create a new move instance with max PP
    pub fn new(template: Arc<MoveTemplate>) -> Self {
        let pp = template.max_pp as i16;
        Self { template, pp }
    }

    /// The move used when every known move is out of PP.
    pub fn struggle(power: u16) -> Self {
        let template = MoveTemplate {
            id: MoveId(0),
            name: "Struggle".to_string(),
            move_type: UniteonType::Normeon,
            category: MoveCategory::Physical,
            power,
            accuracy: None,
            max_pp: 1,
            priority: 0,
            target: MoveTarget::Opponent,
            effect: None,
        };
        Self {
            template: Arc::new(template),
            pp: Self::STRUGGLE_PP,
        }
    }

    pub fn template(&self) -> &MoveTemplate {
        &self.template
    }

    pub fn pp(&self) -> i16 {
        self.pp
    }

    pub fn max_pp(&self) -> u8 {
        self.template.max_pp
    }

    pub fn is_struggle(&self) -> bool {
        self.pp < 0
    }

    pub fn has_pp(&self) -> bool {
        self.pp > 0
    }

    /// Spend one PP. The struggle sentinel and empty moves stay where they are.
    pub fn use_pp(&mut self) {
        if self.pp > 0 {
            self.pp -= 1;
        }
    }

    pub fn restore_pp(&mut self) {
        if !self.is_struggle() {
            self.pp = self.template.max_pp as i16;
        }
    }
}

/// The move a unit committed to for the current round.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveChoice {
    Slot(usize),
    Struggle,
}

/// Level-derived stats.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl Stats {
    /// HP = floor(base * level / 100) + level + 10
    /// Other = floor(base * level / 100) + 5
    pub fn calculate(base: &BaseStats, level: u8) -> Self {
        let scaled = |base: u8| (base as u16 * level as u16) / 100;
        Self {
            hp: scaled(base.hp) + level as u16 + 10,
            attack: scaled(base.attack) + 5,
            defense: scaled(base.defense) + 5,
            sp_attack: scaled(base.sp_attack) + 5,
            sp_defense: scaled(base.sp_defense) + 5,
            speed: scaled(base.speed) + 5,
        }
    }
}

/// A dialog line waiting to be shown after the current move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub key: MessageKey,
    pub args: Vec<String>,
}

/// One creature taking part in battles: species data plus everything that
/// changes while it fights.
#[derive(Debug, Clone)]
pub struct BattleUnit {
    pub(crate) species: Arc<Species>,
    pub(crate) level: u8,
    pub(crate) experience: u32,
    pub(crate) current_hp: u16,
    pub(crate) stats: Stats,
    pub(crate) moves: Vec<MoveInstance>,
    pub(crate) stat_stages: StatStages,
    pub(crate) status_messages: VecDeque<StatusMessage>,
    pub(crate) executing_move: Option<MoveChoice>,
}

impl BattleUnit {
    /// Create a unit at full health that knows the latest four moves its
    /// learnset grants by `level`.
    pub fn new(species: Arc<Species>, level: u8) -> Self {
        let moves = species.moves_known_at(level);
        Self::with_moves(species, level, moves)
    }

    pub fn with_moves(species: Arc<Species>, level: u8, moves: Vec<Arc<MoveTemplate>>) -> Self {
        let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        let stats = Stats::calculate(&species.template.base_stats, level);
        let experience = species
            .template
            .growth_rate
            .experience_for_level(level);
        let moves = moves
            .into_iter()
            .take(SpeciesTemplate::MAX_MOVES)
            .map(MoveInstance::new)
            .collect();

        Self {
            species,
            level,
            experience,
            current_hp: stats.hp,
            stats,
            moves,
            stat_stages: StatStages::default(),
            status_messages: VecDeque::new(),
            executing_move: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.species.template.name
    }

    pub fn species(&self) -> &Arc<Species> {
        &self.species
    }

    pub fn template(&self) -> &SpeciesTemplate {
        &self.species.template
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.hp
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn hp_fraction(&self) -> f32 {
        if self.stats.hp == 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.stats.hp as f32
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn moves(&self) -> &[MoveInstance] {
        &self.moves
    }

    pub fn stage(&self, stat: StatType) -> i8 {
        self.stat_stages.get(stat)
    }

    pub fn stat_stages(&self) -> &StatStages {
        &self.stat_stages
    }

    pub fn executing_move(&self) -> Option<MoveChoice> {
        self.executing_move
    }

    pub fn primary_type(&self) -> UniteonType {
        self.species
            .template
            .primary_type()
            .unwrap_or(UniteonType::Normeon)
    }

    pub fn secondary_type(&self) -> Option<UniteonType> {
        self.species.template.secondary_type()
    }

    /// Slots of known moves that still have PP.
    pub fn usable_move_slots(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, move_instance)| move_instance.has_pp())
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn knows_move(&self, id: MoveId) -> bool {
        self.moves.iter().any(|known| known.template.id == id)
    }

    // === HP ===

    /// Remove up to `amount` HP and return what was actually taken.
    pub(crate) fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        if self.current_hp == 0 {
            self.executing_move = None;
        }
        dealt
    }

    pub(crate) fn heal(&mut self, amount: u16) {
        self.current_hp = self.current_hp.saturating_add(amount).min(self.stats.hp);
    }

    /// Restore all HP and all PP.
    pub(crate) fn full_heal(&mut self) {
        self.current_hp = self.stats.hp;
        for move_instance in &mut self.moves {
            move_instance.restore_pp();
        }
    }

    pub(crate) fn reset_stat_stages(&mut self) {
        self.stat_stages.reset();
    }

    // === Levels ===

    /// Raise the level by one and recompute stats. HP rises by the same
    /// amount the maximum did, so damage taken carries over.
    pub(crate) fn level_up(&mut self) {
        if self.level >= MAX_LEVEL {
            return;
        }
        self.level += 1;
        let old_max = self.stats.hp;
        self.stats = Stats::calculate(&self.species.template.base_stats, self.level);
        if self.current_hp > 0 {
            let gained = self.stats.hp.saturating_sub(old_max);
            self.heal(gained);
        }
    }

    // === Moves ===

    /// Learn into a free slot. Returns false when all slots are taken.
    pub(crate) fn learn_move(&mut self, template: Arc<MoveTemplate>) -> bool {
        if self.moves.len() >= SpeciesTemplate::MAX_MOVES {
            return false;
        }
        self.moves.push(MoveInstance::new(template));
        true
    }

    /// Overwrite a slot with a new move at its full PP, returning the old one.
    pub(crate) fn replace_move(
        &mut self,
        slot: usize,
        template: Arc<MoveTemplate>,
    ) -> Option<MoveInstance> {
        let known = self.moves.get_mut(slot)?;
        Some(std::mem::replace(known, MoveInstance::new(template)))
    }

    /// Resolve a committed choice to the move instance that will be used.
    pub(crate) fn move_for(&self, choice: MoveChoice, struggle_power: u16) -> Option<MoveInstance> {
        match choice {
            MoveChoice::Slot(slot) => self.moves.get(slot).cloned(),
            MoveChoice::Struggle => Some(MoveInstance::struggle(struggle_power)),
        }
    }

    pub(crate) fn spend_pp(&mut self, choice: MoveChoice) {
        if let MoveChoice::Slot(slot) = choice {
            if let Some(move_instance) = self.moves.get_mut(slot) {
                move_instance.use_pp();
            }
        }
    }

    // === Status messages ===

    pub(crate) fn push_status_message(&mut self, key: MessageKey, args: Vec<String>) {
        self.status_messages.push_back(StatusMessage { key, args });
    }

    pub(crate) fn drain_status_messages(&mut self) -> Vec<StatusMessage> {
        self.status_messages.drain(..).collect()
    }
}
