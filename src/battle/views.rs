use crate::battle::state::Side;
use crate::party::Party;
use crate::uniteon::{BattleUnit, MoveInstance};
use schema::{MoveCategory, MoveId, StatType, UniteonType};
use serde::Serialize;
use strum::IntoEnumIterator;

/// Read-only snapshot of one known move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveView {
    pub slot: usize,
    pub id: MoveId,
    pub name: String,
    pub move_type: UniteonType,
    pub category: MoveCategory,
    pub power: u16,
    pub pp: i16,
    pub max_pp: u8,
    pub usable: bool,
}

impl MoveView {
    pub fn new(slot: usize, move_instance: &MoveInstance) -> Self {
        let template = move_instance.template();
        Self {
            slot,
            id: template.id,
            name: template.name.clone(),
            move_type: template.move_type,
            category: template.category,
            power: template.power,
            pp: move_instance.pp(),
            max_pp: move_instance.max_pp(),
            usable: move_instance.has_pp(),
        }
    }
}

/// Read-only snapshot of a unit for HUDs and party screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitView {
    pub slot: usize,
    pub name: String,
    pub level: u8,
    pub experience: u32,
    pub current_hp: u16,
    pub max_hp: u16,
    pub hp_fraction: f32,
    pub types: Vec<UniteonType>,
    pub fainted: bool,
    pub active: bool,
    pub moves: Vec<MoveView>,
    /// Non-zero stat stages only.
    pub stages: Vec<(StatType, i8)>,
}

impl UnitView {
    pub fn new(slot: usize, unit: &BattleUnit, active: bool) -> Self {
        Self {
            slot,
            name: unit.name().to_string(),
            level: unit.level(),
            experience: unit.experience(),
            current_hp: unit.current_hp(),
            max_hp: unit.max_hp(),
            hp_fraction: unit.hp_fraction(),
            types: unit.template().types.clone(),
            fainted: unit.is_fainted(),
            active,
            moves: unit
                .moves()
                .iter()
                .enumerate()
                .map(|(slot, move_instance)| MoveView::new(slot, move_instance))
                .collect(),
            stages: StatType::iter()
                .map(|stat| (stat, unit.stage(stat)))
                .filter(|(_, stage)| *stage != 0)
                .collect(),
        }
    }
}

/// Every member of one side, in party order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterView {
    pub side: Side,
    pub active: usize,
    pub members: Vec<UnitView>,
}

impl RosterView {
    pub fn new(side: Side, party: &Party, active: usize) -> Self {
        Self {
            side,
            active,
            members: party
                .units()
                .iter()
                .enumerate()
                .map(|(slot, unit)| UnitView::new(slot, unit, slot == active))
                .collect(),
        }
    }
}
