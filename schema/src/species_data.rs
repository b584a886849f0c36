use crate::{MoveId, UniteonType};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Numeric identifier of a species in the dex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesId(pub u16);

impl fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

/// Experience curve a species levels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum GrowthRate {
    Fast,
    MediumFast,
    MediumSlow,
    Slow,
    Fluctuating,
    Erratic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnableMove {
    pub level: u8,
    pub move_id: MoveId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesTemplate {
    pub id: SpeciesId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// One or two types; the loader rejects anything else.
    pub types: Vec<UniteonType>,
    pub base_stats: BaseStats,
    pub base_experience: u16,
    pub growth_rate: GrowthRate,
    #[serde(default)]
    pub learnable_moves: Vec<LearnableMove>,
}

impl SpeciesTemplate {
    /// A species never knows more than this many moves at once.
    pub const MAX_MOVES: usize = 4;

    pub fn primary_type(&self) -> Option<UniteonType> {
        self.types.first().copied()
    }

    pub fn secondary_type(&self) -> Option<UniteonType> {
        self.types.get(1).copied()
    }
}
