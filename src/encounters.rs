use crate::battle::rng::BattleRng;
use crate::dex::Dex;
use crate::errors::{DexError, DexResult};
use crate::party::Party;
use schema::SpeciesId;
use serde::{Deserialize, Serialize};

/// A species that can turn up in an area, and the levels it shows up at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub species: SpeciesId,
    pub min_level: u8,
    pub max_level: u8,
}

/// The wild Uniteon living in one area of the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterTable {
    pub name: String,
    pub wild: Vec<Encounter>,
}

impl EncounterTable {
    /// Pick an encounter uniformly and build the single-unit wild party for it.
    pub fn roll_wild(&self, dex: &Dex, rng: &mut dyn BattleRng) -> DexResult<Party> {
        if self.wild.is_empty() {
            return Err(DexError::MalformedData(format!(
                "{} has no wild encounters",
                self.name
            )));
        }
        let encounter = &self.wild[rng.next_index(self.wild.len(), "wild species")];
        let span = encounter
            .max_level
            .checked_sub(encounter.min_level)
            .ok_or_else(|| {
                DexError::MalformedData(format!(
                    "{} has level range {}..={}",
                    self.name, encounter.min_level, encounter.max_level
                ))
            })? as usize
            + 1;
        let level = encounter.min_level + rng.next_index(span, "wild level") as u8;

        let unit = dex.create_unit(encounter.species, level)?;
        tracing::debug!(area = %self.name, species = unit.name(), level, "wild encounter");
        Ok(Party::new(vec![unit]))
    }
}
