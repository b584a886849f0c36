use crate::encounters::EncounterTable;
use crate::errors::{DexError, DexResult};
use crate::uniteon::{BattleUnit, MAX_LEVEL, MIN_LEVEL};
use schema::{MoveId, MoveTemplate, SpeciesId, SpeciesTemplate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

static EMBEDDED_DEX_SOURCE: &str = include_str!("../data/dex.ron");

static EMBEDDED_DEX: LazyLock<Result<Dex, String>> =
    LazyLock::new(|| Dex::from_ron_str(EMBEDDED_DEX_SOURCE).map_err(|e| e.to_string()));

/// On-disk layout of a dex file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexData {
    pub moves: Vec<MoveTemplate>,
    pub species: Vec<SpeciesTemplate>,
    #[serde(default)]
    pub areas: Vec<EncounterTable>,
}

/// A species with its learnset resolved to shared move templates.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub template: SpeciesTemplate,
    /// (level, move) sorted by level, in data order within a level.
    pub learnset: Vec<(u8, Arc<MoveTemplate>)>,
}

impl Species {
    pub fn id(&self) -> SpeciesId {
        self.template.id
    }

    /// The last four moves granted at or below `level`, oldest first.
    pub fn moves_known_at(&self, level: u8) -> Vec<Arc<MoveTemplate>> {
        let mut known: Vec<Arc<MoveTemplate>> = Vec::new();
        for (learn_level, template) in &self.learnset {
            if *learn_level > level {
                break;
            }
            if known.iter().any(|k| k.id == template.id) {
                continue;
            }
            known.push(Arc::clone(template));
        }
        let skip = known.len().saturating_sub(SpeciesTemplate::MAX_MOVES);
        known.split_off(skip)
    }

    /// Moves granted exactly at `level`.
    pub fn moves_learned_at(&self, level: u8) -> Vec<Arc<MoveTemplate>> {
        self.learnset
            .iter()
            .filter(|(learn_level, _)| *learn_level == level)
            .map(|(_, template)| Arc::clone(template))
            .collect()
    }
}

/// Immutable species, move and encounter data shared by every battle.
#[derive(Debug, Clone, Default)]
pub struct Dex {
    moves: HashMap<MoveId, Arc<MoveTemplate>>,
    species: HashMap<SpeciesId, Arc<Species>>,
    areas: HashMap<String, EncounterTable>,
}

impl Dex {
    /// The dex compiled into the binary, parsed on first use.
    pub fn embedded() -> DexResult<&'static Dex> {
        EMBEDDED_DEX
            .as_ref()
            .map_err(|message| DexError::MalformedData(message.clone()))
    }

    pub fn from_ron_str(source: &str) -> DexResult<Self> {
        let data: DexData = ron::from_str(source)?;
        Self::from_data(data)
    }

    /// Load a dex from a RON file on disk.
    pub fn load(path: &Path) -> DexResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| DexError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    /// Validate cross references and resolve learnsets.
    pub fn from_data(data: DexData) -> DexResult<Self> {
        let mut dex = Dex::default();

        for template in data.moves {
            if template.id == MoveId(0) {
                return Err(DexError::MalformedData(format!(
                    "move id {} is reserved for Struggle",
                    template.id
                )));
            }
            if template.max_pp == 0 {
                return Err(DexError::MalformedData(format!(
                    "move {} has no PP",
                    template.name
                )));
            }
            let id = template.id;
            if dex.moves.insert(id, Arc::new(template)).is_some() {
                return Err(DexError::MalformedData(format!("duplicate move id {}", id)));
            }
        }

        for template in data.species {
            if template.types.is_empty() || template.types.len() > 2 {
                return Err(DexError::MalformedData(format!(
                    "{} must have one or two types, found {}",
                    template.name,
                    template.types.len()
                )));
            }
            let mut learnset = Vec::with_capacity(template.learnable_moves.len());
            for learnable in &template.learnable_moves {
                if !(MIN_LEVEL..=MAX_LEVEL).contains(&learnable.level) {
                    return Err(DexError::MalformedData(format!(
                        "{} learns a move at level {}",
                        template.name, learnable.level
                    )));
                }
                learnset.push((learnable.level, dex.move_template(learnable.move_id)?));
            }
            // Stable sort keeps data order among moves sharing a level.
            learnset.sort_by_key(|(level, _)| *level);

            let id = template.id;
            let species = Species { template, learnset };
            if dex.species.insert(id, Arc::new(species)).is_some() {
                return Err(DexError::MalformedData(format!("duplicate species id {}", id)));
            }
        }

        for area in data.areas {
            for encounter in &area.wild {
                dex.species(encounter.species)?;
                if encounter.min_level > encounter.max_level
                    || encounter.min_level < MIN_LEVEL
                    || encounter.max_level > MAX_LEVEL
                {
                    return Err(DexError::MalformedData(format!(
                        "{} has level range {}..={}",
                        area.name, encounter.min_level, encounter.max_level
                    )));
                }
            }
            dex.areas.insert(area.name.clone(), area);
        }

        tracing::debug!(
            moves = dex.moves.len(),
            species = dex.species.len(),
            areas = dex.areas.len(),
            "dex loaded"
        );
        Ok(dex)
    }

    pub fn move_template(&self, id: MoveId) -> DexResult<Arc<MoveTemplate>> {
        self.moves
            .get(&id)
            .cloned()
            .ok_or(DexError::MoveNotFound(id))
    }

    pub fn species(&self, id: SpeciesId) -> DexResult<Arc<Species>> {
        self.species
            .get(&id)
            .cloned()
            .ok_or(DexError::SpeciesNotFound(id))
    }

    pub fn species_by_name(&self, name: &str) -> Option<Arc<Species>> {
        self.species
            .values()
            .find(|species| species.template.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn area(&self, name: &str) -> Option<&EncounterTable> {
        self.areas.get(name)
    }

    pub fn area_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.areas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// A fresh unit of `id` at `level`, with its default moves.
    pub fn create_unit(&self, id: SpeciesId, level: u8) -> DexResult<BattleUnit> {
        Ok(BattleUnit::new(self.species(id)?, level))
    }
}
