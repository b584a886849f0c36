use crate::errors::{DexError, DexResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable battle rules. Every field has a default so a config file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// A damage roll of `1..=100` at or below this value lands a critical hit.
    pub critical_hit_percent: f64,
    /// Experience multiplier for beating a mentor's Uniteon.
    pub mentor_exp_bonus: f64,
    /// Experience multiplier for beating a wild Uniteon.
    pub wild_exp_bonus: f64,
    pub max_party_size: usize,
    /// Base power of the fallback move used when nothing has PP left.
    pub struggle_power: u16,
    /// Fixed seed for the session RNG; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl BattleConfig {
    pub const DEFAULT_CRITICAL_HIT_PERCENT: f64 = 6.25;
    pub const DEFAULT_MENTOR_EXP_BONUS: f64 = 1.5;
    pub const DEFAULT_MAX_PARTY_SIZE: usize = 6;
    pub const DEFAULT_STRUGGLE_POWER: u16 = 50;

    pub fn new() -> Self {
        Self {
            critical_hit_percent: Self::DEFAULT_CRITICAL_HIT_PERCENT,
            mentor_exp_bonus: Self::DEFAULT_MENTOR_EXP_BONUS,
            wild_exp_bonus: 1.0,
            max_party_size: Self::DEFAULT_MAX_PARTY_SIZE,
            struggle_power: Self::DEFAULT_STRUGGLE_POWER,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_ron_str(source: &str) -> DexResult<Self> {
        Ok(ron::from_str(source)?)
    }

    /// Load a config from a RON file on disk.
    pub fn load(path: &Path) -> DexResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| DexError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&content)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
