//! Uniteon Battle Engine
//!
//! Turn-based creature battles: a phase state machine driven by player
//! intents, the combat math behind each move, and experience with level-ups
//! and move learning. Presentation layers send [`Intent`]s to a
//! [`BattleSession`] and play back the [`BattleEvent`]s it returns.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod dex;
pub mod encounters;
pub mod errors;
pub mod party;
pub mod progression;
pub mod uniteon;

// --- PUBLIC API RE-EXPORTS ---

// Immutable data definitions from the `schema` crate.
pub use schema::{
    BaseStats, GrowthRate, LearnableMove, MoveCategory, MoveEffect, MoveId, MoveTarget,
    MoveTemplate, SpeciesId, SpeciesTemplate, StatBoost, StatType, UniteonType,
};

// Battle session, its commands and its events.
pub use battle::engine::BattleSession;
pub use battle::rng::{BattleRng, ScriptedRng, SeededRng};
pub use battle::state::{
    ActionChoice, BattleEvent, BattleKind, BattleOutcome, BattlePhase, ForgetChoice, Intent,
    MessageKey, Side, UnitRef,
};
pub use battle::views::{MoveView, RosterView, UnitView};

// Runtime types.
pub use config::BattleConfig;
pub use dex::{Dex, Species};
pub use encounters::EncounterTable;
pub use party::Party;
pub use uniteon::{BattleUnit, MoveInstance};

// Crate-specific error and result types.
pub use errors::{
    ActionError, BattleEngineError, BattleResult, BattleStateError, DexError, DexResult,
};
