// Uniteon Battle Schema - Shared data definitions
// This crate holds the immutable, serde-derived data the battle engine is
// driven by: elemental types and their matchup table, move templates and
// species templates as they are stored in the dex file.

// Re-export the main types
pub use battle_data::*;
pub use species_data::*;
pub use uniteon_types::*;

pub mod battle_data;
pub mod species_data;
pub mod uniteon_types;
