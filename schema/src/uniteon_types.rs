use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumCount, EnumIter};

/// The seventeen elemental types a Uniteon or a move can carry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumCount,
)]
pub enum UniteonType {
    Normeon,
    Flamiteon,
    Aquoreon,
    Herbeon,
    Voltineon,
    Battleon,
    Venomeon,
    Terreon,
    Aeroeon,
    Psycoeon,
    Buggeon,
    Stondeon,
    Spectreon,
    Shadoweon,
    Dracineon,
    Ironeon,
    Faerieon,
}

impl fmt::Display for UniteonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl UniteonType {
    /// Matchup multiplier for a single attacking type against a single defending type.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective, 0.0 = No Effect
    pub fn type_effectiveness(attacking: UniteonType, defending: UniteonType) -> f32 {
        use UniteonType::*;

        match (attacking, defending) {
            // Normeon
            (Normeon, Spectreon) => 0.0,
            (Normeon, Stondeon) | (Normeon, Ironeon) => 0.5,
            (Normeon, _) => 1.0,

            // Flamiteon
            (Flamiteon, Flamiteon)
            | (Flamiteon, Aquoreon)
            | (Flamiteon, Stondeon)
            | (Flamiteon, Dracineon) => 0.5,
            (Flamiteon, Herbeon) | (Flamiteon, Buggeon) | (Flamiteon, Ironeon) => 2.0,
            (Flamiteon, _) => 1.0,

            // Aquoreon
            (Aquoreon, Aquoreon) | (Aquoreon, Herbeon) | (Aquoreon, Dracineon) => 0.5,
            (Aquoreon, Flamiteon) | (Aquoreon, Terreon) | (Aquoreon, Stondeon) => 2.0,
            (Aquoreon, _) => 1.0,

            // Herbeon
            (Herbeon, Flamiteon)
            | (Herbeon, Herbeon)
            | (Herbeon, Venomeon)
            | (Herbeon, Aeroeon)
            | (Herbeon, Buggeon)
            | (Herbeon, Dracineon)
            | (Herbeon, Ironeon) => 0.5,
            (Herbeon, Aquoreon) | (Herbeon, Terreon) | (Herbeon, Stondeon) => 2.0,
            (Herbeon, _) => 1.0,

            // Voltineon
            (Voltineon, Voltineon) | (Voltineon, Herbeon) | (Voltineon, Dracineon) => 0.5,
            (Voltineon, Terreon) => 0.0,
            (Voltineon, Aquoreon) | (Voltineon, Aeroeon) => 2.0,
            (Voltineon, _) => 1.0,

            // Battleon
            (Battleon, Venomeon)
            | (Battleon, Aeroeon)
            | (Battleon, Psycoeon)
            | (Battleon, Buggeon)
            | (Battleon, Faerieon) => 0.5,
            (Battleon, Spectreon) => 0.0,
            (Battleon, Normeon)
            | (Battleon, Stondeon)
            | (Battleon, Shadoweon)
            | (Battleon, Ironeon) => 2.0,
            (Battleon, _) => 1.0,

            // Venomeon
            (Venomeon, Venomeon)
            | (Venomeon, Terreon)
            | (Venomeon, Stondeon)
            | (Venomeon, Spectreon) => 0.5,
            (Venomeon, Ironeon) => 0.0,
            (Venomeon, Herbeon) | (Venomeon, Faerieon) => 2.0,
            (Venomeon, _) => 1.0,

            // Terreon
            (Terreon, Herbeon) | (Terreon, Buggeon) => 0.5,
            (Terreon, Aeroeon) => 0.0,
            (Terreon, Flamiteon)
            | (Terreon, Voltineon)
            | (Terreon, Venomeon)
            | (Terreon, Stondeon)
            | (Terreon, Ironeon) => 2.0,
            (Terreon, _) => 1.0,

            // Aeroeon
            (Aeroeon, Voltineon) | (Aeroeon, Stondeon) | (Aeroeon, Ironeon) => 0.5,
            (Aeroeon, Herbeon) | (Aeroeon, Battleon) | (Aeroeon, Buggeon) => 2.0,
            (Aeroeon, _) => 1.0,

            // Psycoeon
            (Psycoeon, Psycoeon) | (Psycoeon, Ironeon) => 0.5,
            (Psycoeon, Shadoweon) => 0.0,
            (Psycoeon, Battleon) | (Psycoeon, Venomeon) => 2.0,
            (Psycoeon, _) => 1.0,

            // Buggeon
            (Buggeon, Flamiteon)
            | (Buggeon, Battleon)
            | (Buggeon, Venomeon)
            | (Buggeon, Aeroeon)
            | (Buggeon, Spectreon)
            | (Buggeon, Ironeon)
            | (Buggeon, Faerieon) => 0.5,
            (Buggeon, Herbeon) | (Buggeon, Psycoeon) | (Buggeon, Shadoweon) => 2.0,
            (Buggeon, _) => 1.0,

            // Stondeon
            (Stondeon, Battleon) | (Stondeon, Terreon) | (Stondeon, Ironeon) => 0.5,
            (Stondeon, Flamiteon) | (Stondeon, Aeroeon) | (Stondeon, Buggeon) => 2.0,
            (Stondeon, _) => 1.0,

            // Spectreon
            (Spectreon, Normeon) => 0.0,
            (Spectreon, Shadoweon) => 0.5,
            (Spectreon, Psycoeon) | (Spectreon, Spectreon) => 2.0,
            (Spectreon, _) => 1.0,

            // Shadoweon
            (Shadoweon, Battleon) | (Shadoweon, Shadoweon) | (Shadoweon, Faerieon) => 0.5,
            (Shadoweon, Psycoeon) | (Shadoweon, Spectreon) => 2.0,
            (Shadoweon, _) => 1.0,

            // Dracineon
            (Dracineon, Ironeon) => 0.5,
            (Dracineon, Faerieon) => 0.0,
            (Dracineon, Dracineon) => 2.0,
            (Dracineon, _) => 1.0,

            // Ironeon
            (Ironeon, Flamiteon)
            | (Ironeon, Aquoreon)
            | (Ironeon, Voltineon)
            | (Ironeon, Ironeon) => 0.5,
            (Ironeon, Stondeon) | (Ironeon, Faerieon) => 2.0,
            (Ironeon, _) => 1.0,

            // Faerieon
            (Faerieon, Flamiteon) | (Faerieon, Venomeon) | (Faerieon, Ironeon) => 0.5,
            (Faerieon, Battleon) | (Faerieon, Dracineon) | (Faerieon, Shadoweon) => 2.0,
            (Faerieon, _) => 1.0,
        }
    }

    /// Combined multiplier against a defender with one or two types.
    /// An absent second type contributes a neutral 1.0.
    pub fn effectiveness_against(
        attacking: UniteonType,
        primary: UniteonType,
        secondary: Option<UniteonType>,
    ) -> f32 {
        let second = secondary
            .map(|defending| Self::type_effectiveness(attacking, defending))
            .unwrap_or(1.0);
        Self::type_effectiveness(attacking, primary) * second
    }

    pub fn is_immune(attacking: UniteonType, defending: UniteonType) -> bool {
        Self::type_effectiveness(attacking, defending) == 0.0
    }
}
