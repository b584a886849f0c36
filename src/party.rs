use crate::uniteon::BattleUnit;

/// An ordered roster of units. Slot order is the order they are sent out in.
#[derive(Debug, Clone, Default)]
pub struct Party {
    units: Vec<BattleUnit>,
}

impl Party {
    pub fn new(units: Vec<BattleUnit>) -> Self {
        Self { units }
    }

    /// First slot whose unit can still fight.
    pub fn healthy_unit(&self) -> Option<usize> {
        self.units.iter().position(|unit| !unit.is_fainted())
    }

    pub fn has_healthy(&self) -> bool {
        self.healthy_unit().is_some()
    }

    /// Restore every member's HP and PP. This is what the healer does.
    pub fn full_heal(&mut self) {
        for unit in &mut self.units {
            unit.full_heal();
        }
        tracing::debug!(members = self.units.len(), "party fully healed");
    }

    pub fn reset_stat_stages(&mut self) {
        for unit in &mut self.units {
            unit.reset_stat_stages();
        }
    }

    /// Add a member unless the party already holds `capacity` units.
    pub fn push(&mut self, unit: BattleUnit, capacity: usize) -> bool {
        if self.units.len() >= capacity {
            return false;
        }
        self.units.push(unit);
        true
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&BattleUnit> {
        self.units.get(slot)
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut BattleUnit> {
        self.units.get_mut(slot)
    }

    pub fn units(&self) -> &[BattleUnit] {
        &self.units
    }
}
