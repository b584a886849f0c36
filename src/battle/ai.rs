//! Move choice for the computer-controlled side.

use crate::battle::rng::BattleRng;
use crate::uniteon::{BattleUnit, MoveChoice};

/// A trait for any system that can pick a move for a computer-controlled unit.
pub trait Behavior {
    /// Decide the move `unit` commits to this round. Falls back to Struggle
    /// when no known move has PP.
    fn choose_move(&self, unit: &BattleUnit, rng: &mut dyn BattleRng) -> MoveChoice;
}

/// Picks uniformly among the moves that still have PP.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBehavior;

impl Behavior for RandomBehavior {
    fn choose_move(&self, unit: &BattleUnit, rng: &mut dyn BattleRng) -> MoveChoice {
        let usable = unit.usable_move_slots();
        if usable.is_empty() {
            return MoveChoice::Struggle;
        }
        let slot = usable[rng.next_index(usable.len(), "foe move")];
        MoveChoice::Slot(slot)
    }
}

/// Always uses the first move with PP. Makes a foe's choices predictable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstUsableBehavior;

impl Behavior for FirstUsableBehavior {
    fn choose_move(&self, unit: &BattleUnit, _rng: &mut dyn BattleRng) -> MoveChoice {
        unit.usable_move_slots()
            .first()
            .map(|&slot| MoveChoice::Slot(slot))
            .unwrap_or(MoveChoice::Struggle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::rng::ScriptedRng;
    use crate::battle::tests::common::{test_move, TestUnitBuilder};
    use pretty_assertions::assert_eq;
    use schema::MoveCategory;

    fn two_move_unit() -> BattleUnit {
        TestUnitBuilder::new("Picker")
            .with_moves(vec![
                test_move(1, "Tackle", MoveCategory::Physical, 40, Some(100)),
                test_move(2, "Growl", MoveCategory::Status, 0, Some(100)),
            ])
            .build()
    }

    #[test]
    fn test_random_behavior_only_picks_moves_with_pp() {
        let mut unit = two_move_unit();
        unit.moves[0].pp = 0;
        for roll in [1, 2, 3, 100] {
            let mut rng = ScriptedRng::new(vec![roll]);
            assert_eq!(RandomBehavior.choose_move(&unit, &mut rng), MoveChoice::Slot(1));
        }
    }

    #[test]
    fn test_random_behavior_struggles_without_drawing() {
        let mut unit = two_move_unit();
        for move_instance in &mut unit.moves {
            move_instance.pp = 0;
        }
        let mut rng = ScriptedRng::new(vec![7]);
        assert_eq!(RandomBehavior.choose_move(&unit, &mut rng), MoveChoice::Struggle);
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_first_usable_behavior() {
        let mut unit = two_move_unit();
        let mut rng = ScriptedRng::new(vec![]);
        assert_eq!(FirstUsableBehavior.choose_move(&unit, &mut rng), MoveChoice::Slot(0));
        unit.moves[0].pp = 0;
        assert_eq!(FirstUsableBehavior.choose_move(&unit, &mut rng), MoveChoice::Slot(1));
    }
}
