#[cfg(test)]
mod tests {
    use crate::battle::state::{
        ActionChoice, BattleEvent, Intent, MessageKey, Side, UnitRef,
    };
    use crate::battle::stats::StageDirection;
    use crate::battle::tests::common::{
        assert_ok, message_keys, start_battle, stat_move, test_move, wild, TestUnitBuilder,
    };
    use crate::party::Party;
    use pretty_assertions::assert_eq;
    use schema::{MoveCategory, MoveTarget, MoveTemplate, StatType};

    fn gamer_with(moves: Vec<MoveTemplate>) -> Party {
        Party::new(vec![TestUnitBuilder::new("Flamlet")
            .with_stats([30, 10, 10, 10, 10, 20])
            .with_moves(moves)
            .build()])
    }

    fn foe() -> Party {
        Party::new(vec![TestUnitBuilder::new("Sproutle")
            .with_stats([30, 10, 10, 10, 10, 10])
            .build()])
    }

    #[test]
    fn test_growl_lowers_the_foe_attack() {
        let mut gamer = gamer_with(vec![stat_move(
            45,
            "Growl",
            MoveTarget::Opponent,
            StatType::Attack,
            -1,
        )]);
        let mut foe = foe();
        let mut session = start_battle(&mut gamer, &mut foe, wild(), vec![1, 100, 100, 100, 100]);

        assert_ok(session.handle(Intent::SelectAction(ActionChoice::Fight)));
        let events = assert_ok(session.handle(Intent::ConfirmMove(0)));

        let foe_ref = UnitRef::new(Side::Foe, 0);
        let fell = BattleEvent::message(
            MessageKey::StatFell,
            vec!["Sproutle".to_string(), "Attack".to_string()],
        );
        assert_eq!(
            &events[1..3],
            &[
                BattleEvent::StatChanged {
                    unit: foe_ref,
                    stat: StatType::Attack,
                    direction: StageDirection::Fell
                },
                fell.clone(),
            ]
        );
        assert_eq!(session.describe(&fell), Some("Sproutle's Attack fell!".to_string()));
        assert_eq!(
            session.active_unit(Side::Foe).unwrap().stages,
            vec![(StatType::Attack, -1)]
        );
        // Attack 10 at -1 rounds to 7, so Tackle only does 4.
        assert!(events.contains(&BattleEvent::DamageApplied {
            unit: UnitRef::new(Side::Gamer, 0),
            amount: 4,
            fainted: false
        }));
    }

    #[test]
    fn test_self_boost_and_its_ceiling() {
        let mut gamer = gamer_with(vec![stat_move(
            106,
            "Harden",
            MoveTarget::User,
            StatType::Defense,
            1,
        )]);
        if let Some(unit) = gamer.get_mut(0) {
            unit.stat_stages.set(StatType::Defense, 5);
        }
        let mut foe = foe();
        let mut session = start_battle(
            &mut gamer,
            &mut foe,
            wild(),
            vec![1, 100, 100, 100, 100, 1, 100, 100, 100, 100],
        );

        assert_ok(session.handle(Intent::SelectAction(ActionChoice::Fight)));
        let events = assert_ok(session.handle(Intent::ConfirmMove(0)));
        assert_eq!(
            message_keys(&events),
            vec![
                MessageKey::UsedMove,
                MessageKey::StatRose,
                MessageKey::UsedMove,
                MessageKey::ChooseAction
            ]
        );
        assert!(events.contains(&BattleEvent::StatChanged {
            unit: UnitRef::new(Side::Gamer, 0),
            stat: StatType::Defense,
            direction: StageDirection::Rose
        }));

        assert_ok(session.handle(Intent::SelectAction(ActionChoice::Fight)));
        let events = assert_ok(session.handle(Intent::ConfirmMove(0)));
        assert!(events.contains(&BattleEvent::message(
            MessageKey::StatWontGoHigher,
            vec!["Flamlet".to_string(), "Defense".to_string()]
        )));
        assert_eq!(
            session.active_unit(Side::Gamer).unwrap().stages,
            vec![(StatType::Defense, 6)]
        );
        assert_eq!(session.rng().remaining(), 0);
    }

    #[test]
    fn test_never_miss_move_skips_the_accuracy_roll() {
        let mut gamer = gamer_with(vec![test_move(
            129,
            "Swift",
            MoveCategory::Special,
            60,
            None,
        )]);
        let mut foe = foe();
        // foe pick, Swift crit and spread, then foe Tackle.
        let mut session = start_battle(&mut gamer, &mut foe, wild(), vec![1, 100, 100, 100, 100, 100]);

        assert_ok(session.handle(Intent::SelectAction(ActionChoice::Fight)));
        let events = assert_ok(session.handle(Intent::ConfirmMove(0)));

        assert!(!message_keys(&events).contains(&MessageKey::AttackMissed));
        assert_eq!(session.rng().remaining(), 0);
        // 0.08 * 60 + 2 = 6.8
        assert_eq!(session.active_unit(Side::Foe).unwrap().current_hp, 24);
    }
}
