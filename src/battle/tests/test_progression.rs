#[cfg(test)]
mod tests {
    use crate::battle::engine::BattleSession;
    use crate::battle::rng::ScriptedRng;
    use crate::battle::state::{
        ActionChoice, BattleEvent, BattleKind, BattleOutcome, BattlePhase, ForgetChoice, Intent,
        MessageKey, Side, UnitRef,
    };
    use crate::battle::tests::common::{
        assert_ok, message_keys, start_battle, test_move, wild, TestUnitBuilder,
    };
    use crate::errors::{ActionError, BattleEngineError};
    use crate::party::Party;
    use crate::progression::curve::ProgressionCurve;
    use crate::uniteon::BattleUnit;
    use pretty_assertions::assert_eq;
    use schema::{GrowthRate, MoveCategory, MoveId, MoveTemplate};

    fn physical(id: u16, name: &str) -> MoveTemplate {
        test_move(id, name, MoveCategory::Physical, 40, Some(100))
    }

    fn ember() -> MoveTemplate {
        physical(33, "Ember")
    }

    fn four_moves() -> Vec<MoveTemplate> {
        vec![
            physical(1, "Tackle"),
            physical(2, "Growl"),
            physical(3, "Scratch"),
            physical(4, "Quick Attack"),
        ]
    }

    /// A fast level 5 unit that one-shots a frail foe and learns Ember at 6.
    fn learner(moves: Vec<MoveTemplate>) -> BattleUnit {
        TestUnitBuilder::new("Flamlet")
            .with_stats([30, 40, 10, 10, 10, 20])
            .with_moves(moves)
            .with_learnset(vec![(6, ember())])
            .build()
    }

    fn frail_foe(name: &str, level: u8, base_experience: u16) -> BattleUnit {
        TestUnitBuilder::new(name)
            .with_level(level)
            .with_base_experience(base_experience)
            .with_stats([10, 10, 10, 10, 10, 10])
            .build()
    }

    fn win_round(session: &mut BattleSession<'_, ScriptedRng>) -> Vec<BattleEvent> {
        assert_ok(session.handle(Intent::SelectAction(ActionChoice::Fight)));
        assert_ok(session.handle(Intent::ConfirmMove(0)))
    }

    fn move_names(session: &BattleSession<'_, ScriptedRng>) -> Vec<String> {
        session
            .active_unit(Side::Gamer)
            .unwrap()
            .moves
            .into_iter()
            .map(|view| view.name)
            .collect()
    }

    #[test]
    fn test_large_award_crosses_several_levels() {
        // Arrange: 255 * 10 / 7 = 364 experience on top of 125.
        let mut gamer = Party::new(vec![TestUnitBuilder::new("Flamlet")
            .with_stats([30, 40, 10, 10, 10, 20])
            .build()]);
        let mut foe = Party::new(vec![frail_foe("Gloomfang", 10, 255)]);
        let mut session = start_battle(&mut gamer, &mut foe, wild(), vec![1, 100, 100, 100]);

        // Act
        let events = win_round(&mut session);

        // Assert
        let gamer_ref = UnitRef::new(Side::Gamer, 0);
        let tail: Vec<BattleEvent> = events
            .iter()
            .skip_while(|event| !matches!(event, BattleEvent::ExperienceGained { .. }))
            .cloned()
            .collect();
        assert_eq!(
            tail,
            vec![
                BattleEvent::ExperienceGained {
                    unit: gamer_ref,
                    amount: 364
                },
                BattleEvent::LevelUp {
                    unit: gamer_ref,
                    level: 6
                },
                BattleEvent::LevelUp {
                    unit: gamer_ref,
                    level: 7
                },
                BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Won
                },
            ]
        );
        let view = session.active_unit(Side::Gamer).unwrap();
        assert_eq!(view.level, 7);
        assert_eq!(view.experience, 489);
        assert_eq!(view.current_hp, view.max_hp);
    }

    #[test]
    fn test_award_past_the_cap_reports_only_what_was_added() {
        // Arrange: 100 short of the level 100 threshold, the foe is worth 364.
        let cap = GrowthRate::MediumFast.experience_cap();
        let mut veteran = TestUnitBuilder::new("Flamlet")
            .with_level(99)
            .with_stats([30, 40, 10, 10, 10, 20])
            .build();
        veteran.experience = cap - 100;
        let mut gamer = Party::new(vec![veteran]);
        let mut foe = Party::new(vec![frail_foe("Gloomfang", 10, 255)]);

        {
            let mut session = start_battle(&mut gamer, &mut foe, wild(), vec![1, 100, 100, 100]);

            // Act
            let events = win_round(&mut session);

            // Assert
            let gamer_ref = UnitRef::new(Side::Gamer, 0);
            let tail: Vec<BattleEvent> = events
                .iter()
                .skip_while(|event| !matches!(event, BattleEvent::ExperienceGained { .. }))
                .cloned()
                .collect();
            assert_eq!(
                tail,
                vec![
                    BattleEvent::ExperienceGained {
                        unit: gamer_ref,
                        amount: 100
                    },
                    BattleEvent::LevelUp {
                        unit: gamer_ref,
                        level: 100
                    },
                    BattleEvent::BattleEnded {
                        outcome: BattleOutcome::Won
                    },
                ]
            );
        }

        let unit = gamer.get(0).unwrap();
        assert_eq!(unit.level(), 100);
        assert_eq!(unit.experience(), cap);
    }

    #[test]
    fn test_new_move_fills_a_free_slot() {
        let mut gamer = Party::new(vec![learner(vec![physical(1, "Tackle")])]);
        let mut foe = Party::new(vec![frail_foe("Sproutle", 5, 200)]);
        let mut session = start_battle(&mut gamer, &mut foe, wild(), vec![1, 100, 100, 100]);

        let events = win_round(&mut session);

        assert!(events.contains(&BattleEvent::MoveLearned {
            unit: UnitRef::new(Side::Gamer, 0),
            move_id: MoveId(33),
            move_name: "Ember".to_string()
        }));
        assert_eq!(move_names(&session), vec!["Tackle", "Ember"]);
        assert_eq!(
            session.current_phase(),
            BattlePhase::BattleOver(BattleOutcome::Won)
        );
    }

    #[test]
    fn test_full_move_set_asks_what_to_forget() {
        let mut gamer = Party::new(vec![learner(four_moves())]);
        let mut foe = Party::new(vec![frail_foe("Sproutle", 5, 200)]);
        let mut session = start_battle(&mut gamer, &mut foe, wild(), vec![1, 100, 100, 100]);

        let events = win_round(&mut session);

        assert!(events.contains(&BattleEvent::ExperienceGained {
            unit: UnitRef::new(Side::Gamer, 0),
            amount: 142
        }));
        assert_eq!(
            events.last(),
            Some(&BattleEvent::message(
                MessageKey::TryingToLearn,
                vec!["Flamlet".to_string(), "Ember".to_string()]
            ))
        );
        assert_eq!(session.current_phase(), BattlePhase::MoveToForget);
        assert_eq!(session.move_to_learn().map(|m| m.name.as_str()), Some("Ember"));
    }

    #[test]
    fn test_declining_keeps_the_old_moves() {
        let mut gamer = Party::new(vec![learner(four_moves())]);
        let mut foe = Party::new(vec![frail_foe("Sproutle", 5, 200)]);
        let mut session = start_battle(&mut gamer, &mut foe, wild(), vec![1, 100, 100, 100]);
        win_round(&mut session);

        let events = assert_ok(session.handle(Intent::SelectForgetSlot(ForgetChoice::Decline)));

        assert_eq!(
            events,
            vec![
                BattleEvent::message(
                    MessageKey::DidNotLearn,
                    vec!["Flamlet".to_string(), "Ember".to_string()]
                ),
                BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Won
                },
            ]
        );
        assert_eq!(
            move_names(&session),
            vec!["Tackle", "Growl", "Scratch", "Quick Attack"]
        );
        let view = session.active_unit(Side::Gamer).unwrap();
        assert_eq!(view.moves[0].pp, 9);
        assert_eq!(view.moves[1].pp, 10);
    }

    #[test]
    fn test_forgetting_a_slot_learns_the_new_move() {
        let mut gamer = Party::new(vec![learner(four_moves())]);
        let mut foe = Party::new(vec![frail_foe("Sproutle", 5, 200)]);
        let mut session = start_battle(&mut gamer, &mut foe, wild(), vec![1, 100, 100, 100]);
        win_round(&mut session);

        let err = session
            .handle(Intent::SelectForgetSlot(ForgetChoice::Slot(9)))
            .unwrap_err();
        assert!(matches!(
            err,
            BattleEngineError::Action(ActionError::InvalidForgetSlot(9))
        ));
        assert_eq!(session.current_phase(), BattlePhase::MoveToForget);

        let events = assert_ok(session.handle(Intent::SelectForgetSlot(ForgetChoice::Slot(1))));

        assert_eq!(
            events,
            vec![
                BattleEvent::message(
                    MessageKey::ForgotAndLearned,
                    vec![
                        "Flamlet".to_string(),
                        "Growl".to_string(),
                        "Ember".to_string()
                    ]
                ),
                BattleEvent::MoveLearned {
                    unit: UnitRef::new(Side::Gamer, 0),
                    move_id: MoveId(33),
                    move_name: "Ember".to_string()
                },
                BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Won
                },
            ]
        );
        assert_eq!(
            move_names(&session),
            vec!["Tackle", "Ember", "Scratch", "Quick Attack"]
        );
        assert_eq!(session.active_unit(Side::Gamer).unwrap().moves[1].pp, 10);
    }

    #[test]
    fn test_mentor_battle_resumes_after_the_forget_prompt() {
        let mut gamer = Party::new(vec![learner(four_moves())]);
        let mut foe = Party::new(vec![
            frail_foe("Pebblit", 5, 200),
            frail_foe("Mindmote", 5, 64),
        ]);
        let mut session = start_battle(&mut gamer, &mut foe, BattleKind::Mentor, vec![1, 100, 100, 100]);
        win_round(&mut session);
        assert_eq!(session.current_phase(), BattlePhase::MoveToForget);

        let events = assert_ok(session.handle(Intent::SelectForgetSlot(ForgetChoice::Decline)));

        assert_eq!(
            message_keys(&events),
            vec![
                MessageKey::DidNotLearn,
                MessageKey::MentorSentOut,
                MessageKey::ChooseAction
            ]
        );
        assert_eq!(session.active_slot(Side::Foe), 1);
        assert_eq!(session.current_phase(), BattlePhase::ActionSelection);
    }
}
