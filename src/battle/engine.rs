use crate::battle::ai::{Behavior, RandomBehavior};
use crate::battle::calculators::{apply_stat_effect, resolve_damage, EffectivenessTier};
use crate::battle::rng::{BattleRng, SeededRng};
use crate::battle::state::{
    ActionChoice, BattleEvent, BattleKind, BattleOutcome, BattlePhase, EventBus, ForgetChoice,
    Intent, MessageKey, Side, UnitRef,
};
use crate::battle::stats::{move_hits, StageDirection};
use crate::battle::turn_orchestrator::{
    determine_action_order, ActionPriority, QueuedAction, RoundAction,
};
use crate::battle::views::{RosterView, UnitView};
use crate::config::BattleConfig;
use crate::errors::{report_invariant_violation, ActionError, BattleResult, BattleStateError};
use crate::party::Party;
use crate::progression::{
    apply_experience, forget_and_learn, ForgetOutcome, ProgressionStep, RewardCalculator,
};
use crate::uniteon::{BattleUnit, MoveChoice, MAX_LEVEL};
use schema::{MoveTarget, MoveTemplate};
use std::collections::VecDeque;
use std::sync::Arc;

/// A move waiting for the player to pick a slot to forget.
#[derive(Debug, Clone)]
struct PendingLearn {
    slot: usize,
    template: Arc<MoveTemplate>,
}

/// Where the battle picks up once every pending move has been dealt with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resume {
    ContinueRound,
    FoeSwitch,
    GamerFaintSwitch,
    BattleOver(BattleOutcome),
}

#[derive(Debug, Clone, Copy, Default)]
struct MoveOutcome {
    target_fainted: bool,
}

/// One battle between the gamer's party and a wild Uniteon or a mentor.
///
/// Each [`Intent`] runs to completion and returns the events it produced, in
/// order. Rejected intents return an [`ActionError`] and leave the session
/// exactly as it was.
pub struct BattleSession<'p, R: BattleRng = SeededRng> {
    parties: [&'p mut Party; 2],
    active: [usize; 2],
    kind: BattleKind,
    config: BattleConfig,
    rng: R,
    behavior: Box<dyn Behavior>,
    phase: BattlePhase,
    round: u32,
    queue: VecDeque<QueuedAction>,
    pending_learns: VecDeque<PendingLearn>,
    resume: Resume,
}

impl<'p> BattleSession<'p, SeededRng> {
    /// Build a session whose RNG is seeded from `config.seed`, or from
    /// entropy when no seed is set.
    pub fn new(
        gamer: &'p mut Party,
        foe: &'p mut Party,
        kind: BattleKind,
        config: BattleConfig,
    ) -> BattleResult<Self> {
        let rng = match config.seed {
            Some(seed) => SeededRng::new(seed),
            None => SeededRng::from_entropy(),
        };
        Self::with_rng(gamer, foe, kind, config, rng)
    }
}

impl<'p, R: BattleRng> BattleSession<'p, R> {
    pub fn with_rng(
        gamer: &'p mut Party,
        foe: &'p mut Party,
        kind: BattleKind,
        config: BattleConfig,
        rng: R,
    ) -> BattleResult<Self> {
        let gamer_active = gamer
            .healthy_unit()
            .ok_or(BattleStateError::EmptyPartyAtStart(Side::Gamer))?;
        let foe_active = foe
            .healthy_unit()
            .ok_or(BattleStateError::EmptyPartyAtStart(Side::Foe))?;

        tracing::debug!(
            ?kind,
            gamer_members = gamer.len(),
            foe_members = foe.len(),
            "battle session created"
        );

        Ok(Self {
            parties: [gamer, foe],
            active: [gamer_active, foe_active],
            kind,
            config,
            rng,
            behavior: Box::new(RandomBehavior),
            phase: BattlePhase::Start,
            round: 0,
            queue: VecDeque::new(),
            pending_learns: VecDeque::new(),
            resume: Resume::ContinueRound,
        })
    }

    /// Replace the foe's move picker.
    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = behavior;
        self
    }

    // === Queries ===

    pub fn current_phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn kind(&self) -> BattleKind {
        self.kind
    }

    /// Number of rounds that have started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn active_slot(&self, side: Side) -> usize {
        self.active[side.index()]
    }

    pub fn active_unit(&self, side: Side) -> Option<UnitView> {
        let slot = self.active_slot(side);
        self.party(side)
            .get(slot)
            .map(|unit| UnitView::new(slot, unit, true))
    }

    /// Move slots the active unit of `side` can pick right now.
    pub fn legal_move_indices(&self, side: Side) -> Vec<usize> {
        self.party(side)
            .get(self.active_slot(side))
            .map(BattleUnit::usable_move_slots)
            .unwrap_or_default()
    }

    pub fn party_roster_view(&self, side: Side) -> RosterView {
        RosterView::new(side, self.party(side), self.active_slot(side))
    }

    /// The move offered during `MoveToForget`.
    pub fn move_to_learn(&self) -> Option<&MoveTemplate> {
        self.pending_learns
            .front()
            .map(|pending| pending.template.as_ref())
    }

    /// Human-readable text for an event produced by this session.
    pub fn describe(&self, event: &BattleEvent) -> Option<String> {
        event.format(|unit| self.unit_name(unit))
    }

    pub(crate) fn party(&self, side: Side) -> &Party {
        &*self.parties[side.index()]
    }

    fn unit_name(&self, unit: UnitRef) -> String {
        self.party(unit.side)
            .get(unit.slot)
            .map(|unit| unit.name().to_string())
            .unwrap_or_default()
    }

    fn active_battle_unit(&self, side: Side) -> BattleResult<&BattleUnit> {
        let slot = self.active_slot(side);
        Ok(self.parties[side.index()].get(slot).ok_or_else(|| {
            report_invariant_violation(format!("{:?} active slot {} is empty", side, slot))
        })?)
    }

    // === Intents ===

    pub fn handle(&mut self, intent: Intent) -> BattleResult<Vec<BattleEvent>> {
        tracing::debug!(intent = ?intent, phase = ?self.phase, "handling intent");
        let mut bus = EventBus::new();

        match (self.phase, intent) {
            (BattlePhase::Start, Intent::Confirm) => self.start(&mut bus),
            (BattlePhase::ActionSelection, Intent::SelectAction(choice)) => {
                self.select_action(choice, &mut bus)?
            }
            (BattlePhase::MoveSelection, Intent::ConfirmMove(index)) => {
                self.confirm_move(index, &mut bus)?
            }
            (
                BattlePhase::MoveSelection | BattlePhase::PartyScreenFromSelection,
                Intent::Cancel,
            ) => {
                self.set_phase(BattlePhase::ActionSelection);
                bus.message(MessageKey::ChooseAction, vec![]);
            }
            (
                BattlePhase::PartyScreenFromSelection | BattlePhase::PartyScreenFromFaint,
                Intent::SelectPartyMember(index),
            ) => self.select_party_member(index, &mut bus)?,
            (BattlePhase::MoveToForget, Intent::SelectForgetSlot(choice)) => {
                self.resolve_forget(choice, &mut bus)?
            }
            (phase, Intent::Cancel) => return Err(ActionError::CannotCancel(phase).into()),
            (phase, intent) => {
                return Err(ActionError::WrongPhase {
                    intent: intent.name(),
                    phase,
                }
                .into())
            }
        }

        tracing::trace!("events:\n{}", bus);
        Ok(bus.into_events())
    }

    fn start(&mut self, bus: &mut EventBus) {
        let foe = UnitRef::new(Side::Foe, self.active_slot(Side::Foe));
        let foe_name = self.unit_name(foe);
        match self.kind {
            BattleKind::Wild { .. } => bus.message(MessageKey::WildAppeared, vec![foe_name]),
            BattleKind::Mentor => {
                bus.message(MessageKey::MentorChallenge, vec![]);
                bus.message(MessageKey::MentorSentOut, vec![foe_name]);
            }
        }
        bus.push(BattleEvent::UnitSwitchedIn { unit: foe });

        let gamer = UnitRef::new(Side::Gamer, self.active_slot(Side::Gamer));
        bus.message(MessageKey::GoUnit, vec![self.unit_name(gamer)]);
        bus.push(BattleEvent::UnitSwitchedIn { unit: gamer });

        self.enter_action_selection(bus);
    }

    fn select_action(&mut self, choice: ActionChoice, bus: &mut EventBus) -> BattleResult<()> {
        match choice {
            ActionChoice::Fight => {
                let unit = self.active_battle_unit(Side::Gamer)?;
                if unit.usable_move_slots().is_empty() {
                    let name = unit.name().to_string();
                    self.set_phase(BattlePhase::NoMoveSelection);
                    bus.message(MessageKey::NoMovesLeft, vec![name]);
                    self.execute_round(RoundAction::UseMove(MoveChoice::Struggle), bus)?;
                } else {
                    self.set_phase(BattlePhase::MoveSelection);
                    bus.message(MessageKey::ChooseMove, vec![]);
                }
            }
            ActionChoice::Party => {
                self.set_phase(BattlePhase::PartyScreenFromSelection);
                bus.message(MessageKey::ChooseMember, vec![]);
            }
            ActionChoice::Run => match self.kind {
                BattleKind::Mentor => bus.message(MessageKey::CannotRun, vec![]),
                BattleKind::Wild { .. } => {
                    bus.message(MessageKey::RanAway, vec![]);
                    self.enter_battle_over(BattleOutcome::Ran, bus)?;
                }
            },
        }
        Ok(())
    }

    fn confirm_move(&mut self, index: usize, bus: &mut EventBus) -> BattleResult<()> {
        let unit = self.active_battle_unit(Side::Gamer)?;
        let move_instance = unit
            .moves()
            .get(index)
            .ok_or(ActionError::InvalidMoveIndex(index))?;
        if !move_instance.has_pp() {
            bus.message(
                MessageKey::NoPpLeft,
                vec![move_instance.template().name.clone()],
            );
            return Ok(());
        }
        self.execute_round(RoundAction::UseMove(MoveChoice::Slot(index)), bus)
    }

    fn select_party_member(&mut self, index: usize, bus: &mut EventBus) -> BattleResult<()> {
        let unit = self
            .party(Side::Gamer)
            .get(index)
            .ok_or(ActionError::InvalidMemberIndex(index))?;
        if unit.is_fainted() {
            bus.message(MessageKey::NoEnergyLeft, vec![unit.name().to_string()]);
            return Ok(());
        }
        if index == self.active_slot(Side::Gamer) {
            bus.message(MessageKey::AlreadyInBattle, vec![unit.name().to_string()]);
            return Ok(());
        }

        if self.phase == BattlePhase::PartyScreenFromSelection {
            self.execute_round(RoundAction::Switch(index), bus)
        } else {
            // Filling a fainted slot costs no action and grants the foe none.
            self.switch_gamer(index, bus);
            self.enter_action_selection(bus);
            Ok(())
        }
    }

    fn resolve_forget(&mut self, choice: ForgetChoice, bus: &mut EventBus) -> BattleResult<()> {
        let pending = self
            .pending_learns
            .front()
            .cloned()
            .ok_or_else(|| report_invariant_violation("no move waiting to be learned".to_string()))?;
        let unit_ref = UnitRef::new(Side::Gamer, pending.slot);
        let unit = self.parties[Side::Gamer.index()]
            .get_mut(pending.slot)
            .ok_or_else(|| {
                report_invariant_violation(format!("learner slot {} is empty", pending.slot))
            })?;

        let slot = match choice {
            ForgetChoice::Slot(slot) if slot >= unit.moves().len() => {
                return Err(ActionError::InvalidForgetSlot(slot).into())
            }
            ForgetChoice::Slot(slot) => Some(slot),
            ForgetChoice::Decline => None,
        };

        match forget_and_learn(unit, slot, Arc::clone(&pending.template)) {
            Some(ForgetOutcome::Replaced { forgotten, learned }) => {
                bus.message(
                    MessageKey::ForgotAndLearned,
                    vec![
                        unit.name().to_string(),
                        forgotten.template().name.clone(),
                        learned.name.clone(),
                    ],
                );
                bus.push(BattleEvent::MoveLearned {
                    unit: unit_ref,
                    move_id: learned.id,
                    move_name: learned.name.clone(),
                });
            }
            Some(ForgetOutcome::Declined(template)) => bus.message(
                MessageKey::DidNotLearn,
                vec![unit.name().to_string(), template.name.clone()],
            ),
            None => {
                return Err(ActionError::InvalidForgetSlot(slot.unwrap_or_default()).into());
            }
        }

        self.pending_learns.pop_front();
        self.advance(bus)
    }

    // === Round resolution ===

    fn execute_round(&mut self, gamer_action: RoundAction, bus: &mut EventBus) -> BattleResult<()> {
        self.set_phase(BattlePhase::ExecutingTurns);
        self.round += 1;
        tracing::debug!(round = self.round, ?gamer_action, "round started");

        let foe_slot = self.active_slot(Side::Foe);
        let foe = self.parties[Side::Foe.index()]
            .get(foe_slot)
            .ok_or_else(|| report_invariant_violation(format!("foe slot {} is empty", foe_slot)))?;
        let foe_choice = self.behavior.choose_move(foe, &mut self.rng);

        let gamer_priority = match gamer_action {
            RoundAction::UseMove(choice) => self.commit_move(Side::Gamer, choice)?,
            RoundAction::Switch(_) => ActionPriority::switch(),
        };
        let foe_priority = self.commit_move(Side::Foe, foe_choice)?;

        let order = determine_action_order(
            (
                QueuedAction {
                    side: Side::Gamer,
                    action: gamer_action,
                },
                gamer_priority,
            ),
            (
                QueuedAction {
                    side: Side::Foe,
                    action: RoundAction::UseMove(foe_choice),
                },
                foe_priority,
            ),
            &mut self.rng,
        );
        self.queue = order.into_iter().collect();
        self.resume = Resume::ContinueRound;
        self.continue_round(bus)
    }

    fn commit_move(&mut self, side: Side, choice: MoveChoice) -> BattleResult<ActionPriority> {
        let struggle_power = self.config.struggle_power;
        let slot = self.active_slot(side);
        let unit = self.parties[side.index()].get_mut(slot).ok_or_else(|| {
            report_invariant_violation(format!("{:?} active slot {} is empty", side, slot))
        })?;
        let move_instance = unit.move_for(choice, struggle_power).ok_or_else(|| {
            report_invariant_violation(format!("{} has no move for {:?}", unit.name(), choice))
        })?;
        unit.executing_move = Some(choice);
        Ok(ActionPriority::for_move(move_instance.template(), unit))
    }

    /// Run queued actions until the round ends or something needs input.
    fn continue_round(&mut self, bus: &mut EventBus) -> BattleResult<()> {
        while let Some(queued) = self.queue.pop_front() {
            match queued.action {
                RoundAction::Switch(slot) => self.switch_gamer(slot, bus),
                RoundAction::UseMove(choice) => {
                    // Fainted units and units that switched in this round have no move.
                    if self.active_battle_unit(queued.side)?.executing_move().is_none() {
                        tracing::debug!(side = ?queued.side, "skipping action with no turn");
                        continue;
                    }
                    self.set_phase(BattlePhase::ExecutingTurns);
                    let outcome = self.execute_move(queued.side, choice, bus)?;
                    if outcome.target_fainted {
                        return self.handle_faint(queued.side.opponent(), bus);
                    }
                }
            }
        }
        self.enter_action_selection(bus);
        Ok(())
    }

    fn execute_move(
        &mut self,
        side: Side,
        choice: MoveChoice,
        bus: &mut EventBus,
    ) -> BattleResult<MoveOutcome> {
        let attacker_ref = UnitRef::new(side, self.active_slot(side));
        let defender_ref = UnitRef::new(side.opponent(), self.active_slot(side.opponent()));

        let [gamer_party, foe_party] = &mut self.parties;
        let (attacker_party, defender_party) = match side {
            Side::Gamer => (gamer_party, foe_party),
            Side::Foe => (foe_party, gamer_party),
        };
        let attacker = attacker_party.get_mut(attacker_ref.slot).ok_or_else(|| {
            report_invariant_violation(format!("attacker {:?} missing", attacker_ref))
        })?;
        let defender = defender_party.get_mut(defender_ref.slot).ok_or_else(|| {
            report_invariant_violation(format!("defender {:?} missing", defender_ref))
        })?;

        let outcome = resolve_move(
            attacker,
            defender,
            (attacker_ref, defender_ref),
            choice,
            &self.config,
            &mut self.rng,
            bus,
        )?;
        attacker.executing_move = None;
        Ok(outcome)
    }

    fn handle_faint(&mut self, fainted_side: Side, bus: &mut EventBus) -> BattleResult<()> {
        let fainted = UnitRef::new(fainted_side, self.active_slot(fainted_side));
        tracing::debug!(?fainted, "unit fainted");
        bus.push(BattleEvent::UnitFainted { unit: fainted });
        // The only action left in the round would have been the fainted unit's.
        self.queue.clear();

        self.resume = match fainted_side {
            Side::Foe => {
                self.award_experience(fainted, bus)?;
                let foe_left = self.party(Side::Foe).has_healthy();
                if foe_left && self.kind == BattleKind::Mentor {
                    Resume::FoeSwitch
                } else {
                    Resume::BattleOver(BattleOutcome::Won)
                }
            }
            Side::Gamer => {
                if self.party(Side::Gamer).has_healthy() {
                    Resume::GamerFaintSwitch
                } else {
                    Resume::BattleOver(BattleOutcome::Lost)
                }
            }
        };
        self.advance(bus)
    }

    /// The gamer's active unit earns experience for `defeated`.
    fn award_experience(&mut self, defeated: UnitRef, bus: &mut EventBus) -> BattleResult<()> {
        let bonus = match self.kind {
            BattleKind::Mentor => self.config.mentor_exp_bonus,
            BattleKind::Wild { .. } => self.config.wild_exp_bonus,
        };
        let defeated_unit = self.parties[defeated.side.index()]
            .get(defeated.slot)
            .ok_or_else(|| report_invariant_violation(format!("{:?} missing", defeated)))?;
        let amount = RewardCalculator.experience_yield(defeated_unit, bonus);

        let victor_ref = UnitRef::new(Side::Gamer, self.active_slot(Side::Gamer));
        let victor = self.parties[Side::Gamer.index()]
            .get_mut(victor_ref.slot)
            .ok_or_else(|| report_invariant_violation(format!("{:?} missing", victor_ref)))?;
        if victor.is_fainted() || victor.level() >= MAX_LEVEL {
            return Ok(());
        }

        // Report what was added after the level-100 cap, not the raw yield.
        let before = victor.experience();
        let steps = apply_experience(victor, amount);
        bus.push(BattleEvent::ExperienceGained {
            unit: victor_ref,
            amount: victor.experience() - before,
        });
        for step in steps {
            match step {
                ProgressionStep::LevelUp(level) => bus.push(BattleEvent::LevelUp {
                    unit: victor_ref,
                    level,
                }),
                ProgressionStep::Learned(template) => bus.push(BattleEvent::MoveLearned {
                    unit: victor_ref,
                    move_id: template.id,
                    move_name: template.name.clone(),
                }),
                ProgressionStep::NeedsForget(template) => {
                    self.pending_learns.push_back(PendingLearn {
                        slot: victor_ref.slot,
                        template,
                    })
                }
            }
        }
        Ok(())
    }

    /// Prompt for the next pending move, or carry on where the round left off.
    fn advance(&mut self, bus: &mut EventBus) -> BattleResult<()> {
        while let Some(pending) = self.pending_learns.front() {
            let unit = self.parties[Side::Gamer.index()]
                .get(pending.slot)
                .ok_or_else(|| {
                    report_invariant_violation(format!("learner slot {} is empty", pending.slot))
                })?;
            if unit.knows_move(pending.template.id) {
                self.pending_learns.pop_front();
                continue;
            }
            let args = vec![unit.name().to_string(), pending.template.name.clone()];
            self.set_phase(BattlePhase::MoveToForget);
            bus.message(MessageKey::TryingToLearn, args);
            return Ok(());
        }

        match self.resume {
            Resume::ContinueRound => self.continue_round(bus),
            Resume::FoeSwitch => self.switch_in_next_foe(bus),
            Resume::GamerFaintSwitch => {
                self.set_phase(BattlePhase::PartyScreenFromFaint);
                bus.message(MessageKey::ChooseMember, vec![]);
                Ok(())
            }
            Resume::BattleOver(outcome) => self.enter_battle_over(outcome, bus),
        }
    }

    // === Switching ===

    fn switch_gamer(&mut self, slot: usize, bus: &mut EventBus) {
        self.set_phase(BattlePhase::Switching);
        let outgoing_slot = self.active_slot(Side::Gamer);
        if let Some(outgoing) = self.parties[Side::Gamer.index()].get_mut(outgoing_slot) {
            outgoing.reset_stat_stages();
            outgoing.executing_move = None;
            if !outgoing.is_fainted() {
                bus.message(MessageKey::ComeBack, vec![outgoing.name().to_string()]);
            }
        }

        self.active[Side::Gamer.index()] = slot;
        let unit = UnitRef::new(Side::Gamer, slot);
        bus.message(MessageKey::GoUnit, vec![self.unit_name(unit)]);
        bus.push(BattleEvent::UnitSwitchedIn { unit });
    }

    fn switch_in_next_foe(&mut self, bus: &mut EventBus) -> BattleResult<()> {
        self.set_phase(BattlePhase::FoeSwitching);
        let slot = self
            .party(Side::Foe)
            .healthy_unit()
            .ok_or_else(|| report_invariant_violation("mentor has nobody left".to_string()))?;
        self.active[Side::Foe.index()] = slot;

        let unit = UnitRef::new(Side::Foe, slot);
        bus.message(MessageKey::MentorSentOut, vec![self.unit_name(unit)]);
        bus.push(BattleEvent::UnitSwitchedIn { unit });
        self.enter_action_selection(bus);
        Ok(())
    }

    // === Phase changes ===

    fn set_phase(&mut self, phase: BattlePhase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "phase transition");
            self.phase = phase;
        }
    }

    fn clear_executing_moves(&mut self) {
        for (party, &slot) in self.parties.iter_mut().zip(self.active.iter()) {
            if let Some(unit) = party.get_mut(slot) {
                unit.executing_move = None;
            }
        }
    }

    fn enter_action_selection(&mut self, bus: &mut EventBus) {
        self.queue.clear();
        self.clear_executing_moves();
        self.set_phase(BattlePhase::ActionSelection);
        bus.message(MessageKey::ChooseAction, vec![]);
    }

    fn enter_battle_over(&mut self, outcome: BattleOutcome, bus: &mut EventBus) -> BattleResult<()> {
        self.queue.clear();
        self.pending_learns.clear();
        self.clear_executing_moves();
        self.set_phase(BattlePhase::BattleOver(outcome));
        for party in self.parties.iter_mut() {
            party.reset_stat_stages();
        }

        match outcome {
            BattleOutcome::Lost => {
                bus.message(MessageKey::OutOfUnits, vec![]);
                self.parties[Side::Gamer.index()].full_heal();
                bus.message(MessageKey::PartyHealed, vec![]);
            }
            BattleOutcome::Won => match self.kind {
                BattleKind::Mentor => bus.message(MessageKey::MentorDefeated, vec![]),
                BattleKind::Wild { capturable: true } => self.capture(bus)?,
                BattleKind::Wild { capturable: false } => {}
            },
            BattleOutcome::Ran => {}
        }

        tracing::info!(?outcome, rounds = self.round, "battle over");
        bus.push(BattleEvent::BattleEnded { outcome });
        Ok(())
    }

    /// The beaten wild unit joins the gamer's party, healed, if there is room.
    fn capture(&mut self, bus: &mut EventBus) -> BattleResult<()> {
        let mut captured = self.active_battle_unit(Side::Foe)?.clone();
        captured.full_heal();
        captured.reset_stat_stages();
        captured.status_messages.clear();
        let name = captured.name().to_string();

        let capacity = self.config.max_party_size;
        if self.parties[Side::Gamer.index()].push(captured, capacity) {
            bus.message(MessageKey::Captured, vec![name]);
        } else {
            bus.message(MessageKey::PartyFull, vec![name]);
        }
        Ok(())
    }
}

/// Use one move: spend PP, roll accuracy, then deal damage or apply the
/// move's stage changes.
fn resolve_move(
    attacker: &mut BattleUnit,
    defender: &mut BattleUnit,
    (attacker_ref, defender_ref): (UnitRef, UnitRef),
    choice: MoveChoice,
    config: &BattleConfig,
    rng: &mut dyn BattleRng,
    bus: &mut EventBus,
) -> BattleResult<MoveOutcome> {
    let move_instance = attacker
        .move_for(choice, config.struggle_power)
        .ok_or_else(|| {
            report_invariant_violation(format!("{} has no move for {:?}", attacker.name(), choice))
        })?;
    let template = move_instance.template();
    attacker.spend_pp(choice);
    bus.message(
        MessageKey::UsedMove,
        vec![attacker.name().to_string(), template.name.clone()],
    );

    if !move_hits(template, attacker, defender, rng) {
        bus.message(MessageKey::AttackMissed, vec![attacker.name().to_string()]);
        return Ok(MoveOutcome::default());
    }

    if template.is_damaging() {
        let report = resolve_damage(attacker, defender, template, config.critical_hit_percent, rng);
        if report.tier == EffectivenessTier::NoEffect {
            bus.push(BattleEvent::EffectivenessShown { tier: report.tier });
            return Ok(MoveOutcome::default());
        }

        bus.push(BattleEvent::DamageApplied {
            unit: defender_ref,
            amount: report.damage,
            fainted: report.fainted,
        });
        bus.push(BattleEvent::HpBarUpdate {
            unit: defender_ref,
            fraction: defender.hp_fraction(),
        });
        if report.critical {
            bus.push(BattleEvent::CriticalHitShown);
        }
        if report.tier != EffectivenessTier::Neutral {
            bus.push(BattleEvent::EffectivenessShown { tier: report.tier });
        }
        return Ok(MoveOutcome {
            target_fainted: report.fainted,
        });
    }

    if let Some(effect) = &template.effect {
        let (target, target_ref) = match template.target {
            MoveTarget::User => (attacker, attacker_ref),
            MoveTarget::Opponent => (defender, defender_ref),
        };
        for (stat, direction) in apply_stat_effect(target, effect) {
            bus.push(BattleEvent::StatChanged {
                unit: target_ref,
                stat,
                direction,
            });
            let key = match direction {
                StageDirection::Rose => MessageKey::StatRose,
                StageDirection::Fell => MessageKey::StatFell,
                StageDirection::WontGoHigher => MessageKey::StatWontGoHigher,
                StageDirection::WontGoLower => MessageKey::StatWontGoLower,
            };
            let name = target.name().to_string();
            target.push_status_message(key, vec![name, stat.to_string()]);
        }
        for status in target.drain_status_messages() {
            bus.message(status.key, status.args);
        }
    }
    Ok(MoveOutcome::default())
}
