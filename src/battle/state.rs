use crate::battle::calculators::EffectivenessTier;
use crate::battle::stats::StageDirection;
use crate::errors::ActionError;
use schema::{MoveId, StatType};
use serde::{Deserialize, Serialize};

/// One of the two sides of a battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The human-controlled side.
    Gamer,
    /// The wild Uniteon or the mentor.
    Foe,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Gamer => 0,
            Side::Foe => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Gamer => Side::Foe,
            Side::Foe => Side::Gamer,
        }
    }
}

/// Addresses one roster slot of one side.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitRef {
    pub side: Side,
    pub slot: usize,
}

impl UnitRef {
    pub fn new(side: Side, slot: usize) -> Self {
        Self { side, slot }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Won,
    Lost,
    Ran,
}

/// What the gamer is up against.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleKind {
    /// A single wild Uniteon. When `capturable`, winning adds it to the party.
    Wild { capturable: bool },
    /// A structured battle against a mentor's party: no running, bonus experience.
    Mentor,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    Start,
    ActionSelection,
    MoveSelection,
    NoMoveSelection,
    PartyScreenFromSelection,
    PartyScreenFromFaint,
    ExecutingTurns,
    Switching,
    FoeSwitching,
    MoveToForget,
    BattleOver(BattleOutcome),
}

impl BattlePhase {
    pub fn is_over(self) -> bool {
        matches!(self, BattlePhase::BattleOver(_))
    }
}

/// Entries of the top-level action menu.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionChoice {
    Fight,
    Party,
    Run,
}

impl ActionChoice {
    /// Menu order used by index-driven front ends.
    pub fn from_menu_index(index: usize) -> Result<Self, ActionError> {
        match index {
            0 => Ok(ActionChoice::Fight),
            1 => Ok(ActionChoice::Party),
            2 => Ok(ActionChoice::Run),
            _ => Err(ActionError::UnknownMenuIndex(index)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgetChoice {
    /// Replace the known move in this slot with the new one.
    Slot(usize),
    /// Keep the current moves and give up the new one.
    Decline,
}

/// Commands the presentation layer sends to a battle session.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SelectAction(ActionChoice),
    ConfirmMove(usize),
    SelectPartyMember(usize),
    Confirm,
    Cancel,
    SelectForgetSlot(ForgetChoice),
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SelectAction(_) => "SelectAction",
            Intent::ConfirmMove(_) => "ConfirmMove",
            Intent::SelectPartyMember(_) => "SelectPartyMember",
            Intent::Confirm => "Confirm",
            Intent::Cancel => "Cancel",
            Intent::SelectForgetSlot(_) => "SelectForgetSlot",
        }
    }
}

/// Text keys for dialog lines. Arguments are positional: `{0}`, `{1}`, ...
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    WildAppeared,
    MentorChallenge,
    MentorSentOut,
    GoUnit,
    ComeBack,
    ChooseAction,
    ChooseMove,
    ChooseMember,
    UsedMove,
    AttackMissed,
    NoPpLeft,
    NoMovesLeft,
    StatRose,
    StatFell,
    StatWontGoHigher,
    StatWontGoLower,
    CannotRun,
    RanAway,
    NoEnergyLeft,
    AlreadyInBattle,
    TryingToLearn,
    ForgotAndLearned,
    DidNotLearn,
    OutOfUnits,
    PartyHealed,
    MentorDefeated,
    Captured,
    PartyFull,
}

impl MessageKey {
    pub fn template(self) -> &'static str {
        match self {
            MessageKey::WildAppeared => "A wild {0} appeared!",
            MessageKey::MentorChallenge => "A mentor wants to battle!",
            MessageKey::MentorSentOut => "The mentor sent out {0}!",
            MessageKey::GoUnit => "Go {0}!",
            MessageKey::ComeBack => "Come back {0}!",
            MessageKey::ChooseAction => "Choose an action.",
            MessageKey::ChooseMove => "Choose a move.",
            MessageKey::ChooseMember => "Choose a Uniteon.",
            MessageKey::UsedMove => "{0} used {1}!",
            MessageKey::AttackMissed => "{0}'s attack missed!",
            MessageKey::NoPpLeft => "There's no PP left for {0}!",
            MessageKey::NoMovesLeft => "{0} has no moves left!",
            MessageKey::StatRose => "{0}'s {1} rose!",
            MessageKey::StatFell => "{0}'s {1} fell!",
            MessageKey::StatWontGoHigher => "{0}'s {1} won't go any higher!",
            MessageKey::StatWontGoLower => "{0}'s {1} won't go any lower!",
            MessageKey::CannotRun => "You can't run from a mentor battle!",
            MessageKey::RanAway => "Got away safely!",
            MessageKey::NoEnergyLeft => "{0} has no energy left to battle!",
            MessageKey::AlreadyInBattle => "{0} is already in battle!",
            MessageKey::TryingToLearn => {
                "{0} is trying to learn {1}, but it already knows four moves. Choose a move to forget."
            }
            MessageKey::ForgotAndLearned => "{0} forgot {1} and learned {2}!",
            MessageKey::DidNotLearn => "{0} did not learn {1}.",
            MessageKey::OutOfUnits => "You have no usable Uniteon left!",
            MessageKey::PartyHealed => "Your Uniteon were fully healed.",
            MessageKey::MentorDefeated => "You defeated the mentor!",
            MessageKey::Captured => "{0} joined your party!",
            MessageKey::PartyFull => "Your party is full. {0} could not join.",
        }
    }

    pub fn render(self, args: &[String]) -> String {
        args.iter()
            .enumerate()
            .fold(self.template().to_string(), |text, (i, arg)| {
                text.replace(&format!("{{{}}}", i), arg)
            })
    }
}

/// Semantic record of something that happened, in the order it happened.
/// The presentation layer animates and voices these at its own pace.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    MessageLine {
        key: MessageKey,
        args: Vec<String>,
    },
    DamageApplied {
        unit: UnitRef,
        amount: u16,
        fainted: bool,
    },
    EffectivenessShown {
        tier: EffectivenessTier,
    },
    CriticalHitShown,
    StatChanged {
        unit: UnitRef,
        stat: StatType,
        direction: StageDirection,
    },
    HpBarUpdate {
        unit: UnitRef,
        fraction: f32,
    },
    ExperienceGained {
        unit: UnitRef,
        amount: u32,
    },
    LevelUp {
        unit: UnitRef,
        level: u8,
    },
    MoveLearned {
        unit: UnitRef,
        move_id: MoveId,
        move_name: String,
    },
    UnitFainted {
        unit: UnitRef,
    },
    UnitSwitchedIn {
        unit: UnitRef,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    pub fn message(key: MessageKey, args: Vec<String>) -> Self {
        BattleEvent::MessageLine { key, args }
    }

    /// Formats the event into a human-readable string, looking unit names up
    /// through `name_of`. Returns None for silent events that only drive animation.
    pub fn format(&self, name_of: impl Fn(UnitRef) -> String) -> Option<String> {
        match self {
            BattleEvent::MessageLine { key, args } => Some(key.render(args)),
            BattleEvent::DamageApplied { .. } => None,
            BattleEvent::HpBarUpdate { .. } => None,
            BattleEvent::StatChanged { .. } => None,
            BattleEvent::UnitSwitchedIn { .. } => None,
            BattleEvent::EffectivenessShown { tier } => tier.message().map(str::to_string),
            BattleEvent::CriticalHitShown => Some("A critical hit!".to_string()),
            BattleEvent::ExperienceGained { unit, amount } => {
                Some(format!("{} gained {} EXP. points!", name_of(*unit), amount))
            }
            BattleEvent::LevelUp { unit, level } => {
                Some(format!("{} grew to level {}!", name_of(*unit), level))
            }
            BattleEvent::MoveLearned {
                unit, move_name, ..
            } => Some(format!("{} learned {}!", name_of(*unit), move_name)),
            BattleEvent::UnitFainted { unit } => Some(format!("{} fainted!", name_of(*unit))),
            BattleEvent::BattleEnded { outcome } => Some(
                match outcome {
                    BattleOutcome::Won => "You won the battle!",
                    BattleOutcome::Lost => "You lost the battle...",
                    BattleOutcome::Ran => "The battle is over.",
                }
                .to_string(),
            ),
        }
    }
}

/// Collects the events produced while handling a single intent.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn message(&mut self, key: MessageKey, args: Vec<String>) {
        self.push(BattleEvent::message(key, args));
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }
}

impl std::fmt::Display for EventBus {
    /// Shows the debug format of all events, one per line.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}
