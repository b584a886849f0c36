use crate::battle::state::{BattlePhase, Side};
use schema::{MoveId, SpeciesId};
use thiserror::Error;

/// Main error type for the Uniteon battle engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// Error related to loading or resolving dex data
    #[error("Dex error: {0}")]
    Dex(#[from] DexError),
    /// Error related to invalid battle state
    #[error("Battle state error: {0}")]
    BattleState(#[from] BattleStateError),
    /// An intent that is not legal in the current phase
    #[error("Illegal intent: {0}")]
    Action(#[from] ActionError),
}

/// Errors raised while loading the dex or battle configuration
#[derive(Debug, Error)]
pub enum DexError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse RON data: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("move not found: {0}")]
    MoveNotFound(MoveId),
    #[error("species not found: {0}")]
    SpeciesNotFound(SpeciesId),
    #[error("malformed data: {0}")]
    MalformedData(String),
}

/// Errors related to battle state validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleStateError {
    /// A side had no unit able to battle when the session was built
    #[error("{0:?} side has no healthy Uniteon to start the battle with")]
    EmptyPartyAtStart(Side),
    /// A stat, HP or PP write fell outside its legal range
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Intents rejected without touching battle state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{intent} is not accepted during {phase:?}")]
    WrongPhase {
        intent: &'static str,
        phase: BattlePhase,
    },
    #[error("invalid move index: {0}")]
    InvalidMoveIndex(usize),
    #[error("invalid party member index: {0}")]
    InvalidMemberIndex(usize),
    #[error("invalid forget slot: {0}")]
    InvalidForgetSlot(usize),
    #[error("unknown action menu index: {0}")]
    UnknownMenuIndex(usize),
    #[error("cannot back out of {0:?}")]
    CannotCancel(BattlePhase),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using DexError
pub type DexResult<T> = Result<T, DexError>;

/// Log an out-of-range write that was clamped. Public API users can never
/// reach this; debug builds treat it as a bug and stop.
pub(crate) fn report_invariant_violation(detail: String) -> BattleStateError {
    tracing::error!(%detail, "clamped an out-of-range battle value");
    debug_assert!(false, "invariant violated: {detail}");
    BattleStateError::InvariantViolation(detail)
}
