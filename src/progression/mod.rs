pub mod curve;
pub mod moves;
pub mod rewards;

pub use curve::ProgressionCurve;
pub use moves::{forget_and_learn, ForgetOutcome};
pub use rewards::{apply_experience, ProgressionStep, RewardCalculator};
