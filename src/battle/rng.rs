use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of every random outcome in a battle. Each draw names the reason it
/// is taken so replays can be traced.
pub trait BattleRng {
    /// Uniform integer in `1..=100`.
    fn next_percent(&mut self, reason: &str) -> u8;

    /// Uniform damage spread in `0.85..=1.0`.
    fn next_spread(&mut self, reason: &str) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize, reason: &str) -> usize;
}

/// Seedable stream owned by one battle session. Same seed and same intents
/// give the same battle.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    inner: StdRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from the thread-local generator, for battles nobody will replay.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BattleRng for SeededRng {
    fn next_percent(&mut self, reason: &str) -> u8 {
        let outcome = self.inner.random_range(1..=100u8);
        tracing::trace!(outcome, reason, "rng percent");
        outcome
    }

    fn next_spread(&mut self, reason: &str) -> f64 {
        let outcome = self.inner.random_range(0.85..=1.0);
        tracing::trace!(outcome, reason, "rng spread");
        outcome
    }

    fn next_index(&mut self, len: usize, reason: &str) -> usize {
        let outcome = self.inner.random_range(0..len.max(1));
        tracing::trace!(outcome, len, reason, "rng index");
        outcome
    }
}

/// Replays a fixed list of `1..=100` outcomes. Every draw consumes one value:
/// percents use it as is, spreads map 1 to 0.85 and 100 to 1.0, indices use
/// `(value - 1) % len`.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    outcomes: VecDeque<u8>,
    fallback: u8,
}

impl ScriptedRng {
    pub const DEFAULT_FALLBACK: u8 = 50;

    pub fn new(outcomes: Vec<u8>) -> Self {
        Self {
            outcomes: outcomes.into(),
            fallback: Self::DEFAULT_FALLBACK,
        }
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }

    fn next_outcome(&mut self, reason: &str) -> u8 {
        match self.outcomes.pop_front() {
            Some(outcome) => {
                tracing::trace!(outcome, reason, "scripted rng");
                outcome.clamp(1, 100)
            }
            None => {
                tracing::warn!(reason, fallback = self.fallback, "scripted rng exhausted");
                self.fallback
            }
        }
    }
}

impl BattleRng for ScriptedRng {
    fn next_percent(&mut self, reason: &str) -> u8 {
        self.next_outcome(reason)
    }

    fn next_spread(&mut self, reason: &str) -> f64 {
        let outcome = self.next_outcome(reason) as f64;
        1.0 - 0.15 * (100.0 - outcome) / 99.0
    }

    fn next_index(&mut self, len: usize, reason: &str) -> usize {
        (self.next_outcome(reason) as usize - 1) % len.max(1)
    }
}
