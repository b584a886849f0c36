use crate::uniteon::{MAX_LEVEL, MIN_LEVEL};
use schema::GrowthRate;

/// Maps levels to the cumulative experience needed to reach them.
pub trait ProgressionCurve {
    /// Total experience at which `level` is reached. Level 1 always needs 0.
    fn experience_for_level(&self, level: u8) -> u32;

    /// Highest level in `1..=100` whose threshold `experience` has reached.
    fn level_for_experience(&self, experience: u32) -> u8 {
        let mut level = MIN_LEVEL;
        while level < MAX_LEVEL && self.experience_for_level(level + 1) <= experience {
            level += 1;
        }
        level
    }

    /// Experience stops accruing once level 100 is reached.
    fn experience_cap(&self) -> u32 {
        self.experience_for_level(MAX_LEVEL)
    }
}

impl ProgressionCurve for GrowthRate {
    fn experience_for_level(&self, level: u8) -> u32 {
        let level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        if level == MIN_LEVEL {
            return 0;
        }
        let n = level as i64;
        let cube = n * n * n;

        let total = match self {
            GrowthRate::Fast => 4 * cube / 5,
            GrowthRate::MediumFast => cube,
            GrowthRate::MediumSlow => (6 * cube - 75 * n * n + 500 * n - 700).div_euclid(5),
            GrowthRate::Slow => 5 * cube / 4,
            GrowthRate::Erratic => match level {
                0..50 => cube * (100 - n) / 50,
                50..68 => cube * (150 - n) / 100,
                68..98 => cube * ((1911 - 10 * n) / 3) / 500,
                _ => cube * (160 - n) / 100,
            },
            GrowthRate::Fluctuating => match level {
                0..15 => cube * ((n + 1) / 3 + 24) / 50,
                15..36 => cube * (n + 14) / 50,
                _ => cube * (n / 2 + 32) / 50,
            },
        };
        total.max(0) as u32
    }
}
