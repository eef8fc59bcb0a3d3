//! Power-up cost.
//!
//! Raising a creature by half a level costs candy and stardust. The candy
//! price depends on the level band; the stardust price also depends on a
//! rank taken from where the level falls inside its ten-level decade.

use crate::error::LevelError;
use crate::level::half_steps;
use serde::{Deserialize, Serialize};

/// Stardust and candy needed to reach a target level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCost {
    pub stardust: u32,
    pub candy: u32,
}

/// Price of one half-level step inside a level band.
struct Band {
    /// Highest level (inclusive) this band covers.
    upper: f64,
    candy: u32,
    base_dust: u32,
    dust_per_rank: u32,
}

static BANDS: [Band; 9] = [
    Band { upper: 10.5, candy: 1, base_dust: 0, dust_per_rank: 200 },
    Band { upper: 20.5, candy: 2, base_dust: 1000, dust_per_rank: 300 },
    Band { upper: 25.5, candy: 3, base_dust: 2500, dust_per_rank: 500 },
    Band { upper: 30.5, candy: 4, base_dust: 2500, dust_per_rank: 500 },
    Band { upper: 32.5, candy: 6, base_dust: 5000, dust_per_rank: 1000 },
    Band { upper: 34.5, candy: 8, base_dust: 5000, dust_per_rank: 1000 },
    Band { upper: 36.5, candy: 10, base_dust: 5000, dust_per_rank: 1000 },
    Band { upper: 38.5, candy: 12, base_dust: 5000, dust_per_rank: 1000 },
    Band { upper: f64::INFINITY, candy: 15, base_dust: 5000, dust_per_rank: 1000 },
];

/// Rank 1..=5 from the level's position within its decade.
fn rank(level: f64) -> u32 {
    let position = level % 10.0;
    if (1.0..=2.5).contains(&position) {
        1
    } else if position > 2.5 && position <= 4.5 {
        2
    } else if position > 4.5 && position <= 6.5 {
        3
    } else if position > 6.5 && position <= 8.5 {
        4
    } else {
        5
    }
}

fn band(level: f64) -> &'static Band {
    BANDS
        .iter()
        .find(|band| level <= band.upper)
        .unwrap_or(&BANDS[BANDS.len() - 1])
}

/// Cost of powering up from `from_level` to `goal_level`.
///
/// Lucky creatures pay half the stardust, rounded down.
///
/// # Errors
///
/// Fails if either level is not a multiple of 0.5 or if `from_level` is
/// above `goal_level`.
pub fn try_upgrade_cost(goal_level: f64, from_level: f64, is_lucky: bool) -> Result<UpgradeCost, LevelError> {
    let goal = half_steps(goal_level).ok_or(LevelError::NotHalfStep(goal_level))?;
    let from = half_steps(from_level).ok_or(LevelError::NotHalfStep(from_level))?;
    if from > goal {
        return Err(LevelError::InvertedRange {
            min: from_level,
            max: goal_level,
        });
    }

    let mut cost = UpgradeCost::default();
    for step in from..goal {
        let level = f64::from(step) / 2.0;
        let band = band(level);
        cost.candy += band.candy;
        cost.stardust += band.base_dust + rank(level) * band.dust_per_rank;
    }

    if is_lucky {
        cost.stardust /= 2;
    }
    Ok(cost)
}

/// Cost of powering up from `from_level` to `goal_level`.
///
/// # Panics
///
/// Panics on the inputs [`try_upgrade_cost`] rejects.
///
/// # Examples
///
/// ```rust
/// use ivdex::{upgrade_cost, UpgradeCost};
///
/// assert_eq!(upgrade_cost(11.0, 10.0, false), UpgradeCost { stardust: 2000, candy: 2 });
/// assert_eq!(upgrade_cost(11.0, 10.0, true), UpgradeCost { stardust: 1000, candy: 2 });
/// assert_eq!(upgrade_cost(30.0, 30.0, false), UpgradeCost::default());
/// ```
pub fn upgrade_cost(goal_level: f64, from_level: f64, is_lucky: bool) -> UpgradeCost {
    match try_upgrade_cost(goal_level, from_level, is_lucky) {
        Ok(cost) => cost,
        Err(err) => panic!("invalid upgrade levels: {err}"),
    }
}
