//! Difficulty table and the speed progression derived from it.
//!
//! Speed is measured in "slider units" between [`MIN_SPEED`] and [`MAX_SPEED`].
//! The tick interval is `1000 / (speed * 2)` milliseconds, so speed 5 ticks
//! every 100ms and the maximum speed ticks every 50ms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Lowest speed the manual slider accepts
pub const MIN_SPEED: f32 = 1.0;
/// Hard cap for both automatic and manual speed changes
pub const MAX_SPEED: f32 = 10.0;
/// Amount added by one automatic speed-up
pub const SPEED_INCREMENT: f32 = 0.5;

/// Game difficulty, fixing the starting speed and how quickly it grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    /// Speed applied when a game starts or the difficulty is changed
    pub fn initial_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Medium => 5.0,
            Difficulty::Hard => 7.0,
            Difficulty::Extreme => 9.0,
        }
    }

    /// Multiplier controlling how often the speed increases
    pub fn growth_factor(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.2,
            Difficulty::Medium => 0.3,
            Difficulty::Hard => 0.4,
            Difficulty::Extreme => 0.5,
        }
    }

    /// Score period between speed-ups: `round(50 / growth_factor)`
    pub fn speed_up_threshold(&self) -> u32 {
        (50.0 / self.growth_factor()).round() as u32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time between two ticks at the given speed
pub fn tick_interval(speed: f32) -> Duration {
    let speed = clamp_speed(speed);
    let micros = 1_000_000.0 / (f64::from(speed) * 2.0);
    Duration::from_micros(micros.round() as u64)
}

/// Clamp a speed into the slider bounds
pub fn clamp_speed(speed: f32) -> f32 {
    speed.clamp(MIN_SPEED, MAX_SPEED)
}

/// Speed after a food event that brought the score to `score`.
///
/// Relies on the score moving in fixed reward steps: the threshold test is
/// an exact modulo, so a reward that never lands on a multiple of the
/// threshold never speeds the game up.
pub fn speed_after_food(speed: f32, score: u32, difficulty: Difficulty) -> f32 {
    if speed >= MAX_SPEED {
        return speed;
    }

    let threshold = difficulty.speed_up_threshold();
    if threshold > 0 && score % threshold == 0 {
        (speed + SPEED_INCREMENT).min(MAX_SPEED)
    } else {
        speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_table() {
        assert_eq!(Difficulty::Easy.initial_speed(), 3.0);
        assert_eq!(Difficulty::Medium.initial_speed(), 5.0);
        assert_eq!(Difficulty::Hard.initial_speed(), 7.0);
        assert_eq!(Difficulty::Extreme.initial_speed(), 9.0);

        assert_eq!(Difficulty::Easy.growth_factor(), 0.2);
        assert_eq!(Difficulty::Extreme.growth_factor(), 0.5);
    }

    #[test]
    fn test_speed_up_thresholds() {
        assert_eq!(Difficulty::Easy.speed_up_threshold(), 250);
        assert_eq!(Difficulty::Medium.speed_up_threshold(), 167);
        assert_eq!(Difficulty::Hard.speed_up_threshold(), 125);
        assert_eq!(Difficulty::Extreme.speed_up_threshold(), 100);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval(5.0), Duration::from_millis(100));
        assert_eq!(tick_interval(10.0), Duration::from_millis(50));
        assert_eq!(tick_interval(1.0), Duration::from_millis(500));
        // Out of range speeds are clamped before conversion
        assert_eq!(tick_interval(50.0), Duration::from_millis(50));
        assert_eq!(tick_interval(0.0), Duration::from_millis(500));
    }

    #[test]
    fn test_speed_increases_only_on_threshold() {
        let easy = Difficulty::Easy;
        assert_eq!(speed_after_food(3.0, 240, easy), 3.0);
        assert_eq!(speed_after_food(3.0, 250, easy), 3.5);
        assert_eq!(speed_after_food(3.0, 260, easy), 3.0);
        assert_eq!(speed_after_food(3.0, 500, easy), 3.5);
    }

    #[test]
    fn test_speed_is_capped() {
        let extreme = Difficulty::Extreme;
        assert_eq!(speed_after_food(9.5, 100, extreme), 10.0);
        assert_eq!(speed_after_food(10.0, 200, extreme), 10.0);
        assert_eq!(speed_after_food(9.8, 300, extreme), 10.0);
    }

    #[test]
    fn test_difficulty_serde_names() {
        let json = serde_json::to_string(&Difficulty::Extreme).unwrap();
        assert_eq!(json, "\"extreme\"");
        let parsed: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }
}
