//! Speed multiplier and its pacing interval

use std::fmt;
use std::time::Duration;

use crate::constants::pacing::{BASE_WPM, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};

/// Direction of a keyboard speed adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedStep {
    Faster,
    Slower,
}

/// Speed multiplier, always within `[MIN_SPEED, MAX_SPEED]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Speed(f64);

impl Speed {
    pub const MIN: Speed = Speed(MIN_SPEED);
    pub const MAX: Speed = Speed(MAX_SPEED);

    /// Clamp `value` into range. NaN falls back to the default speed.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(MIN_SPEED, MAX_SPEED))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn words_per_minute(self) -> f64 {
        BASE_WPM * self.0
    }

    /// Milliseconds between ticks: `60000 / (speed * 200)`
    pub fn tick_interval_ms(self) -> f64 {
        60_000.0 / self.words_per_minute()
    }

    /// Tick interval rounded to the nearest nanosecond
    pub fn tick_interval(self) -> Duration {
        Duration::from_nanos((self.tick_interval_ms() * 1_000_000.0).round() as u64)
    }

    /// Move one `step` in `direction`, clamped like [`Speed::new`]
    pub fn stepped(self, direction: SpeedStep, step: f64) -> Self {
        let next = match direction {
            SpeedStep::Faster => self.0 + step,
            SpeedStep::Slower => self.0 - step,
        };
        // Repeated 0.1 steps drift in binary; keep two decimals
        Self::new((next * 100.0).round() / 100.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(DEFAULT_SPEED)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_matches_formula() {
        for s in [0.5, 0.6, 0.75, 1.0, 1.2, 1.25, 1.5, 2.0] {
            let speed = Speed::new(s);
            let expected_ms = 60_000.0 / (s * 200.0);
            assert_eq!(speed.tick_interval_ms(), expected_ms);
            assert_eq!(
                speed.tick_interval(),
                Duration::from_nanos((expected_ms * 1_000_000.0).round() as u64)
            );
        }
    }

    #[test]
    fn test_whole_millisecond_intervals() {
        assert_eq!(Speed::new(0.5).tick_interval(), Duration::from_millis(600));
        assert_eq!(Speed::new(1.0).tick_interval(), Duration::from_millis(300));
        assert_eq!(Speed::new(1.5).tick_interval(), Duration::from_millis(200));
        assert_eq!(Speed::new(2.0).tick_interval(), Duration::from_millis(150));
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(Speed::new(0.1), Speed::MIN);
        assert_eq!(Speed::new(7.0), Speed::MAX);
        assert_eq!(Speed::new(f64::INFINITY), Speed::MAX);
        assert_eq!(Speed::new(f64::NEG_INFINITY), Speed::MIN);
        assert_eq!(Speed::new(f64::NAN), Speed::default());
    }

    #[test]
    fn test_stepping_clamps_and_stays_round() {
        let mut speed = Speed::new(1.0);
        for _ in 0..10 {
            speed = speed.stepped(SpeedStep::Faster, 0.1);
        }
        assert_eq!(speed.value(), 2.0);

        let mut speed = Speed::new(1.0);
        for _ in 0..3 {
            speed = speed.stepped(SpeedStep::Slower, 0.1);
        }
        assert_eq!(speed.value(), 0.7);

        for _ in 0..20 {
            speed = speed.stepped(SpeedStep::Slower, 0.1);
        }
        assert_eq!(speed, Speed::MIN);
    }

    #[test]
    fn test_display() {
        assert_eq!(Speed::new(1.0).to_string(), "1.0x");
        assert_eq!(Speed::new(0.75).to_string(), "0.8x");
    }
}
