//! Engine constants and configuration defaults
//!
//! Centralized location for pacing, scroll, and path defaults

use std::time::Duration;

/// Word pacing configuration
pub mod pacing {
    /// Nominal words per minute at speed 1.0
    pub const BASE_WPM: f64 = 200.0;

    /// Slowest allowed speed multiplier
    pub const MIN_SPEED: f64 = 0.5;

    /// Fastest allowed speed multiplier
    pub const MAX_SPEED: f64 = 2.0;

    /// Speed used when nothing else is configured
    pub const DEFAULT_SPEED: f64 = 2.0;

    /// Increment applied by one speed key press
    pub const SPEED_STEP: f64 = 0.1;
}

/// Scroll synchronizer configuration
pub mod scroll {
    use super::*;

    /// Delay before the first alignment so layout can settle
    pub const INITIAL_ALIGN_DELAY: Duration = Duration::from_millis(100);

    /// Time constant of the exponential ease toward the target offset
    pub const EASE_TIME_CONSTANT: Duration = Duration::from_millis(120);

    /// Frame cadence (~60fps)
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

    /// Distance (in rows) under which the offset snaps onto the target
    pub const SNAP_DISTANCE: f64 = 0.5;
}

/// Filesystem layout
pub mod paths {
    /// Environment variable overriding the home directory
    pub const HOME_ENV: &str = "PROMPTER_HOME";

    /// Config directory name under ~/.config
    pub const CONFIG_DIR_NAME: &str = "prompter";

    /// Config file name
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Log file name
    pub const LOG_FILE_NAME: &str = "prompter.log";
}
