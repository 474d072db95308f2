//! Game constants: tournament bounds, aiming and scoring tuning.
//!
//! Plain values with no runtime dependency. [`crate::config`] builds its
//! defaults from these; the harness and tests use them directly.

pub mod tournament {
    /// Rosters are always padded up to this many players.
    pub const MAX_PLAYERS: usize = 4;
    /// Number of events in the tournament calendar.
    pub const EVENT_COUNT: usize = 10;
    /// Minimum players with a non-zero score for an event to award medals.
    pub const MIN_MEDAL_SCORERS: usize = 2;
    /// Placeholder country label for AI and unnamed entrants.
    pub const PLACEHOLDER_COUNTRY: &str = "---";
}

pub mod session {
    /// Targets per biathlon attempt.
    pub const TARGET_COUNT: usize = 5;
    /// Ring buffer length for the stability filter.
    pub const STABILITY_WINDOW: usize = 10;
    /// Stability must be strictly above this to fire.
    pub const FIRE_THRESHOLD: f32 = 0.7;
    /// Aim displacement per unit of angular rate per sample.
    pub const AIM_SENSITIVITY: f32 = 0.02;
    /// Post-fire delay the external scheduler waits before `advance()`.
    pub const COOLDOWN_MS: u64 = 1000;
}

pub mod bounds {
    /// Aim is clamped to this square on both axes.
    pub const AIM_MIN: f32 = 0.1;
    pub const AIM_MAX: f32 = 0.9;
    /// Fresh aim positions are drawn from this square for every target.
    pub const AIM_SPAWN_MIN: f32 = 0.3;
    pub const AIM_SPAWN_MAX: f32 = 0.7;
    /// Target centers.
    pub const TARGET_CENTER_MIN: f32 = 0.2;
    pub const TARGET_CENTER_MAX: f32 = 0.8;
    /// Target radii.
    pub const TARGET_RADIUS_MIN: f32 = 0.05;
    pub const TARGET_RADIUS_MAX: f32 = 0.08;
}

pub mod scoring {
    /// Ring edges as fractions of the target radius, innermost first,
    /// paired with the points each ring is worth at full stability.
    pub const RINGS: [(f32, u32); 5] = [(0.2, 100), (0.4, 80), (0.6, 60), (0.8, 40), (1.0, 20)];
    /// Best possible single shot.
    pub const MAX_SHOT_POINTS: u32 = 100;
}
