//! Tournament and session configuration.
//!
//! Everything tunable lives in two serde structs. [`TournamentConfig`]
//! owns a [`SessionConfig`] so a whole tournament can be described by a
//! single JSON document:
//!
//! ```
//! use winterfest_logic::config::{RecordPolicy, TournamentConfig};
//!
//! let config = TournamentConfig::from_json(r#"{ "record_policy": "KeepBest" }"#).unwrap();
//! assert_eq!(config.record_policy, RecordPolicy::KeepBest);
//! assert_eq!(config.player_count, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{bounds, session, tournament};

/// Closed interval `[min, max]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp `v` into the span. NaN maps to the midpoint. An inverted
    /// span clamps to `max`.
    pub fn clamp(&self, v: f32) -> f32 {
        if v.is_nan() {
            return (self.min + self.max) * 0.5;
        }
        v.max(self.min).min(self.max)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// What happens when a player re-records an event they already have a
/// score for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecordPolicy {
    /// Last write wins.
    #[default]
    Overwrite,
    /// Keep the higher of the stored and new score.
    KeepBest,
    /// The first recorded score is final.
    KeepFirst,
}

impl RecordPolicy {
    /// Resolve the score to store given the existing cell value.
    pub fn resolve(self, existing: Option<u32>, incoming: u32) -> u32 {
        match (self, existing) {
            (_, None) | (RecordPolicy::Overwrite, _) => incoming,
            (RecordPolicy::KeepBest, Some(old)) => old.max(incoming),
            (RecordPolicy::KeepFirst, Some(old)) => old,
        }
    }
}

/// Tuning for one event session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub target_count: usize,
    pub stability_window: usize,
    /// Stability must be strictly greater than this to fire.
    pub fire_threshold: f32,
    pub aim_sensitivity: f32,
    pub aim_bounds: Span,
    pub aim_spawn: Span,
    pub target_center: Span,
    pub target_radius: Span,
    /// Delay the scheduler waits between a shot and `advance()`.
    pub cooldown_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            target_count: session::TARGET_COUNT,
            stability_window: session::STABILITY_WINDOW,
            fire_threshold: session::FIRE_THRESHOLD,
            aim_sensitivity: session::AIM_SENSITIVITY,
            aim_bounds: Span::new(bounds::AIM_MIN, bounds::AIM_MAX),
            aim_spawn: Span::new(bounds::AIM_SPAWN_MIN, bounds::AIM_SPAWN_MAX),
            target_center: Span::new(bounds::TARGET_CENTER_MIN, bounds::TARGET_CENTER_MAX),
            target_radius: Span::new(bounds::TARGET_RADIUS_MIN, bounds::TARGET_RADIUS_MAX),
            cooldown_ms: session::COOLDOWN_MS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_count == 0 {
            return Err(ConfigError::ZeroCount("target_count"));
        }
        if self.stability_window == 0 {
            return Err(ConfigError::ZeroCount("stability_window"));
        }
        if !(self.fire_threshold > 0.0 && self.fire_threshold < 1.0) {
            return Err(ConfigError::ThresholdOutOfRange(self.fire_threshold));
        }
        for (name, span) in [
            ("aim_bounds", &self.aim_bounds),
            ("aim_spawn", &self.aim_spawn),
            ("target_center", &self.target_center),
            ("target_radius", &self.target_radius),
        ] {
            if !span.is_valid() {
                return Err(ConfigError::InvalidSpan(name));
            }
        }
        if self.target_radius.min <= 0.0 {
            return Err(ConfigError::InvalidSpan("target_radius"));
        }
        Ok(())
    }
}

/// Tuning for a whole tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub player_count: usize,
    pub event_count: usize,
    pub record_policy: RecordPolicy,
    pub session: SessionConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            player_count: tournament::MAX_PLAYERS,
            event_count: tournament::EVENT_COUNT,
            record_policy: RecordPolicy::default(),
            session: SessionConfig::default(),
        }
    }
}

impl TournamentConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TournamentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 {
            return Err(ConfigError::ZeroCount("player_count"));
        }
        if self.player_count > tournament::MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers {
                requested: self.player_count,
                max: tournament::MAX_PLAYERS,
            });
        }
        if self.event_count == 0 {
            return Err(ConfigError::ZeroCount("event_count"));
        }
        self.session.validate()
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    Json(serde_json::Error),
    ZeroCount(&'static str),
    TooManyPlayers { requested: usize, max: usize },
    ThresholdOutOfRange(f32),
    InvalidSpan(&'static str),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
            ConfigError::ZeroCount(field) => write!(f, "{} must be at least 1", field),
            ConfigError::TooManyPlayers { requested, max } => {
                write!(f, "player_count {} exceeds maximum of {}", requested, max)
            }
            ConfigError::ThresholdOutOfRange(t) => {
                write!(f, "fire_threshold {} must lie strictly between 0 and 1", t)
            }
            ConfigError::InvalidSpan(field) => write!(f, "{} is not a valid range", field),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            _ => None,
        }
    }
}
