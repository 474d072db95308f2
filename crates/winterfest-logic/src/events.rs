//! Event catalogue and per-event rule sets.
//!
//! The tournament calendar has ten events. Each event kind plugs into the
//! session through the [`EventRules`] capability set. Only biathlon ships
//! a rule set; [`rules_for`] rejects the others explicitly instead of
//! routing them to the wrong rules.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::{SessionConfig, Span};
use crate::scoring::score_shot;
use crate::targets::{generate_targets, Target};

/// Every event on the tournament calendar, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Biathlon = 0,
    SkiJump = 1,
    Slalom = 2,
    Downhill = 3,
    CrossCountry = 4,
    Bobsled = 5,
    Luge = 6,
    SpeedSkating = 7,
    Curling = 8,
    Snowboard = 9,
}

impl EventKind {
    pub const ALL: [EventKind; 10] = [
        EventKind::Biathlon,
        EventKind::SkiJump,
        EventKind::Slalom,
        EventKind::Downhill,
        EventKind::CrossCountry,
        EventKind::Bobsled,
        EventKind::Luge,
        EventKind::SpeedSkating,
        EventKind::Curling,
        EventKind::Snowboard,
    ];

    /// Ledger column for this event.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<EventKind> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Biathlon => "Biathlon",
            EventKind::SkiJump => "Ski Jump",
            EventKind::Slalom => "Slalom",
            EventKind::Downhill => "Downhill",
            EventKind::CrossCountry => "Cross-Country",
            EventKind::Bobsled => "Bobsled",
            EventKind::Luge => "Luge",
            EventKind::SpeedSkating => "Speed Skating",
            EventKind::Curling => "Curling",
            EventKind::Snowboard => "Snowboard",
        }
    }

    /// Whether [`rules_for`] can build a session for this event.
    pub fn is_playable(self) -> bool {
        matches!(self, EventKind::Biathlon)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a session needs from an event: a target layout, a shot scorer,
/// and a completion test.
pub trait EventRules: std::fmt::Debug {
    fn kind(&self) -> EventKind;

    fn generate_targets(&self, rng: &mut dyn RngCore) -> Vec<Target>;

    fn score(&self, hit_distance: f32, target_radius: f32, stability: f32) -> u32;

    /// Whether an attempt with `targets_done` of `target_count` shots is over.
    fn is_complete(&self, targets_done: usize, target_count: usize) -> bool {
        targets_done >= target_count
    }
}

/// Shooting range rules: a fixed number of ringed targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Biathlon {
    pub target_count: usize,
    pub target_center: Span,
    pub target_radius: Span,
}

impl Biathlon {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            target_count: config.target_count,
            target_center: config.target_center,
            target_radius: config.target_radius,
        }
    }
}

impl EventRules for Biathlon {
    fn kind(&self) -> EventKind {
        EventKind::Biathlon
    }

    fn generate_targets(&self, rng: &mut dyn RngCore) -> Vec<Target> {
        generate_targets(self.target_count, self.target_center, self.target_radius, rng)
    }

    fn score(&self, hit_distance: f32, target_radius: f32, stability: f32) -> u32 {
        score_shot(hit_distance, target_radius, stability)
    }
}

/// Build the rule set for `kind`.
pub fn rules_for(kind: EventKind, config: &SessionConfig) -> Result<Box<dyn EventRules>, EventError> {
    match kind {
        EventKind::Biathlon => Ok(Box::new(Biathlon::from_config(config))),
        other => {
            log::warn!("no rule set for event {}", other);
            Err(EventError::Unsupported(other))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    Unsupported(EventKind),
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::Unsupported(kind) => write!(f, "Event {} has no playable rules", kind),
        }
    }
}

impl std::error::Error for EventError {}
