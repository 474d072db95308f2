//! One player's pass through every target of one event.
//!
//! # Lifecycle
//!
//! ```text
//!  start() ──► Aiming(0) ──fire()──► Cooldown(0) ──advance()──► Aiming(1) ─► …
//!                                                         └──► Complete (after the last target)
//! ```
//!
//! `fire()` only lands while aiming and while stability is strictly above
//! the configured threshold. Calls in the wrong phase are ignored, never
//! errors, matching a UI where the button is simply disabled. The session
//! owns no timer: whoever drives it waits out the cooldown and then calls
//! [`EventSession::advance`].
//!
//! ```
//! use winterfest_logic::config::SessionConfig;
//! use winterfest_logic::sensor::AngularSample;
//! use winterfest_logic::session::EventSession;
//!
//! let mut session = EventSession::biathlon(SessionConfig::default(), 42);
//! session.start();
//! for _ in 0..5 {
//!     session.observe_sample(AngularSample::ZERO);
//!     session.fire();
//!     session.advance();
//! }
//! assert!(session.is_complete());
//! assert!(session.current_target().is_none());
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::aim::{AimModel, AimPosition};
use crate::config::SessionConfig;
use crate::events::{Biathlon, EventKind, EventRules};
use crate::sensor::AngularSample;
use crate::stability::StabilityFilter;
use crate::targets::Target;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Built but not started.
    Idle,
    /// Sensor samples move the aim; firing is allowed once stable.
    Aiming { target: usize },
    /// Shot taken at `target`, waiting for `advance()`.
    Cooldown { target: usize },
    /// Every target has been shot. Only `reset()` leaves this phase.
    Complete,
}

/// Outcome of one shot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub target_index: usize,
    pub aim: AimPosition,
    pub hit_distance: f32,
    pub stability: f32,
    pub points: u32,
}

#[derive(Debug)]
pub struct EventSession {
    config: SessionConfig,
    rules: Box<dyn EventRules>,
    rng: StdRng,
    targets: Vec<Target>,
    target_index: usize,
    aim: AimModel,
    filter: StabilityFilter,
    score: u32,
    phase: Phase,
    shots: Vec<ShotRecord>,
}

impl EventSession {
    /// Session with an explicit generator. Use this for reproducible runs.
    pub fn with_rng(rules: Box<dyn EventRules>, config: SessionConfig, rng: StdRng) -> Self {
        let aim = AimModel::new(config.aim_sensitivity, config.aim_bounds);
        let filter = StabilityFilter::new(config.stability_window);
        Self {
            config,
            rules,
            rng,
            targets: Vec::new(),
            target_index: 0,
            aim,
            filter,
            score: 0,
            phase: Phase::Idle,
            shots: Vec::new(),
        }
    }

    /// Session seeded from OS entropy; layouts differ run to run.
    pub fn new(rules: Box<dyn EventRules>, config: SessionConfig) -> Self {
        Self::with_rng(rules, config, StdRng::from_entropy())
    }

    /// Seeded biathlon session.
    pub fn biathlon(config: SessionConfig, seed: u64) -> Self {
        let rules = Box::new(Biathlon::from_config(&config));
        Self::with_rng(rules, config, StdRng::seed_from_u64(seed))
    }

    // ── Transitions ───────────────────────────────────────────────────

    /// Lay out fresh targets and begin aiming at the first one.
    pub fn start(&mut self) {
        self.targets = self.rules.generate_targets(&mut self.rng);
        self.target_index = 0;
        self.score = 0;
        self.shots.clear();
        self.filter.reset();
        log::debug!(
            "{} session started with {} targets",
            self.rules.kind(),
            self.targets.len()
        );
        self.enter_target_or_complete();
    }

    /// Discard all progress and start over. Safe in any phase.
    pub fn reset(&mut self) {
        self.start();
    }

    /// Feed one sensor sample. Ignored unless aiming.
    pub fn observe_sample(&mut self, sample: AngularSample) {
        if !self.is_aiming() {
            log::trace!("sample ignored in {:?}", self.phase);
            return;
        }
        self.filter.observe(sample);
        self.aim.integrate(sample);
    }

    /// Take the shot at the current target.
    ///
    /// Returns `None` and changes nothing unless aiming with stability
    /// strictly above the fire threshold.
    pub fn fire(&mut self) -> Option<ShotRecord> {
        let target_index = match self.phase {
            Phase::Aiming { target } => target,
            _ => {
                log::trace!("fire ignored in {:?}", self.phase);
                return None;
            }
        };
        if !self.is_stable() {
            log::trace!("fire ignored, stability {:.2}", self.stability());
            return None;
        }

        let target = match self.targets.get(target_index) {
            Some(t) => *t,
            None => {
                log::warn!("fire ignored, no target {} in layout", target_index);
                return None;
            }
        };
        let aim = self.aim.position();
        let stability = self.filter.stability();
        let hit_distance = target.hit_distance(aim);
        let points = self.rules.score(hit_distance, target.radius, stability);

        let shot = ShotRecord {
            target_index,
            aim,
            hit_distance,
            stability,
            points,
        };
        self.score += points;
        self.shots.push(shot);
        self.target_index += 1;
        self.phase = Phase::Cooldown {
            target: target_index,
        };
        log::debug!(
            "shot {} at d={:.3} r={:.3} stab={:.2} → {} pts",
            target_index,
            hit_distance,
            target.radius,
            stability,
            points
        );
        Some(shot)
    }

    /// Leave cooldown. Ignored in any other phase.
    pub fn advance(&mut self) {
        if !matches!(self.phase, Phase::Cooldown { .. }) {
            log::trace!("advance ignored in {:?}", self.phase);
            return;
        }
        self.enter_target_or_complete();
    }

    fn enter_target_or_complete(&mut self) {
        // Running out of targets ends the attempt whatever the rules say.
        if self.target_index >= self.targets.len()
            || self
                .rules
                .is_complete(self.target_index, self.targets.len())
        {
            self.phase = Phase::Complete;
            log::debug!("{} session complete, score {}", self.rules.kind(), self.score);
        } else {
            self.phase = Phase::Aiming {
                target: self.target_index,
            };
            self.aim.reposition(self.config.aim_spawn, &mut self.rng);
        }
    }

    // ── Observables ───────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn kind(&self) -> EventKind {
        self.rules.kind()
    }

    pub fn is_aiming(&self) -> bool {
        matches!(self.phase, Phase::Aiming { .. })
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Stability strictly above the fire threshold.
    pub fn is_stable(&self) -> bool {
        self.filter.is_stable(self.config.fire_threshold)
    }

    pub fn stability(&self) -> f32 {
        self.filter.stability()
    }

    pub fn aim(&self) -> AimPosition {
        self.aim.position()
    }

    /// Target being aimed at, or just shot during cooldown.
    pub fn current_target(&self) -> Option<Target> {
        match self.phase {
            Phase::Aiming { target } | Phase::Cooldown { target } => {
                self.targets.get(target).copied()
            }
            Phase::Idle | Phase::Complete => None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn targets_remaining(&self) -> usize {
        self.target_count() - self.target_index
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn shots(&self) -> &[ShotRecord] {
        &self.shots
    }

    /// Delay the driver should wait between `fire()` and `advance()`.
    pub fn cooldown_ms(&self) -> u64 {
        self.config.cooldown_ms
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
