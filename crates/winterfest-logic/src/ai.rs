//! Synthetic shooter for AI placeholder entrants.
//!
//! Stands in for the gyroscope: emits angular samples that steer the aim
//! toward the current target with skill-scaled hand tremor, fires once it
//! is steady and close enough, and sits out the cooldown by calling
//! `advance()` itself.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sensor::AngularSample;
use crate::session::{EventSession, Phase};

/// Fraction of the remaining aim error closed per sample.
const STEERING_GAIN: f32 = 0.25;

/// Largest angular rate the marksman will emit on any axis.
const MAX_RATE: f32 = 1.5;

/// Default cap on samples spent on one target before holding still.
pub const DEFAULT_TICKS_PER_TARGET: u32 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiMarksman {
    /// 0.0 = shaky novice, 1.0 = rock steady.
    pub skill: f32,
    pub ticks_per_target: u32,
}

impl AiMarksman {
    pub fn new(skill: f32) -> Self {
        Self {
            skill: if skill.is_nan() { 0.0 } else { skill.clamp(0.0, 1.0) },
            ticks_per_target: DEFAULT_TICKS_PER_TARGET,
        }
    }

    /// Uniform tremor amplitude per axis.
    pub fn tremor(&self) -> f32 {
        0.01 + (1.0 - self.skill) * 0.12
    }

    /// How close (as a fraction of target radius) the marksman insists on
    /// being before pulling the trigger.
    pub fn tolerance(&self) -> f32 {
        0.2 + (1.0 - self.skill) * 0.6
    }

    /// Stability the marksman waits for before firing, on top of the
    /// session's own threshold.
    pub fn composure(&self) -> f32 {
        0.7 + self.skill * 0.2
    }

    /// Next sample steering toward the current target.
    pub fn sample(&self, session: &EventSession, rng: &mut impl Rng) -> AngularSample {
        let Some(target) = session.current_target() else {
            return AngularSample::ZERO;
        };
        let aim = session.aim();
        let k = session.config().aim_sensitivity;
        let (rx, ry) = if k > 0.0 {
            (
                ((target.x - aim.x) * STEERING_GAIN / k).clamp(-MAX_RATE, MAX_RATE),
                ((target.y - aim.y) * STEERING_GAIN / k).clamp(-MAX_RATE, MAX_RATE),
            )
        } else {
            (0.0, 0.0)
        };
        let t = self.tremor();
        AngularSample::new(
            rx + rng.gen_range(-t..=t),
            ry + rng.gen_range(-t..=t),
            rng.gen_range(-t..=t),
        )
    }

    /// Drive `session` to completion and return its score.
    ///
    /// Starts the session if it is idle. After `ticks_per_target` samples
    /// on one target the marksman holds perfectly still, which lets the
    /// stability window drain and guarantees the shot goes off.
    pub fn play(&self, session: &mut EventSession, rng: &mut impl Rng) -> u32 {
        let mut ticks = 0u32;
        loop {
            match session.phase() {
                Phase::Idle => session.start(),
                Phase::Complete => break,
                Phase::Cooldown { .. } => {
                    session.advance();
                    ticks = 0;
                }
                Phase::Aiming { .. } => {
                    ticks += 1;
                    if ticks <= self.ticks_per_target {
                        let sample = self.sample(session, rng);
                        session.observe_sample(sample);
                        if session.is_stable()
                            && session.stability() >= self.composure()
                            && self.on_target(session)
                        {
                            session.fire();
                        }
                    } else {
                        session.observe_sample(AngularSample::ZERO);
                        session.fire();
                    }
                }
            }
        }
        session.score()
    }

    fn on_target(&self, session: &EventSession) -> bool {
        session
            .current_target()
            .is_some_and(|t| t.hit_distance(session.aim()) <= t.radius * self.tolerance())
    }
}
