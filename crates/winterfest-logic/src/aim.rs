//! Crosshair model. Integrates angular rate into a normalized 2-D aim.
//!
//! Purely linear: each sample nudges the aim by `rate · sensitivity` on
//! x and y, then both axes are clamped to the play area. No perspective
//! or rotation modelling.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Span;
use crate::sensor::AngularSample;

/// Normalized point in the play area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AimPosition {
    pub x: f32,
    pub y: f32,
}

impl AimPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `(x, y)`.
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimModel {
    position: AimPosition,
    sensitivity: f32,
    bounds: Span,
}

impl AimModel {
    /// New model centered in `bounds`.
    pub fn new(sensitivity: f32, bounds: Span) -> Self {
        let mid = (bounds.min + bounds.max) * 0.5;
        Self {
            position: AimPosition::new(mid, mid),
            sensitivity,
            bounds,
        }
    }

    pub fn position(&self) -> AimPosition {
        self.position
    }

    /// Drop the aim at a fresh uniform point in `spawn²`, independent of
    /// where the next target sits, so every target has to be re-acquired.
    pub fn reposition(&mut self, spawn: Span, rng: &mut (impl Rng + ?Sized)) -> AimPosition {
        let x = sample_span(spawn, rng);
        let y = sample_span(spawn, rng);
        self.position = AimPosition::new(self.bounds.clamp(x), self.bounds.clamp(y));
        self.position
    }

    /// Accumulate one sample and clamp to the play area.
    ///
    /// Non-finite axes contribute no movement.
    pub fn integrate(&mut self, sample: AngularSample) -> AimPosition {
        let dx = finite_or_zero(sample.x) * self.sensitivity;
        let dy = finite_or_zero(sample.y) * self.sensitivity;
        self.position = AimPosition::new(
            self.bounds.clamp(self.position.x + dx),
            self.bounds.clamp(self.position.y + dy),
        );
        self.position
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Uniform draw from a span; degenerate spans return `min`.
pub(crate) fn sample_span(span: Span, rng: &mut (impl Rng + ?Sized)) -> f32 {
    if span.max > span.min {
        rng.gen_range(span.min..=span.max)
    } else {
        span.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn model() -> AimModel {
        AimModel::new(0.02, Span::new(0.1, 0.9))
    }

    #[test]
    fn test_starts_centered() {
        let p = model().position();
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_integrate_linear() {
        let mut m = model();
        let p = m.integrate(AngularSample::new(1.0, -2.0, 9.0));
        assert!((p.x - 0.52).abs() < 1e-6);
        assert!((p.y - 0.46).abs() < 1e-6);
    }

    #[test]
    fn test_integrate_clamps() {
        let mut m = model();
        let p = m.integrate(AngularSample::new(1000.0, -1000.0, 0.0));
        assert_eq!(p, AimPosition::new(0.9, 0.1));
    }

    #[test]
    fn test_non_finite_axes_ignored() {
        let mut m = model();
        let before = m.position();
        let p = m.integrate(AngularSample::new(f32::NAN, f32::INFINITY, 0.0));
        assert_eq!(p, before);
    }

    #[test]
    fn test_reposition_within_spawn() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut m = model();
        let spawn = Span::new(0.3, 0.7);
        for _ in 0..500 {
            let p = m.reposition(spawn, &mut rng);
            assert!(spawn.contains(p.x) && spawn.contains(p.y), "{:?}", p);
        }
    }

    #[test]
    fn test_distance() {
        let p = AimPosition::new(0.0, 0.0);
        assert!((p.distance_to(0.3, 0.4) - 0.5).abs() < 1e-6);
    }
}
