//! Target placement for one attempt.
//!
//! Centers and radii are drawn uniformly from the configured spans.
//! Targets may overlap; there is no separation constraint. Pass a seeded
//! generator for reproducible layouts.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::aim::{sample_span, AimPosition};
use crate::config::Span;

/// A circular scoring zone. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Target {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    /// Distance from the target center to `aim`.
    pub fn hit_distance(&self, aim: AimPosition) -> f32 {
        aim.distance_to(self.x, self.y)
    }

    /// Whether `aim` lies on or inside the outer ring.
    pub fn contains(&self, aim: AimPosition) -> bool {
        self.hit_distance(aim) <= self.radius
    }
}

/// Generate exactly `count` targets.
pub fn generate_targets(
    count: usize,
    center: Span,
    radius: Span,
    rng: &mut (impl Rng + ?Sized),
) -> Vec<Target> {
    (0..count)
        .map(|_| {
            let x = sample_span(center, rng);
            let y = sample_span(center, rng);
            let r = sample_span(radius, rng);
            Target::new(x, y, r)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CENTER: Span = Span::new(0.2, 0.8);
    const RADIUS: Span = Span::new(0.05, 0.08);

    #[test]
    fn test_exact_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_targets(5, CENTER, RADIUS, &mut rng).len(), 5);
        assert!(generate_targets(0, CENTER, RADIUS, &mut rng).is_empty());
    }

    #[test]
    fn test_within_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        for t in generate_targets(1_000, CENTER, RADIUS, &mut rng) {
            assert!(CENTER.contains(t.x) && CENTER.contains(t.y));
            assert!(RADIUS.contains(t.radius));
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = generate_targets(5, CENTER, RADIUS, &mut StdRng::seed_from_u64(99));
        let b = generate_targets(5, CENTER, RADIUS, &mut StdRng::seed_from_u64(99));
        let c = generate_targets(5, CENTER, RADIUS, &mut StdRng::seed_from_u64(100));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_contains() {
        let t = Target::new(0.5, 0.5, 0.05);
        assert!(t.contains(AimPosition::new(0.5, 0.5)));
        assert!(t.contains(AimPosition::new(0.53, 0.54)));
        assert!(!t.contains(AimPosition::new(0.6, 0.5)));
    }
}
