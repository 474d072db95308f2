//! Shot scoring.
//!
//! Five concentric rings at 0.2r steps are worth 100/80/60/40/20 points;
//! anything outside the target is worth nothing. The ring value is then
//! scaled by the shooter's stability and rounded.
//!
//! ```
//! use winterfest_logic::scoring::score_shot;
//!
//! assert_eq!(score_shot(0.0, 0.06, 1.0), 100);
//! assert_eq!(score_shot(0.03, 0.06, 1.0), 60);
//! assert_eq!(score_shot(0.0, 0.06, 0.75), 75);
//! ```

use crate::constants::scoring::RINGS;

/// Points for the ring containing `hit_distance`, before stability.
pub fn ring_points(hit_distance: f32, target_radius: f32) -> u32 {
    if !(target_radius > 0.0) || !(hit_distance >= 0.0) {
        return 0;
    }
    RINGS
        .iter()
        .find(|(edge, _)| hit_distance <= edge * target_radius)
        .map(|&(_, points)| points)
        .unwrap_or(0)
}

/// Final points for a shot: `round(ring_points × stability)`.
///
/// Non-increasing in distance, non-decreasing in stability. Stability is
/// clamped to `[0, 1]`; NaN inputs score 0.
pub fn score_shot(hit_distance: f32, target_radius: f32, stability: f32) -> u32 {
    let stability = if stability.is_nan() {
        0.0
    } else {
        stability.clamp(0.0, 1.0)
    };
    let ring = ring_points(hit_distance, target_radius);
    (ring as f32 * stability).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullseye_full_stability() {
        for r in [0.01, 0.05, 0.08, 1.0] {
            assert_eq!(score_shot(0.0, r, 1.0), 100);
        }
    }

    #[test]
    fn test_ring_edges_inclusive() {
        let r = 1.0;
        assert_eq!(score_shot(0.2, r, 1.0), 100);
        assert_eq!(score_shot(0.21, r, 1.0), 80);
        assert_eq!(score_shot(0.4, r, 1.0), 80);
        assert_eq!(score_shot(0.6, r, 1.0), 60);
        assert_eq!(score_shot(0.8, r, 1.0), 40);
        assert_eq!(score_shot(1.0, r, 1.0), 20);
        assert_eq!(score_shot(1.01, r, 1.0), 0);
    }

    #[test]
    fn test_miss_scores_zero() {
        let r = 0.06;
        assert_eq!(score_shot(1.5 * r, r, 1.0), 0);
    }

    #[test]
    fn test_stability_scaling_rounds() {
        assert_eq!(score_shot(0.0, 0.05, 0.5), 50);
        assert_eq!(score_shot(0.0, 0.05, 0.856), 86);
        // 20 × 0.71 = 14.2
        assert_eq!(score_shot(0.05, 0.05, 0.71), 14);
        assert_eq!(score_shot(0.0, 0.05, 0.0), 0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(score_shot(0.0, 0.0, 1.0), 0);
        assert_eq!(score_shot(0.0, -0.1, 1.0), 0);
        assert_eq!(score_shot(f32::NAN, 0.05, 1.0), 0);
        assert_eq!(score_shot(0.0, 0.05, f32::NAN), 0);
        assert_eq!(score_shot(0.0, 0.05, 3.0), 100);
    }

    #[test]
    fn test_monotonic_in_distance() {
        let r = 0.07;
        for stability in [0.71, 0.8, 0.95, 1.0] {
            let mut prev = u32::MAX;
            for i in 0..=200 {
                let d = i as f32 * r / 100.0;
                let s = score_shot(d, r, stability);
                assert!(s <= prev, "score rose at d={} s={}", d, stability);
                prev = s;
            }
        }
    }

    #[test]
    fn test_monotonic_in_stability() {
        let r = 0.07;
        for d in [0.0, 0.02, 0.04, 0.06, 0.1] {
            let mut prev = 0;
            for i in 0..=100 {
                let s = score_shot(d, r, i as f32 / 100.0);
                assert!(s >= prev);
                prev = s;
            }
        }
    }
}
