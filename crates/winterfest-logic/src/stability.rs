//! Hand-steadiness filter.
//!
//! Keeps the magnitudes of the last `window` angular samples in a ring
//! buffer and derives `stability = clamp(1 − 2·mean, 0, 1)`. A still
//! device reads 1.0; a mean jitter of 0.5 or more reads 0.0.
//!
//! The buffer starts zeroed, so the first few samples after a reset are
//! averaged against stale zeros and read steadier than they are. That
//! startup transient is accepted behaviour.

use serde::{Deserialize, Serialize};

use crate::sensor::AngularSample;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityFilter {
    buffer: Vec<f32>,
    cursor: usize,
    stability: f32,
}

impl StabilityFilter {
    /// Create a filter averaging over `window` samples (at least 1).
    pub fn new(window: usize) -> Self {
        Self {
            buffer: vec![0.0; window.max(1)],
            cursor: 0,
            stability: 1.0,
        }
    }

    /// Feed one sample and recompute stability.
    ///
    /// Non-finite samples are stored as infinite jitter, which pins
    /// stability to 0 until they rotate out of the window.
    pub fn observe(&mut self, sample: AngularSample) {
        let magnitude = if sample.is_finite() {
            sample.magnitude()
        } else {
            log::warn!("non-finite angular sample {:?} treated as maximal jitter", sample);
            f32::INFINITY
        };

        self.buffer[self.cursor] = magnitude;
        self.cursor = (self.cursor + 1) % self.buffer.len();
        self.stability = stability_from_mean(self.mean_magnitude());
    }

    /// Current stability in `[0, 1]`, higher is steadier.
    pub fn stability(&self) -> f32 {
        self.stability
    }

    /// Whether stability is strictly above `threshold`.
    pub fn is_stable(&self, threshold: f32) -> bool {
        self.stability > threshold
    }

    pub fn mean_magnitude(&self) -> f32 {
        self.buffer.iter().sum::<f32>() / self.buffer.len() as f32
    }

    pub fn window(&self) -> usize {
        self.buffer.len()
    }

    /// Zero the buffer and return to full stability.
    pub fn reset(&mut self) {
        self.buffer.iter_mut().for_each(|m| *m = 0.0);
        self.cursor = 0;
        self.stability = 1.0;
    }
}

fn stability_from_mean(mean: f32) -> f32 {
    if !mean.is_finite() {
        return 0.0;
    }
    (1.0 - 2.0 * mean).clamp(0.0, 1.0)
}
