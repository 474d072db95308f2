//! Angular-rate samples as delivered by the device gyroscope.

use serde::{Deserialize, Serialize};

/// One three-axis angular-rate reading. Units are whatever the source
/// sensor reports; the engine only cares about relative magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AngularSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AngularSample {
    pub const ZERO: AngularSample = AngularSample {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm `sqrt(x² + y² + z²)`.
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<(f32, f32, f32)> for AngularSample {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}
