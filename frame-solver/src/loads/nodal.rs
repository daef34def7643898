//! Nodal forces - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

/// A force applied directly to a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodalForce {
    /// Force along the force frame's X axis
    pub fx: f64,
    /// Force along the force frame's Y axis
    pub fy: f64,
    /// Moment about Z
    pub mz: f64,
    /// Orientation of the force frame (radians)
    pub angle: f64,
}

impl NodalForce {
    /// Create a new nodal force with all components
    pub fn new(fx: f64, fy: f64, mz: f64) -> Self {
        Self {
            fx,
            fy,
            mz,
            angle: 0.0,
        }
    }

    /// Create a force in X only
    pub fn fx(value: f64) -> Self {
        Self::new(value, 0.0, 0.0)
    }

    /// Create a force in Y only
    pub fn fy(value: f64) -> Self {
        Self::new(0.0, value, 0.0)
    }

    /// Create a moment only
    pub fn moment(mz: f64) -> Self {
        Self::new(0.0, 0.0, mz)
    }

    /// Set the force frame orientation (radians)
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Force components resolved with the frame rotation
    /// `[Fx·cos + Fy·sin, −Fx·sin + Fy·cos, Mz]`
    pub fn resolved(&self) -> [f64; 3] {
        let (sin, cos) = self.angle.sin_cos();
        [
            self.fx * cos + self.fy * sin,
            -self.fx * sin + self.fy * cos,
            self.mz,
        ]
    }
}
