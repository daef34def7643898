//! Distributed loads on members

use serde::{Deserialize, Serialize};

/// Axes in which the load components are given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadAxes {
    /// Components along global X/Y
    #[default]
    Global,
    /// Components along the member's local x (axial) and y (transverse)
    Local,
}

/// A linearly varying line load over the full member length
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// X intensity at the start node
    pub qx0: f64,
    /// X intensity at the end node
    pub qx1: f64,
    /// Y intensity at the start node
    pub qy0: f64,
    /// Y intensity at the end node
    pub qy1: f64,
    /// Axes of the components
    pub axes: LoadAxes,
}

impl DistributedLoad {
    /// Create a new distributed load
    pub fn new(qx0: f64, qx1: f64, qy0: f64, qy1: f64, axes: LoadAxes) -> Self {
        Self {
            qx0,
            qx1,
            qy0,
            qy1,
            axes,
        }
    }

    /// Uniform transverse load in local axes
    pub fn uniform_local(qy: f64) -> Self {
        Self::new(0.0, 0.0, qy, qy, LoadAxes::Local)
    }

    /// Uniform load along global Y (negative = downward)
    pub fn uniform_global_y(qy: f64) -> Self {
        Self::new(0.0, 0.0, qy, qy, LoadAxes::Global)
    }

    /// Uniform axial load in local axes
    pub fn axial(qx: f64) -> Self {
        Self::new(qx, qx, 0.0, 0.0, LoadAxes::Local)
    }

    /// Linearly varying transverse load in local axes
    pub fn trapezoidal_local(qy0: f64, qy1: f64) -> Self {
        Self::new(0.0, 0.0, qy0, qy1, LoadAxes::Local)
    }

    /// Resolve into the member's local axes, given the member's direction
    /// cosines. Returns `[qx0, qx1, qy0, qy1]`.
    pub fn to_local(&self, cos: f64, sin: f64) -> [f64; 4] {
        match self.axes {
            LoadAxes::Local => [self.qx0, self.qx1, self.qy0, self.qy1],
            LoadAxes::Global => [
                self.qx0 * cos + self.qy0 * sin,
                self.qx1 * cos + self.qy1 * sin,
                -self.qx0 * sin + self.qy0 * cos,
                -self.qx1 * sin + self.qy1 * cos,
            ],
        }
    }
}
