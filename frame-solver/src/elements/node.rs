//! Node element - represents a point in the plane

use serde::{Deserialize, Serialize};

use super::Support;
use crate::loads::NodalForce;

/// A 2D node in the frame model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Support conditions
    pub support: Support,
    /// Moment release between all connected members but one
    pub hinged: bool,
    /// Applied nodal force, one entry per load case
    pub(crate) forces: Vec<NodalForce>,
}

impl Node {
    /// Create a new unsupported node at the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            support: Support::free(),
            hinged: false,
            forces: Vec::new(),
        }
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Check whether the node sits at the given point within `tol`
    pub fn is_at(&self, x: f64, y: f64, tol: f64) -> bool {
        (self.x - x).abs() < tol && (self.y - y).abs() < tol
    }

    /// Get the nodal force for a load case position
    pub fn force(&self, case: usize) -> Option<&NodalForce> {
        self.forces.get(case)
    }
}
