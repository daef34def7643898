//! Support conditions

use serde::{Deserialize, Serialize};

/// Support conditions at a node
///
/// Restraint flags, spring constants and prescribed displacements are all
/// expressed in the support frame, i.e. the global axes rotated
/// counter-clockwise by `angle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Restrained in X translation
    pub rx: bool,
    /// Restrained in Y translation
    pub ry: bool,
    /// Restrained in Z rotation
    pub rz: bool,
    /// Orientation of the support frame (radians)
    pub angle: f64,
    /// Spring constants [Kx, Ky, Kz], only used on unrestrained axes
    pub spring: [f64; 3],
    /// Prescribed displacements [Ux, Uy, Rz], only used on restrained axes
    pub prescribed: [f64; 3],
}

impl Support {
    /// Create a new support with no restraints
    pub fn free() -> Self {
        Self::default()
    }

    /// Create a fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self::with_restraints(true, true, true)
    }

    /// Create a pinned support (translations restrained, rotation free)
    pub fn pinned() -> Self {
        Self::with_restraints(true, true, false)
    }

    /// Create a roller support (Y translation restrained only)
    pub fn roller_y() -> Self {
        Self::with_restraints(false, true, false)
    }

    /// Create a roller support (X translation restrained only)
    pub fn roller_x() -> Self {
        Self::with_restraints(true, false, false)
    }

    /// Create a support with specific restraints
    pub fn with_restraints(rx: bool, ry: bool, rz: bool) -> Self {
        Self {
            rx,
            ry,
            rz,
            ..Default::default()
        }
    }

    /// Rotate the support frame (radians)
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Set spring constants [Kx, Ky, Kz]
    pub fn with_springs(mut self, kx: f64, ky: f64, kz: f64) -> Self {
        self.spring = [kx, ky, kz];
        self
    }

    /// Set prescribed displacements [Ux, Uy, Rz]
    pub fn with_prescribed(mut self, ux: f64, uy: f64, rz: f64) -> Self {
        self.prescribed = [ux, uy, rz];
        self
    }

    /// Restraint flags as [Rx, Ry, Rz]
    pub fn restraints(&self) -> [bool; 3] {
        [self.rx, self.ry, self.rz]
    }
}

impl Default for Support {
    fn default() -> Self {
        Self {
            rx: false,
            ry: false,
            rz: false,
            angle: 0.0,
            spring: [0.0; 3],
            prescribed: [0.0; 3],
        }
    }
}
