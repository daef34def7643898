//! Thermal loads on members

use serde::{Deserialize, Serialize};

/// Temperature change at the top (local +y) and bottom fibers of a member
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    /// Temperature change at the top fiber
    pub top: f64,
    /// Temperature change at the bottom fiber
    pub bottom: f64,
}

impl Temperature {
    /// Create a new temperature pair
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Same temperature change across the section
    pub fn uniform(t: f64) -> Self {
        Self::new(t, t)
    }

    /// Temperature at the centroid, interpolated linearly between the fibers
    ///
    /// A section without depth takes the plain average.
    pub fn at_centroid(&self, y_top: f64, y_bottom: f64) -> f64 {
        let depth = y_top + y_bottom;
        if depth == 0.0 {
            return (self.top + self.bottom) / 2.0;
        }
        (self.top * y_bottom + self.bottom * y_top) / depth
    }

    /// Top minus bottom temperature
    pub fn gradient(&self) -> f64 {
        self.top - self.bottom
    }
}
