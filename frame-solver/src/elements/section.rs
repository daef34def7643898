//! Section properties for frame elements

use serde::{Deserialize, Serialize};

/// Cross-section properties for frame elements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Display name
    pub name: String,
    /// Second moment of area about the bending axis
    pub inertia: f64,
    /// Cross-sectional area
    pub area: f64,
    /// Distance from the centroid to the top fiber (local +y)
    pub y_top: f64,
    /// Distance from the centroid to the bottom fiber (local -y)
    pub y_bottom: f64,
}

impl Section {
    /// Create a section from raw properties
    pub fn generic(inertia: f64, area: f64, y_top: f64, y_bottom: f64) -> Self {
        Self {
            name: "Generic".to_string(),
            inertia,
            area,
            y_top,
            y_bottom,
        }
    }

    /// Create a rectangular section of width `b` and depth `h`
    pub fn rectangle(b: f64, h: f64) -> Self {
        Self {
            name: format!("Rect {b}x{h}"),
            inertia: b * h.powi(3) / 12.0,
            area: b * h,
            y_top: h / 2.0,
            y_bottom: h / 2.0,
        }
    }

    /// Create a circular section with outer diameter `d_outer` and inner
    /// diameter `d_inner` (0 for a solid bar)
    pub fn circle(d_outer: f64, d_inner: f64) -> Self {
        let pi = std::f64::consts::PI;
        Self {
            name: format!("Circle {d_outer}/{d_inner}"),
            inertia: pi * (d_outer.powi(4) - d_inner.powi(4)) / 64.0,
            area: pi * (d_outer.powi(2) - d_inner.powi(2)) / 4.0,
            y_top: d_outer / 2.0,
            y_bottom: d_outer / 2.0,
        }
    }

    /// Rename the section
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Total depth between the extreme fibers
    pub fn depth(&self) -> f64 {
        self.y_top + self.y_bottom
    }
}

impl Default for Section {
    fn default() -> Self {
        // 200mm x 200mm in meters
        Self::rectangle(0.2, 0.2)
    }
}
