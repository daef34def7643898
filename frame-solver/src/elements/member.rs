//! Member element - 2D frame element (beam/column/truss bar)

use serde::{Deserialize, Serialize};

use crate::loads::{DistributedLoad, Temperature};

/// Moment releases at the member ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberHinges {
    /// Moment released at the start node
    pub start: bool,
    /// Moment released at the end node
    pub end: bool,
}

impl MemberHinges {
    /// Create hinges with no end releases
    pub fn none() -> Self {
        Self::default()
    }

    /// Create a pin at the start node
    pub fn pin_start() -> Self {
        Self {
            start: true,
            end: false,
        }
    }

    /// Create a pin at the end node
    pub fn pin_end() -> Self {
        Self {
            start: false,
            end: true,
        }
    }

    /// Create pins at both ends (truss bar)
    pub fn pin_both() -> Self {
        Self {
            start: true,
            end: true,
        }
    }
}

/// A 2D frame member connecting two nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Index of the start node
    pub start: usize,
    /// Index of the end node
    pub end: usize,
    /// Index of the material
    pub material: usize,
    /// Index of the section
    pub section: usize,
    /// End moment releases
    pub hinges: MemberHinges,
    /// Distributed load, one entry per load case
    pub(crate) loads: Vec<DistributedLoad>,
    /// Top/bottom temperatures, one entry per load case
    pub(crate) temperatures: Vec<Temperature>,
}

impl Member {
    /// Create a new member
    pub fn new(start: usize, end: usize, material: usize, section: usize) -> Self {
        Self {
            start,
            end,
            material,
            section,
            hinges: MemberHinges::none(),
            loads: Vec::new(),
            temperatures: Vec::new(),
        }
    }

    /// Check whether the member connects the two nodes, in either orientation
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    /// Get the distributed load for a load case position
    pub fn load(&self, case: usize) -> Option<&DistributedLoad> {
        self.loads.get(case)
    }

    /// Get the temperature pair for a load case position
    pub fn temperature(&self, case: usize) -> Option<&Temperature> {
        self.temperatures.get(case)
    }
}
