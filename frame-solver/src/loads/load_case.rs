//! Load cases

use serde::{Deserialize, Serialize};

/// Position of a load case in the model's ordered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadCaseId(pub usize);

impl LoadCaseId {
    /// Position in the load case list
    pub fn index(self) -> usize {
        self.0
    }
}

/// A load case groups related loads under a common name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCase {
    /// Name of the load case
    pub name: String,
}

impl LoadCase {
    /// Create a new load case
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Default for LoadCase {
    fn default() -> Self {
        Self::new("Case 1")
    }
}
