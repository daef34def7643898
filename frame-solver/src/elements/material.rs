//! Material properties

use serde::{Deserialize, Serialize};

/// Material properties for frame analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Display name
    pub name: String,
    /// Modulus of elasticity
    pub elasticity: f64,
    /// Coefficient of thermal expansion
    pub thermal: f64,
}

impl Material {
    /// Create a new material with given properties
    pub fn new(name: &str, elasticity: f64, thermal: f64) -> Self {
        Self {
            name: name.to_string(),
            elasticity,
            thermal,
        }
    }

    /// Structural steel in kN and m (E = 200 GPa, alpha = 1.2e-5 /°C)
    pub fn steel() -> Self {
        Self::new("Steel", 200e6, 1.2e-5)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
