//! Analysis options and the analysis pipeline

pub mod internal;
pub mod solver;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::FrameResult;
use crate::extract::ModelData;
use crate::results::AnalysisResults;

pub use solver::{Assembly, DofMap};

/// Options for structural analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Diagram samples per unit of member length
    pub samples_per_length: f64,
    /// Minimum number of diagram samples per member
    pub min_samples: usize,
    /// Tolerance below which `qy0` and `qy1` are treated as equal
    pub load_tolerance: f64,
    /// Check static equilibrium after analysis
    pub check_statics: bool,
    /// Relative tolerance of the equilibrium check
    pub statics_tolerance: f64,
    /// Enable logging/progress output
    pub log: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            samples_per_length: 1.5,
            min_samples: 25,
            load_tolerance: 1e-5,
            check_statics: false,
            statics_tolerance: 1e-6,
            log: false,
        }
    }
}

impl AnalysisOptions {
    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Enable the equilibrium check
    pub fn with_statics_check(mut self, tolerance: f64) -> Self {
        self.check_statics = true;
        self.statics_tolerance = tolerance;
        self
    }

    /// Set the diagram resolution
    pub fn with_samples(mut self, per_length: f64, min: usize) -> Self {
        self.samples_per_length = per_length;
        self.min_samples = min;
        self
    }

    /// Set the equal-load tolerance used to locate extrema
    pub fn with_load_tolerance(mut self, tol: f64) -> Self {
        self.load_tolerance = tol;
        self
    }

    /// Number of diagram samples for a member of the given length
    pub fn num_samples(&self, length: f64) -> usize {
        ((self.samples_per_length * length) as usize)
            .max(self.min_samples)
            .max(2)
    }
}

/// Assemble and solve every load case of a model snapshot
///
/// The stiffness matrix is assembled and inverted once and shared by all
/// load cases. Either every case is solved or an error is returned.
pub fn run(data: &ModelData, options: &AnalysisOptions) -> FrameResult<AnalysisResults> {
    info!(
        "Analyzing {} nodes, {} members, {} load cases",
        data.num_nodes(),
        data.num_members(),
        data.num_cases()
    );

    let assembly = Assembly::build(data)?;

    let mut results = AnalysisResults {
        free_dofs: assembly.dofs.num_free(),
        total_dofs: assembly.dofs.num_total(),
        ..Default::default()
    };

    for case in 0..data.num_cases() {
        results
            .load_cases
            .push(solver::solve_case(data, &assembly, case, options)?);
    }

    info!(
        "Analysis complete: {} free DOFs, {} load cases solved",
        results.free_dofs,
        results.load_cases.len()
    );
    Ok(results)
}
