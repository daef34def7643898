//! Result types for frame analysis

use serde::{Deserialize, Serialize};

use crate::error::FrameResult;
use crate::extract::ModelData;
use crate::loads::NodalForce;
use crate::math;

/// Displacement results at a node, in global axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub ux: f64,
    /// Displacement in Y direction
    pub uy: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [UX, UY, RZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            ux: arr[0],
            uy: arr[1],
            rz: arr[2],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        self.ux.hypot(self.uy)
    }
}

/// Reaction forces at a supported node
///
/// Components are expressed in the support frame, which differs from the
/// global axes only at skewed supports. A component is non-zero only for a
/// restrained DOF or for a free DOF carrying a spring, where it is the
/// spring force `-k·u` acting on the structure. Plain free DOFs report zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force along the support frame's X axis
    pub fx: f64,
    /// Reaction force along the support frame's Y axis
    pub fy: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FX, FY, MZ]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            mz: arr[2],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        self.fx.hypot(self.fy)
    }

    /// Rotate the reaction into global axes given the node's skew angle
    /// (see [`math::skew_angle`])
    pub fn to_global(&self, skew: f64) -> Self {
        let (s, c) = skew.sin_cos();
        Self {
            fx: c * self.fx + s * self.fy,
            fy: -s * self.fx + c * self.fy,
            mz: self.mz,
        }
    }
}

/// Internal forces at one end of a member
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force
    pub shear: f64,
    /// Bending moment (positive = sagging)
    pub moment: f64,
}

/// Local end forces of a member
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberEndForces {
    /// Forces acting on the member ends in local axes
    /// `[Fx_start, Fy_start, Mz_start, Fx_end, Fy_end, Mz_end]`
    pub local: [f64; 6],
}

impl MemberEndForces {
    pub fn new(local: [f64; 6]) -> Self {
        Self { local }
    }

    /// Internal forces just inside the start node
    pub fn start(&self) -> MemberForces {
        MemberForces {
            axial: -self.local[0],
            shear: self.local[1],
            moment: -self.local[2],
        }
    }

    /// Internal forces just inside the end node
    pub fn end(&self) -> MemberForces {
        MemberForces {
            axial: self.local[3],
            shear: -self.local[4],
            moment: self.local[5],
        }
    }
}

/// A sampled internal-result field of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagramField {
    Axial,
    Shear,
    Moment,
    Ux,
    Uy,
    Rz,
}

/// Internal force and displacement diagrams along a member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberDiagram {
    /// Sample positions measured from the start node
    pub x: Vec<f64>,
    pub axial: Vec<f64>,
    pub shear: Vec<f64>,
    pub moment: Vec<f64>,
    /// Axial displacement in local axes
    pub ux: Vec<f64>,
    /// Transverse displacement in local axes
    pub uy: Vec<f64>,
    pub rz: Vec<f64>,
    /// Sample indices of up to two moment extrema
    pub moment_max: [Option<usize>; 2],
    /// Sample index of the shear extremum
    pub shear_max: Option<usize>,
}

impl MemberDiagram {
    /// Number of sample points
    pub fn num_points(&self) -> usize {
        self.x.len()
    }

    /// Member length covered by the diagram
    pub fn length(&self) -> f64 {
        self.x.last().copied().unwrap_or(0.0)
    }

    /// Sampled values of a field
    pub fn field(&self, field: DiagramField) -> &[f64] {
        match field {
            DiagramField::Axial => &self.axial,
            DiagramField::Shear => &self.shear,
            DiagramField::Moment => &self.moment,
            DiagramField::Ux => &self.ux,
            DiagramField::Uy => &self.uy,
            DiagramField::Rz => &self.rz,
        }
    }

    /// Value of a field at `x`, interpolated linearly between samples
    ///
    /// `x` is clamped to the member length.
    pub fn value_at(&self, field: DiagramField, x: f64) -> f64 {
        let values = self.field(field);
        let n = values.len();
        if n == 0 {
            return 0.0;
        }
        if n == 1 || self.length() <= 0.0 {
            return values[0];
        }

        let t = (x / self.length()).clamp(0.0, 1.0) * (n - 1) as f64;
        let i = (t.floor() as usize).min(n - 2);
        let frac = t - i as f64;
        values[i] + (values[i + 1] - values[i]) * frac
    }

    /// Largest absolute value of a field
    pub fn max_abs(&self, field: DiagramField) -> f64 {
        self.field(field).iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Moment extremum indices with `-1` for a missing extremum
    pub fn moment_max_sentinel(&self) -> [i64; 2] {
        [sentinel(self.moment_max[0]), sentinel(self.moment_max[1])]
    }

    /// Shear extremum index with `-1` for a missing extremum
    pub fn shear_max_sentinel(&self) -> i64 {
        sentinel(self.shear_max)
    }
}

fn sentinel(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i as i64)
}

/// Results of a single load case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadCaseResults {
    /// Load case name
    pub name: String,
    /// Displacement of every node
    pub node_displacements: Vec<NodeDisplacement>,
    /// Reactions of every node (zero at unsupported DOFs)
    pub reactions: Vec<Reactions>,
    /// Local end forces of every member
    pub member_forces: Vec<MemberEndForces>,
    /// Local end displacements of every member
    pub member_displacements: Vec<[f64; 6]>,
    /// Internal diagrams of every member
    pub diagrams: Vec<MemberDiagram>,
}

impl LoadCaseResults {
    /// Global force balance `[ΣFx, ΣFy]` of reactions, nodal forces and
    /// member loads. Zero for a structure in equilibrium.
    pub fn equilibrium_residual(&self, data: &ModelData, case: usize) -> [f64; 2] {
        let mut sum = [0.0; 2];

        for n in 0..data.num_nodes() {
            let skew = math::skew_angle(
                data.restraints[3 * n],
                data.restraints[3 * n + 1],
                data.restraint_angle[n],
            );
            if let Some(r) = self.reactions.get(n) {
                let g = r.to_global(skew);
                sum[0] += g.fx;
                sum[1] += g.fy;
            }

            let f = &data.nodal_forces[case][3 * n..3 * n + 3];
            let applied = NodalForce::new(f[0], f[1], f[2])
                .with_angle(data.force_angle[case][n])
                .resolved();
            sum[0] += applied[0];
            sum[1] += applied[1];
        }

        for m in 0..data.num_members() {
            let q = data.local_load(case, m);
            let l = data.length(m);
            let (c, s) = data.direction_cosines(m);
            let wx = (q.qx0 + q.qx1) / 2.0 * l;
            let wy = (q.qy0 + q.qy1) / 2.0 * l;
            sum[0] += wx * c - wy * s;
            sum[1] += wx * s + wy * c;
        }

        sum
    }
}

/// Results of a complete analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Results per load case, in load case order
    pub load_cases: Vec<LoadCaseResults>,
    /// Number of free degrees of freedom
    pub free_dofs: usize,
    /// Total number of degrees of freedom
    pub total_dofs: usize,
}

impl AnalysisResults {
    /// Results of a load case by position
    pub fn case(&self, case: usize) -> Option<&LoadCaseResults> {
        self.load_cases.get(case)
    }

    /// Results of a load case by name
    pub fn case_by_name(&self, name: &str) -> Option<&LoadCaseResults> {
        self.load_cases.iter().find(|c| c.name == name)
    }

    /// Export results as JSON
    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Summary of a load case
    pub fn summary(&self, case: usize) -> Option<AnalysisSummary> {
        let results = self.load_cases.get(case)?;
        let mut summary = AnalysisSummary {
            load_case: results.name.clone(),
            num_nodes: results.node_displacements.len(),
            num_members: results.member_forces.len(),
            free_dofs: self.free_dofs,
            total_dofs: self.total_dofs,
            ..Default::default()
        };

        for (n, disp) in results.node_displacements.iter().enumerate() {
            let mag = disp.translation_magnitude();
            if mag > summary.max_displacement {
                summary.max_displacement = mag;
                summary.max_disp_node = Some(n);
            }
        }

        for (n, rxn) in results.reactions.iter().enumerate() {
            let mag = rxn.force_magnitude();
            if mag > summary.max_reaction {
                summary.max_reaction = mag;
                summary.max_reaction_node = Some(n);
            }
        }

        for (m, diagram) in results.diagrams.iter().enumerate() {
            let axial = diagram.max_abs(DiagramField::Axial);
            if axial > summary.max_axial {
                summary.max_axial = axial;
                summary.max_axial_member = Some(m);
            }

            let moment = diagram.max_abs(DiagramField::Moment);
            if moment > summary.max_moment {
                summary.max_moment = moment;
                summary.max_moment_member = Some(m);
            }
        }

        Some(summary)
    }
}

/// Summary of analysis results for one load case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub load_case: String,
    /// Number of nodes
    pub num_nodes: usize,
    /// Number of members
    pub num_members: usize,
    /// Total degrees of freedom
    pub total_dofs: usize,
    /// Free degrees of freedom
    pub free_dofs: usize,
    /// Maximum translation
    pub max_displacement: f64,
    /// Node with maximum translation
    pub max_disp_node: Option<usize>,
    /// Maximum reaction force
    pub max_reaction: f64,
    /// Node with maximum reaction
    pub max_reaction_node: Option<usize>,
    /// Maximum absolute bending moment along any member
    pub max_moment: f64,
    /// Member with maximum moment
    pub max_moment_member: Option<usize>,
    /// Maximum absolute axial force along any member
    pub max_axial: f64,
    /// Member with maximum axial force
    pub max_axial_member: Option<usize>,
}
