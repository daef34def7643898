//! Model extraction - flattens a [`StructureModel`] into numeric tables
//!
//! Per-node values with three components are stored flat with stride 3
//! (`[ux, uy, rz]` of node 0, then node 1, ...). Per-load-case tables are
//! indexed `[case][item]` by load case position.

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::loads::{DistributedLoad, Temperature};
use crate::math::{HingeCase, LocalLoad, MemberProps, ThermalState};
use crate::model::StructureModel;

/// Numeric snapshot of a structure, ready for assembly
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelData {
    /// Load case names in solve order
    pub case_names: Vec<String>,

    // Nodes
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Restraint flags, 3 per node
    pub restraints: Vec<bool>,
    /// Restraint orientation angle per node (radians)
    pub restraint_angle: Vec<f64>,
    /// Spring constants, 3 per node (zero where restrained)
    pub springs: Vec<f64>,
    /// Prescribed displacements, 3 per node (zero where free)
    pub prescribed: Vec<f64>,
    /// Whether each node releases rotational continuity
    pub node_hinged: Vec<bool>,
    /// Nodal forces `[case][3 * node + dof]`
    pub nodal_forces: Vec<Vec<f64>>,
    /// Force orientation angle `[case][node]` (radians)
    pub force_angle: Vec<Vec<f64>>,

    // Members
    pub member_start: Vec<usize>,
    pub member_end: Vec<usize>,
    pub elasticity: Vec<f64>,
    pub thermal: Vec<f64>,
    pub inertia: Vec<f64>,
    pub area: Vec<f64>,
    pub y_top: Vec<f64>,
    pub y_bottom: Vec<f64>,
    /// Section depth between the extreme fibers
    pub depth: Vec<f64>,
    /// Start hinge flags after node hinge resolution
    pub hinge_start: Vec<bool>,
    /// End hinge flags after node hinge resolution
    pub hinge_end: Vec<bool>,
    /// Distributed loads `[case][member]`, in the axes they were given
    pub loads: Vec<Vec<DistributedLoad>>,
    /// Fiber temperatures `[case][member]`
    pub temperatures: Vec<Vec<Temperature>>,
}

impl ModelData {
    /// Flatten the model into numeric tables and resolve node hinges
    pub fn extract(model: &StructureModel) -> FrameResult<Self> {
        let n_cases = model.load_cases.len();
        let n_nodes = model.nodes.len();
        let n_members = model.members.len();

        let mut data = Self {
            case_names: model.load_cases.iter().map(|c| c.name.clone()).collect(),
            nodal_forces: vec![vec![0.0; 3 * n_nodes]; n_cases],
            force_angle: vec![vec![0.0; n_nodes]; n_cases],
            loads: vec![vec![DistributedLoad::default(); n_members]; n_cases],
            temperatures: vec![vec![Temperature::default(); n_members]; n_cases],
            ..Default::default()
        };

        for (n, node) in model.nodes.iter().enumerate() {
            data.x.push(node.x);
            data.y.push(node.y);
            data.restraint_angle.push(node.support.angle);
            data.node_hinged.push(node.hinged);

            let restraints = node.support.restraints();
            for dof in 0..3 {
                let restrained = restraints[dof];
                data.restraints.push(restrained);
                data.springs
                    .push(if restrained { 0.0 } else { node.support.spring[dof] });
                data.prescribed
                    .push(if restrained { node.support.prescribed[dof] } else { 0.0 });
            }

            for case in 0..n_cases {
                if let Some(force) = node.force(case) {
                    data.nodal_forces[case][3 * n] = force.fx;
                    data.nodal_forces[case][3 * n + 1] = force.fy;
                    data.nodal_forces[case][3 * n + 2] = force.mz;
                    data.force_angle[case][n] = force.angle;
                }
            }
        }

        for (m, member) in model.members.iter().enumerate() {
            if member.start >= n_nodes {
                return Err(FrameError::NodeNotFound(member.start));
            }
            if member.end >= n_nodes {
                return Err(FrameError::NodeNotFound(member.end));
            }
            let material = model
                .materials
                .get(member.material)
                .ok_or(FrameError::MaterialNotFound(member.material))?;
            let section = model
                .sections
                .get(member.section)
                .ok_or(FrameError::SectionNotFound(member.section))?;

            data.member_start.push(member.start);
            data.member_end.push(member.end);
            data.elasticity.push(material.elasticity);
            data.thermal.push(material.thermal);
            data.inertia.push(section.inertia);
            data.area.push(section.area);
            data.y_top.push(section.y_top);
            data.y_bottom.push(section.y_bottom);
            data.depth.push(section.depth());
            data.hinge_start.push(member.hinges.start);
            data.hinge_end.push(member.hinges.end);

            for case in 0..n_cases {
                if let Some(load) = member.load(case) {
                    data.loads[case][m] = *load;
                }
                if let Some(t) = member.temperature(case) {
                    data.temperatures[case][m] = *t;
                }
            }
        }

        data.resolve_node_hinges();
        Ok(data)
    }

    /// Turn node hinges into member end releases
    ///
    /// At every hinged node the first incident member (in member order)
    /// keeps its end continuous; every later incident member end is released.
    /// Members at nodes that are not hinged keep their own flags.
    pub fn resolve_node_hinges(&mut self) {
        for node in 0..self.node_hinged.len() {
            if !self.node_hinged[node] {
                continue;
            }
            for (k, m) in self.incident_members(node).into_iter().enumerate() {
                let flag = if self.member_start[m] == node {
                    &mut self.hinge_start[m]
                } else {
                    &mut self.hinge_end[m]
                };
                *flag = k > 0;
            }
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.x.len()
    }

    pub fn num_members(&self) -> usize {
        self.member_start.len()
    }

    pub fn num_cases(&self) -> usize {
        self.case_names.len()
    }

    /// Length of a member
    pub fn length(&self, m: usize) -> f64 {
        let (a, b) = (self.member_start[m], self.member_end[m]);
        (self.x[b] - self.x[a]).hypot(self.y[b] - self.y[a])
    }

    /// Direction cosines `(cos, sin)` of the member axis
    pub fn direction_cosines(&self, m: usize) -> (f64, f64) {
        let (a, b) = (self.member_start[m], self.member_end[m]);
        let l = self.length(m);
        ((self.x[b] - self.x[a]) / l, (self.y[b] - self.y[a]) / l)
    }

    /// Member orientation in degrees, counter-clockwise from global X in `[0, 360)`
    pub fn angle_degrees(&self, m: usize) -> f64 {
        let (a, b) = (self.member_start[m], self.member_end[m]);
        let dx = self.x[b] - self.x[a];
        let dy = self.y[b] - self.y[a];
        if dx == 0.0 {
            return if dy > 0.0 { 90.0 } else { 270.0 };
        }
        let deg = dy.atan2(dx).to_degrees();
        if deg < 0.0 {
            deg + 360.0
        } else {
            deg
        }
    }

    /// Hinge case of a member after node hinge resolution
    pub fn hinge_case(&self, m: usize) -> HingeCase {
        HingeCase::from_flags(self.hinge_start[m], self.hinge_end[m])
    }

    /// Stiffness constants of a member
    pub fn member_props(&self, m: usize) -> MemberProps {
        MemberProps {
            e: self.elasticity[m],
            a: self.area[m],
            i: self.inertia[m],
            length: self.length(m),
        }
    }

    /// Distributed load of a member for a load case, in the member's local axes
    pub fn local_load(&self, case: usize, m: usize) -> LocalLoad {
        let (c, s) = self.direction_cosines(m);
        let [qx0, qx1, qy0, qy1] = self.loads[case][m].to_local(c, s);
        LocalLoad { qx0, qx1, qy0, qy1 }
    }

    /// Thermal state of a member for a load case
    pub fn thermal_state(&self, case: usize, m: usize) -> ThermalState {
        let t = &self.temperatures[case][m];
        ThermalState {
            alpha: self.thermal[m],
            mean: t.at_centroid(self.y_top[m], self.y_bottom[m]),
            gradient: t.gradient(),
            depth: self.depth[m],
        }
    }

    /// Indices of all members attached to a node
    pub fn incident_members(&self, node: usize) -> Vec<usize> {
        (0..self.num_members())
            .filter(|&m| self.member_start[m] == node || self.member_end[m] == node)
            .collect()
    }
}
