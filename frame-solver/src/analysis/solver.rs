//! Direct stiffness solver
//!
//! DOF vectors of a node are expressed in the node's support frame, which
//! is the global frame except at skewed supports.

use log::{debug, info, warn};

use crate::error::{FrameError, FrameResult};
use crate::extract::ModelData;
use crate::loads::NodalForce;
use crate::math::{self, HingeCase, Mat, Mat6, Vec as DVec, Vec6};
use crate::results::{LoadCaseResults, MemberEndForces, NodeDisplacement, Reactions};

use super::internal;
use super::AnalysisOptions;

/// Maps every structural DOF to its equation number
///
/// Restrained DOFs carry no equation number.
#[derive(Debug, Clone)]
pub struct DofMap {
    index: Vec<Option<usize>>,
    num_free: usize,
}

impl DofMap {
    /// Number free DOFs consecutively in node order
    pub fn number(restraints: &[bool]) -> Self {
        let mut num_free = 0;
        let index = restraints
            .iter()
            .map(|&restrained| {
                if restrained {
                    None
                } else {
                    num_free += 1;
                    Some(num_free - 1)
                }
            })
            .collect();
        Self { index, num_free }
    }

    /// Equation number of a DOF, `None` when restrained
    pub fn equation(&self, dof: usize) -> Option<usize> {
        self.index[dof]
    }

    pub fn num_free(&self) -> usize {
        self.num_free
    }

    pub fn num_total(&self) -> usize {
        self.index.len()
    }

    /// Equation numbers with `-1` marking restrained DOFs
    pub fn sentinels(&self) -> Vec<i64> {
        self.index
            .iter()
            .map(|e| e.map_or(-1, |i| i as i64))
            .collect()
    }
}

/// Structure DOFs of a member `[start ux, uy, rz, end ux, uy, rz]`
pub fn member_dofs(data: &ModelData, m: usize) -> [usize; 6] {
    let a = 3 * data.member_start[m];
    let b = 3 * data.member_end[m];
    [a, a + 1, a + 2, b, b + 1, b + 2]
}

/// Skew angle of every node
pub fn node_skews(data: &ModelData) -> Vec<f64> {
    (0..data.num_nodes())
        .map(|n| {
            math::skew_angle(
                data.restraints[3 * n],
                data.restraints[3 * n + 1],
                data.restraint_angle[n],
            )
        })
        .collect()
}

/// The assembled and inverted structure, shared by every load case
#[derive(Debug, Clone)]
pub struct Assembly {
    pub dofs: DofMap,
    /// Stiffness matrix of the free DOFs
    pub stiffness: Mat,
    /// Inverse of `stiffness`
    pub inverse: Mat,
    /// Skew angle per node
    pub skews: Vec<f64>,
    /// Hinge case per member
    pub cases: Vec<HingeCase>,
    /// Member stiffness in support-frame DOFs
    pub member_k: Vec<Mat6>,
    /// Support-frame to local rotation per member
    pub member_t: Vec<Mat6>,
}

impl Assembly {
    /// Assemble the free-DOF stiffness matrix and invert it
    pub fn build(data: &ModelData) -> FrameResult<Self> {
        // A fully restrained structure has an empty system and still
        // produces end forces and reactions
        let dofs = DofMap::number(&data.restraints);

        let skews = node_skews(data);
        let n_members = data.num_members();
        let mut cases = Vec::with_capacity(n_members);
        let mut member_k = Vec::with_capacity(n_members);
        let mut member_t = Vec::with_capacity(n_members);

        let mut k = Mat::zeros(dofs.num_free(), dofs.num_free());

        for m in 0..n_members {
            let props = data.member_props(m);
            if props.length < 1e-10 {
                return Err(FrameError::InvalidGeometry(format!(
                    "Member {} has zero length",
                    m
                )));
            }

            let case = data.hinge_case(m);
            let k_local = math::local_stiffness(case, &props);

            // Skew rotation first, then the member rotation
            let (c, s) = data.direction_cosines(m);
            let r = math::member_rotation(c, s);
            let ri = math::skew_rotation(
                skews[data.member_start[m]],
                skews[data.member_end[m]],
            );
            let t = r * ri;
            let k_global = t.transpose() * k_local * t;

            let member = member_dofs(data, m);
            for (a, &da) in member.iter().enumerate() {
                let Some(ea) = dofs.equation(da) else { continue };
                for (b, &db) in member.iter().enumerate() {
                    if let Some(eb) = dofs.equation(db) {
                        k[(ea, eb)] += k_global[(a, b)];
                    }
                }
            }

            cases.push(case);
            member_k.push(k_global);
            member_t.push(t);
        }

        for (dof, &spring) in data.springs.iter().enumerate() {
            if let Some(e) = dofs.equation(dof) {
                k[(e, e)] += spring;
            }
        }

        debug!(
            "Assembled {}x{} stiffness matrix (asymmetry {:.3e})",
            dofs.num_free(),
            dofs.num_free(),
            math::max_asymmetry(&k)
        );

        let inverse = math::invert(&k).ok_or(FrameError::SingularMatrix)?;
        debug!("Stiffness matrix inverted");

        Ok(Self {
            dofs,
            stiffness: k,
            inverse,
            skews,
            cases,
            member_k,
            member_t,
        })
    }
}

/// Rotate a global `[x, y, rz]` triple into the support frame of a node
fn to_support_frame(skew: f64, g: [f64; 3]) -> [f64; 3] {
    let (s, c) = skew.sin_cos();
    [c * g[0] - s * g[1], s * g[0] + c * g[1], g[2]]
}

/// Rotate a support-frame `[x, y, rz]` triple back to global axes
fn to_global_frame(skew: f64, d: [f64; 3]) -> [f64; 3] {
    let (s, c) = skew.sin_cos();
    [c * d[0] + s * d[1], -s * d[0] + c * d[1], d[2]]
}

/// Nodal forces of a load case, per DOF in the support frame
fn nodal_load_vector(data: &ModelData, skews: &[f64], case: usize) -> Vec<f64> {
    let mut fn_dof = vec![0.0; 3 * data.num_nodes()];
    for (n, &skew) in skews.iter().enumerate() {
        let f = &data.nodal_forces[case][3 * n..3 * n + 3];
        let global = NodalForce::new(f[0], f[1], f[2])
            .with_angle(data.force_angle[case][n])
            .resolved();
        fn_dof[3 * n..3 * n + 3].copy_from_slice(&to_support_frame(skew, global));
    }
    fn_dof
}

fn gather(values: &[f64], dofs: &[usize; 6]) -> Vec6 {
    Vec6::from_fn(|i, _| values[dofs[i]])
}

/// Solve a single load case against the assembled structure
pub fn solve_case(
    data: &ModelData,
    asm: &Assembly,
    case: usize,
    options: &AnalysisOptions,
) -> FrameResult<LoadCaseResults> {
    let n_dofs = asm.dofs.num_total();
    let n_members = data.num_members();

    let fn_dof = nodal_load_vector(data, &asm.skews, case);

    // Load vector: nodal forces plus member fixed-end forces
    let mut f = DVec::zeros(asm.dofs.num_free());
    for (dof, &value) in fn_dof.iter().enumerate() {
        if let Some(e) = asm.dofs.equation(dof) {
            f[e] += value;
        }
    }

    let mut member_f0 = Vec::with_capacity(n_members);
    for m in 0..n_members {
        let props = data.member_props(m);
        let q = data.local_load(case, m);
        let t = data.thermal_state(case, m);
        let f0_local = math::fixed_end_forces(asm.cases[m], &props, &q, &t);
        let f0 = asm.member_t[m].transpose() * f0_local;

        let dofs = member_dofs(data, m);
        let pd = gather(&data.prescribed, &dofs);
        let fpd = asm.member_k[m] * pd;

        for (i, &dof) in dofs.iter().enumerate() {
            if let Some(e) = asm.dofs.equation(dof) {
                f[e] += f0[i] - fpd[i];
            }
        }
        member_f0.push(f0);
    }

    let u_free = &asm.inverse * &f;

    let mut u = data.prescribed.clone();
    for (dof, value) in u.iter_mut().enumerate() {
        if let Some(e) = asm.dofs.equation(dof) {
            *value = u_free[e];
        }
    }

    // Member end forces and nodal accumulation
    let mut acc = vec![0.0; n_dofs];
    let mut member_forces = Vec::with_capacity(n_members);
    let mut member_displacements = Vec::with_capacity(n_members);
    let mut diagrams = Vec::with_capacity(n_members);

    for m in 0..n_members {
        let dofs = member_dofs(data, m);
        let ue = gather(&u, &dofs);
        let fe = asm.member_k[m] * ue - member_f0[m];
        for (i, &dof) in dofs.iter().enumerate() {
            acc[dof] += fe[i];
        }

        let t = &asm.member_t[m];
        let u_local = t * ue;
        let f_local = t * fe;

        diagrams.push(internal::evaluate(
            &data.member_props(m),
            asm.cases[m],
            &data.local_load(case, m),
            &data.thermal_state(case, m),
            &f_local,
            &u_local,
            options,
        ));
        member_forces.push(MemberEndForces::new(std::array::from_fn(|i| f_local[i])));
        member_displacements.push(std::array::from_fn(|i| u_local[i]));
    }

    let mut reactions = Vec::with_capacity(data.num_nodes());
    let mut node_displacements = Vec::with_capacity(data.num_nodes());
    for (n, &skew) in asm.skews.iter().enumerate() {
        let mut r = [0.0; 3];
        for (i, value) in r.iter_mut().enumerate() {
            let dof = 3 * n + i;
            if data.restraints[dof] || data.springs[dof] != 0.0 {
                *value = acc[dof] - fn_dof[dof];
            }
        }
        reactions.push(Reactions::from_array(r));

        let d = [u[3 * n], u[3 * n + 1], u[3 * n + 2]];
        node_displacements.push(NodeDisplacement::from_array(to_global_frame(skew, d)));
    }

    let results = LoadCaseResults {
        name: data.case_names[case].clone(),
        node_displacements,
        reactions,
        member_forces,
        member_displacements,
        diagrams,
    };

    let max_disp = results
        .node_displacements
        .iter()
        .fold(0.0_f64, |acc, d| acc.max(d.translation_magnitude()));
    if options.log {
        info!("Load case '{}': max displacement {:.6e}", results.name, max_disp);
    } else {
        debug!("Load case '{}': max displacement {:.6e}", results.name, max_disp);
    }

    if options.check_statics {
        check_statics(data, case, &results, options);
    }

    Ok(results)
}

/// Log the force balance of a solved load case
fn check_statics(data: &ModelData, case: usize, results: &LoadCaseResults, options: &AnalysisOptions) {
    let residual = results.equilibrium_residual(data, case);

    // Scale by the largest applied load
    let mut scale: f64 = 1.0;
    for chunk in data.nodal_forces[case].chunks(3) {
        scale = scale.max(chunk[0].abs()).max(chunk[1].abs());
    }
    for m in 0..data.num_members() {
        let q = data.local_load(case, m);
        let l = data.length(m);
        scale = scale
            .max((q.qx0.abs() + q.qx1.abs()) * l)
            .max((q.qy0.abs() + q.qy1.abs()) * l);
    }

    let error = residual[0].hypot(residual[1]) / scale;
    if error > options.statics_tolerance {
        warn!(
            "Load case '{}' out of equilibrium: residual [{:.3e}, {:.3e}]",
            results.name, residual[0], residual[1]
        );
    } else {
        debug!("Load case '{}' statics check passed ({:.3e})", results.name, error);
    }
}
