//! Internal force and displacement fields along members
//!
//! Fields are closed-form polynomials in `x`, measured from the start node
//! along the member's local axis, built from the local end forces `F` and
//! end displacements `U` of the member.

use crate::math::{HingeCase, LocalLoad, MemberProps, ThermalState, Vec6};
use crate::results::MemberDiagram;

use super::AnalysisOptions;

/// Polynomial fields of one member under one load case
#[derive(Debug, Clone, Copy)]
pub struct MemberField {
    length: f64,
    ea: f64,
    ei: f64,
    q: LocalLoad,
    /// Free thermal axial strain
    strain: f64,
    /// Free thermal curvature
    curvature: f64,
    f: [f64; 3],
    /// Start displacements `[ux, uy]`
    u0: [f64; 2],
    /// Rotation of the member at its start
    theta0: f64,
}

impl MemberField {
    pub fn new(
        props: &MemberProps,
        case: HingeCase,
        q: &LocalLoad,
        thermal: &ThermalState,
        f: &Vec6,
        u: &Vec6,
    ) -> Self {
        let mut field = Self {
            length: props.length,
            ea: props.e * props.a,
            ei: props.e * props.i,
            q: *q,
            strain: thermal.axial_strain(),
            curvature: thermal.curvature(),
            f: [f[0], f[1], f[2]],
            u0: [u[0], u[1]],
            theta0: u[2],
        };

        // A released start does not follow the node rotation; recover it
        // from the transverse displacement of the far end
        if case.start_released() {
            let l = field.length;
            let thermal_sag = field.curvature * l * l / 2.0;
            field.theta0 = (u[4] - u[1] - field.bending_deflection(l) - thermal_sag) / l;
        }
        field
    }

    fn dq(&self) -> f64 {
        self.q.qy1 - self.q.qy0
    }

    fn dqx(&self) -> f64 {
        self.q.qx1 - self.q.qx0
    }

    /// Axial force (positive = tension)
    pub fn axial(&self, x: f64) -> f64 {
        let l = self.length;
        -self.f[0] - (2.0 * self.q.qx0 + self.dqx() * x / l) * x / 2.0
    }

    pub fn shear(&self, x: f64) -> f64 {
        let l = self.length;
        self.f[1] + self.q.qy0 * x + self.dq() * x * x / (2.0 * l)
    }

    pub fn moment(&self, x: f64) -> f64 {
        let l = self.length;
        -self.f[2] + self.f[1] * x + self.q.qy0 * x * x / 2.0 + self.dq() * x.powi(3) / (6.0 * l)
    }

    /// Integral of `M/EI` from the start
    ///
    /// Zero for a member without flexural rigidity, which can only be an
    /// axial bar with both ends released; it then follows its chord.
    fn bending_rotation(&self, x: f64) -> f64 {
        if self.ei == 0.0 {
            return 0.0;
        }
        let l = self.length;
        (-self.f[2] * x
            + self.f[1] * x * x / 2.0
            + self.q.qy0 * x.powi(3) / 6.0
            + self.dq() * x.powi(4) / (24.0 * l))
            / self.ei
    }

    /// Double integral of `M/EI` from the start
    fn bending_deflection(&self, x: f64) -> f64 {
        if self.ei == 0.0 {
            return 0.0;
        }
        let l = self.length;
        (-self.f[2] * x * x / 2.0
            + self.f[1] * x.powi(3) / 6.0
            + self.q.qy0 * x.powi(4) / 24.0
            + self.dq() * x.powi(5) / (120.0 * l))
            / self.ei
    }

    pub fn rotation(&self, x: f64) -> f64 {
        self.bending_rotation(x) + self.curvature * x + self.theta0
    }

    /// Transverse displacement in local axes
    pub fn uy(&self, x: f64) -> f64 {
        self.bending_deflection(x) + self.curvature * x * x / 2.0 + self.theta0 * x + self.u0[1]
    }

    /// Axial displacement in local axes
    pub fn ux(&self, x: f64) -> f64 {
        let l = self.length;
        (-self.f[0] * x - self.q.qx0 * x * x / 2.0 - self.dqx() * x.powi(3) / (6.0 * l)) / self.ea
            + self.strain * x
            + self.u0[0]
    }

    /// Positions of moment extrema and the shear extremum, inside `[0, L]`
    ///
    /// Returns `([moment_0, moment_1], shear)`.
    pub fn extrema(&self, tolerance: f64) -> ([Option<f64>; 2], Option<f64>) {
        let l = self.length;
        let inside = |x: f64| (x.is_finite() && (0.0..=l).contains(&x)).then_some(x);
        let (qy0, qy1) = (self.q.qy0, self.q.qy1);

        if (qy0 - qy1).abs() < tolerance {
            // Uniform load: linear shear, one moment stationary point
            return ([inside(-self.f[1] / qy0), None], None);
        }

        let dq = self.dq();
        let shear = inside(qy0 * l / (qy0 - qy1));

        let disc = l * l * qy0 * qy0 - 2.0 * l * dq * self.f[1];
        if disc < 0.0 {
            return ([None, None], shear);
        }
        let root = disc.sqrt();
        let x0 = (-l * qy0 + root) / dq;
        let x1 = (-l * qy0 - root) / dq;
        ([inside(x0), inside(x1)], shear)
    }
}

/// Nearest sample index of a position along a member
pub fn sample_index(x: f64, length: f64, num_points: usize) -> usize {
    let last = num_points.saturating_sub(1);
    ((x / length * last as f64).round() as usize).min(last)
}

/// Sample every field of a member and locate the diagram extrema
pub fn evaluate(
    props: &MemberProps,
    case: HingeCase,
    q: &LocalLoad,
    thermal: &ThermalState,
    f: &Vec6,
    u: &Vec6,
    options: &AnalysisOptions,
) -> MemberDiagram {
    let field = MemberField::new(props, case, q, thermal, f, u);
    let l = props.length;
    let n = options.num_samples(l);

    let x: Vec<f64> = (0..n).map(|i| i as f64 * l / (n - 1) as f64).collect();

    let (moments, shear) = field.extrema(options.load_tolerance);
    let index = |pos: Option<f64>| pos.map(|p| sample_index(p, l, n));

    MemberDiagram {
        axial: x.iter().map(|&x| field.axial(x)).collect(),
        shear: x.iter().map(|&x| field.shear(x)).collect(),
        moment: x.iter().map(|&x| field.moment(x)).collect(),
        ux: x.iter().map(|&x| field.ux(x)).collect(),
        uy: x.iter().map(|&x| field.uy(x)).collect(),
        rz: x.iter().map(|&x| field.rotation(x)).collect(),
        moment_max: [index(moments[0]), index(moments[1])],
        shear_max: index(shear),
        x,
    }
}
