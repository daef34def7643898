//! Mathematical utilities for 2D frame calculations
//!
//! Member vectors and matrices use the DOF order
//! `[ux_start, uy_start, rz_start, ux_end, uy_end, rz_end]`.

use nalgebra::{DMatrix, DVector, SMatrix, SVector};
use serde::{Deserialize, Serialize};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

/// 6x6 matrix for member stiffness and rotations
pub type Mat6 = SMatrix<f64, 6, 6>;
/// 6-element vector for member end forces/displacements
pub type Vec6 = SVector<f64, 6>;

/// Moment release configuration of a member after hinge resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HingeCase {
    /// Both ends moment-continuous
    Fixed,
    /// Moment released at the start node
    StartReleased,
    /// Moment released at the end node
    EndReleased,
    /// Moment released at both ends (axial bar)
    BothReleased,
}

impl HingeCase {
    /// Select the case from the start/end hinge flags
    pub fn from_flags(start: bool, end: bool) -> Self {
        match (start, end) {
            (false, false) => Self::Fixed,
            (true, false) => Self::StartReleased,
            (false, true) => Self::EndReleased,
            (true, true) => Self::BothReleased,
        }
    }

    /// Whether the start end transmits no moment
    pub fn start_released(self) -> bool {
        matches!(self, Self::StartReleased | Self::BothReleased)
    }
}

/// Member section and material constants needed by the element formulas
#[derive(Debug, Clone, Copy)]
pub struct MemberProps {
    pub e: f64,
    pub a: f64,
    pub i: f64,
    pub length: f64,
}

/// Compute the local stiffness matrix of a 2D frame element
///
/// Released ends are condensed out in closed form: a released moment DOF
/// keeps a zero row and column.
pub fn local_stiffness(case: HingeCase, props: &MemberProps) -> Mat6 {
    let MemberProps { e, a, i, length: l } = *props;
    let ea_l = e * a / l;

    #[rustfmt::skip]
    let data = match case {
        HingeCase::Fixed => {
            let k1 = 12.0 * e * i / (l * l * l);
            let k2 = 6.0 * e * i / (l * l);
            let k3 = 4.0 * e * i / l;
            let k4 = 2.0 * e * i / l;
            [
                ea_l,  0.0,  0.0, -ea_l,  0.0,  0.0,
                0.0,   k1,   k2,   0.0,  -k1,   k2,
                0.0,   k2,   k3,   0.0,  -k2,   k4,
               -ea_l,  0.0,  0.0,  ea_l,  0.0,  0.0,
                0.0,  -k1,  -k2,   0.0,   k1,  -k2,
                0.0,   k2,   k4,   0.0,  -k2,   k3,
            ]
        }
        HingeCase::StartReleased => {
            let k1 = 3.0 * e * i / (l * l * l);
            let k2 = 3.0 * e * i / (l * l);
            let k3 = 3.0 * e * i / l;
            [
                ea_l,  0.0,  0.0, -ea_l,  0.0,  0.0,
                0.0,   k1,   0.0,  0.0,  -k1,   k2,
                0.0,   0.0,  0.0,  0.0,   0.0,  0.0,
               -ea_l,  0.0,  0.0,  ea_l,  0.0,  0.0,
                0.0,  -k1,   0.0,  0.0,   k1,  -k2,
                0.0,   k2,   0.0,  0.0,  -k2,   k3,
            ]
        }
        HingeCase::EndReleased => {
            let k1 = 3.0 * e * i / (l * l * l);
            let k2 = 3.0 * e * i / (l * l);
            let k3 = 3.0 * e * i / l;
            [
                ea_l,  0.0,  0.0, -ea_l,  0.0,  0.0,
                0.0,   k1,   k2,   0.0,  -k1,   0.0,
                0.0,   k2,   k3,   0.0,  -k2,   0.0,
               -ea_l,  0.0,  0.0,  ea_l,  0.0,  0.0,
                0.0,  -k1,  -k2,   0.0,   k1,   0.0,
                0.0,   0.0,  0.0,  0.0,   0.0,  0.0,
            ]
        }
        HingeCase::BothReleased => [
                ea_l,  0.0,  0.0, -ea_l,  0.0,  0.0,
                0.0,   0.0,  0.0,  0.0,   0.0,  0.0,
                0.0,   0.0,  0.0,  0.0,   0.0,  0.0,
               -ea_l,  0.0,  0.0,  ea_l,  0.0,  0.0,
                0.0,   0.0,  0.0,  0.0,   0.0,  0.0,
                0.0,   0.0,  0.0,  0.0,   0.0,  0.0,
        ],
    };

    Mat6::from_row_slice(&data)
}

/// Build a 6x6 block rotation from the start and end rotation angles
///
/// Each translational 2x2 block is `[[cos, sin], [-sin, cos]]`; the
/// rotational DOFs are unaffected.
pub fn block_rotation(start: (f64, f64), end: (f64, f64)) -> Mat6 {
    let (c1, s1) = start;
    let (c2, s2) = end;

    #[rustfmt::skip]
    let data = [
        c1,  s1,  0.0, 0.0, 0.0, 0.0,
       -s1,  c1,  0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, c2,  s2,  0.0,
        0.0, 0.0, 0.0, -s2, c2,  0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    ];

    Mat6::from_row_slice(&data)
}

/// Global-to-local rotation of a member with direction cosines `(cos, sin)`
pub fn member_rotation(cos: f64, sin: f64) -> Mat6 {
    block_rotation((cos, sin), (cos, sin))
}

/// Rotation accounting for skewed supports at the member ends
///
/// `theta_start`/`theta_end` are the per-node skew angles as returned by
/// [`skew_angle`].
pub fn skew_rotation(theta_start: f64, theta_end: f64) -> Mat6 {
    block_rotation(
        (theta_start.cos(), theta_start.sin()),
        (theta_end.cos(), theta_end.sin()),
    )
}

/// Skew angle of a node: minus the support angle when exactly one of the
/// two translations is restrained, zero otherwise
pub fn skew_angle(rx: bool, ry: bool, support_angle: f64) -> f64 {
    if rx ^ ry {
        -support_angle
    } else {
        0.0
    }
}

/// Local distributed load intensities `[qx0, qx1, qy0, qy1]` on a member
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalLoad {
    pub qx0: f64,
    pub qx1: f64,
    pub qy0: f64,
    pub qy1: f64,
}

/// Thermal state of a member: axial expansion and curvature drivers
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermalState {
    /// Thermal expansion coefficient
    pub alpha: f64,
    /// Temperature change at the centroid
    pub mean: f64,
    /// Top minus bottom temperature change
    pub gradient: f64,
    /// Section depth between the extreme fibers
    pub depth: f64,
}

impl ThermalState {
    /// Free thermal axial strain
    pub fn axial_strain(&self) -> f64 {
        self.alpha * self.mean
    }

    /// Free thermal curvature (a hotter top fiber curves the member downward)
    pub fn curvature(&self) -> f64 {
        if self.depth == 0.0 {
            0.0
        } else {
            -self.alpha * self.gradient / self.depth
        }
    }
}

/// Compute the equivalent nodal load vector of a linearly varying line load
///
/// # Arguments
/// * `case` - Hinge configuration of the member
/// * `q` - Local intensities
/// * `length` - Member length
pub fn distributed_fixed_end_forces(case: HingeCase, q: &LocalLoad, length: f64) -> Vec6 {
    let l = length;
    let l2 = l * l;
    let q0 = q.qy0;
    let dq = q.qy1 - q.qy0;

    let axial_start = (2.0 * q.qx0 + q.qx1) * l / 6.0;
    let axial_end = (2.0 * q.qx1 + q.qx0) * l / 6.0;

    match case {
        HingeCase::Fixed => Vec6::new(
            axial_start,
            q0 * l / 2.0 + 3.0 * dq * l / 20.0,
            q0 * l2 / 12.0 + dq * l2 / 30.0,
            axial_end,
            q0 * l / 2.0 + 7.0 * dq * l / 20.0,
            -q0 * l2 / 12.0 - dq * l2 / 20.0,
        ),
        HingeCase::StartReleased => Vec6::new(
            axial_start,
            3.0 * q0 * l / 8.0 + dq * l / 10.0,
            0.0,
            axial_end,
            5.0 * q0 * l / 8.0 + 2.0 * dq * l / 5.0,
            -q0 * l2 / 8.0 - dq * l2 / 15.0,
        ),
        HingeCase::EndReleased => Vec6::new(
            axial_start,
            5.0 * q0 * l / 8.0 + 9.0 * dq * l / 40.0,
            q0 * l2 / 8.0 + 7.0 * dq * l2 / 120.0,
            axial_end,
            3.0 * q0 * l / 8.0 + 11.0 * dq * l / 40.0,
            0.0,
        ),
        // Simple-beam reactions
        HingeCase::BothReleased => Vec6::new(
            axial_start,
            q0 * l / 2.0 + dq * l / 6.0,
            0.0,
            axial_end,
            q0 * l / 2.0 + dq * l / 3.0,
            0.0,
        ),
    }
}

/// Compute the equivalent nodal load vector of a temperature change
pub fn thermal_fixed_end_forces(case: HingeCase, props: &MemberProps, t: &ThermalState) -> Vec6 {
    let MemberProps { e, a, i, length: l } = *props;

    let n = e * a * t.axial_strain();
    // Moment that suppresses the free thermal curvature
    let m = -e * i * t.curvature();

    match case {
        HingeCase::Fixed => Vec6::new(-n, 0.0, m, n, 0.0, -m),
        HingeCase::StartReleased => Vec6::new(
            -n,
            -1.5 * m / l,
            0.0,
            n,
            1.5 * m / l,
            -1.5 * m,
        ),
        HingeCase::EndReleased => Vec6::new(
            -n,
            1.5 * m / l,
            1.5 * m,
            n,
            -1.5 * m / l,
            0.0,
        ),
        HingeCase::BothReleased => Vec6::new(-n, 0.0, 0.0, n, 0.0, 0.0),
    }
}

/// Total fixed-end force vector: distributed load plus thermal terms
pub fn fixed_end_forces(
    case: HingeCase,
    props: &MemberProps,
    q: &LocalLoad,
    t: &ThermalState,
) -> Vec6 {
    distributed_fixed_end_forces(case, q, props.length) + thermal_fixed_end_forces(case, props, t)
}

/// Smallest accepted ratio between the smallest and largest LU pivot
const SINGULAR_PIVOT_RATIO: f64 = 1e-13;

/// Invert a dense matrix, returning `None` when it is singular
///
/// Rigid-body modes rarely give exactly zero pivots in floating point, so
/// a pivot that is negligible next to the largest one counts as zero.
pub fn invert(k: &Mat) -> Option<Mat> {
    if k.nrows() == 0 {
        return Some(Mat::zeros(0, 0));
    }
    let lu = k.clone().lu();
    let pivots = lu.u().diagonal().map(|p| p.abs());
    let largest = pivots.max();
    if largest <= 0.0 || pivots.min() <= largest * SINGULAR_PIVOT_RATIO {
        return None;
    }
    lu.try_inverse()
}

/// Largest absolute asymmetry `|K[i,j] - K[j,i]|` of a square matrix
pub fn max_asymmetry(k: &Mat) -> f64 {
    let n = k.nrows();
    let mut worst = 0.0_f64;
    for i in 0..n {
        for j in (i + 1)..n {
            worst = worst.max((k[(i, j)] - k[(j, i)]).abs());
        }
    }
    worst
}
