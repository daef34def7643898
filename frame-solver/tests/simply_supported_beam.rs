//! Simply supported beam under a uniform transverse load
//!
//! Span L = 100, E = 2380, solid circular section of diameter 20, pinned at
//! the start and on a roller at the end, loaded with q = -1 in local axes.

use approx::assert_relative_eq;
use frame_solver::prelude::*;

const L: f64 = 100.0;
const E: f64 = 2380.0;
const Q: f64 = -1.0;

fn build_beam() -> (StructureModel, usize, LoadCaseId) {
    let mut model = StructureModel::new();
    let mat = model.add_material(Material::new("Test", E, 1.2e-5));
    let sec = model.add_section(Section::circle(20.0, 0.0));

    let n1 = model.add_node(0.0, 0.0).unwrap();
    let n2 = model.add_node(L, 0.0).unwrap();
    let beam = model.add_member(n1, n2, mat, sec).unwrap();

    model
        .set_support(n1, Support::with_restraints(true, true, false))
        .unwrap();
    model
        .set_support(n2, Support::with_restraints(false, true, false))
        .unwrap();

    let case = model.load_case_id("Case 1").unwrap();
    model
        .set_distributed_load(beam, case, DistributedLoad::uniform_local(Q))
        .unwrap();

    model.analyze().unwrap();
    (model, beam, case)
}

fn inertia() -> f64 {
    std::f64::consts::PI * 20.0_f64.powi(4) / 64.0
}

#[test]
fn test_reactions_share_the_load() {
    let (model, _, case) = build_beam();

    for node in 0..2 {
        let rxn = model.node_reactions(node, case).unwrap();
        assert_relative_eq!(rxn.fy, -Q * L / 2.0, max_relative = 1e-9);
        assert_relative_eq!(rxn.fx, 0.0, epsilon = 1e-9);
        assert_eq!(rxn.mz, 0.0);
    }
}

#[test]
fn test_midspan_moment() {
    let (model, beam, case) = build_beam();
    let diagram = model.member_diagram(beam, case).unwrap();

    // Sagging positive: |M| = |q| L^2 / 8 with tension at the bottom fiber
    let expected = -Q * L * L / 8.0;
    assert_relative_eq!(
        diagram.value_at(DiagramField::Moment, L / 2.0),
        expected,
        max_relative = 1e-4
    );
    assert!(diagram.max_abs(DiagramField::Moment) <= expected * (1.0 + 1e-9));

    // Zero moment at both hinged supports
    assert_relative_eq!(diagram.moment[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(*diagram.moment.last().unwrap(), 0.0, epsilon = 1e-6);
}

#[test]
fn test_moment_extremum_at_midpoint_sample() {
    let (model, beam, case) = build_beam();
    let diagram = model.member_diagram(beam, case).unwrap();

    // max(1.5 L, 25) samples
    assert_eq!(diagram.num_points(), 150);

    let index = diagram.moment_max[0].expect("moment extremum inside the span");
    let midpoint = (diagram.num_points() - 1) as f64 / 2.0;
    assert!((index as f64 - midpoint).abs() <= 0.5);

    assert_eq!(diagram.moment_max[1], None);
    assert_eq!(diagram.moment_max_sentinel()[1], -1);
    assert_eq!(diagram.shear_max_sentinel(), -1);
}

#[test]
fn test_deflection_and_end_rotations() {
    let (model, beam, case) = build_beam();
    let ei = E * inertia();
    let diagram = model.member_diagram(beam, case).unwrap();

    let midspan = 5.0 * Q * L.powi(4) / (384.0 * ei);
    assert_relative_eq!(
        diagram.value_at(DiagramField::Uy, L / 2.0),
        midspan,
        max_relative = 1e-3
    );

    let theta = Q * L.powi(3) / (24.0 * ei);
    let start = model.node_displacement(0, case).unwrap();
    let end = model.node_displacement(1, case).unwrap();
    assert_relative_eq!(start.rz, theta, max_relative = 1e-9);
    assert_relative_eq!(end.rz, -theta, max_relative = 1e-9);
    assert_relative_eq!(diagram.rz[0], theta, max_relative = 1e-9);
}

#[test]
fn test_shear_is_linear_through_zero() {
    let (model, beam, case) = build_beam();
    let diagram = model.member_diagram(beam, case).unwrap();
    let forces = model.member_forces(beam, case).unwrap();

    assert_relative_eq!(diagram.shear[0], forces.start().shear, epsilon = 1e-12);
    assert_relative_eq!(diagram.shear[0], -Q * L / 2.0, max_relative = 1e-9);
    assert_relative_eq!(
        *diagram.shear.last().unwrap(),
        Q * L / 2.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(diagram.value_at(DiagramField::Shear, L / 2.0), 0.0, epsilon = 1e-9);
}

#[test]
fn test_results_export() {
    let (model, _, _) = build_beam();
    let json = model.results().unwrap().to_json().unwrap();
    assert!(json.contains("\"moment_max\""));
    assert!(json.contains("\"Case 1\""));
}
