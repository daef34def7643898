//! Support variants (skewed, elastic, displaced), internal hinges and
//! thermal loading checked against closed-form beam results

use approx::{assert_abs_diff_eq, assert_relative_eq};
use frame_solver::prelude::*;
use std::f64::consts::FRAC_PI_2;

const L: f64 = 8.0;

/// Horizontal beam from (0, 0) to (L, 0)
fn beam_model(start: Support, end: Support) -> (StructureModel, usize, LoadCaseId) {
    let mut model = StructureModel::new();
    let steel = model.add_material(Material::steel());
    let sec = model.add_section(Section::rectangle(0.25, 0.5));
    let n1 = model.add_node(0.0, 0.0).unwrap();
    let n2 = model.add_node(L, 0.0).unwrap();
    let beam = model.add_member(n1, n2, steel, sec).unwrap();
    model.set_support(n1, start).unwrap();
    model.set_support(n2, end).unwrap();
    let case = model.load_case_id("Case 1").unwrap();
    (model, beam, case)
}

fn flexural_rigidity(model: &StructureModel) -> f64 {
    model.materials[0].elasticity * model.sections[0].inertia
}

#[test]
fn test_skewed_roller_matches_plain_roller() {
    let load = DistributedLoad::uniform_local(-10.0);

    let (mut plain, beam, case) = beam_model(Support::pinned(), Support::roller_y());
    plain.set_distributed_load(beam, case, load).unwrap();
    plain.analyze().unwrap();

    // Restraining the support-frame X axis turned a quarter turn is a
    // vertical roller
    let skewed_support = Support::with_restraints(true, false, false).with_angle(FRAC_PI_2);
    let (mut skewed, beam, case) = beam_model(Support::pinned(), skewed_support);
    skewed.set_distributed_load(beam, case, load).unwrap();
    skewed.analyze().unwrap();

    for node in 0..2 {
        let a = plain.node_displacement(node, case).unwrap();
        let b = skewed.node_displacement(node, case).unwrap();
        assert_abs_diff_eq!(a.ux, b.ux, epsilon = 1e-12);
        assert_abs_diff_eq!(a.uy, b.uy, epsilon = 1e-12);
        assert_abs_diff_eq!(a.rz, b.rz, epsilon = 1e-12);
    }

    // Reaction reported along the restrained support axis
    let rxn = skewed.node_reactions(1, case).unwrap();
    assert_relative_eq!(rxn.fx, 40.0, max_relative = 1e-9);
    assert_abs_diff_eq!(rxn.fy, 0.0, epsilon = 1e-12);

    let global = rxn.to_global(-FRAC_PI_2);
    assert_abs_diff_eq!(global.fx, 0.0, epsilon = 1e-9);
    assert_relative_eq!(global.fy, 40.0, max_relative = 1e-9);

    let [fx, fy] = skewed.equilibrium_residual(case).unwrap();
    assert_abs_diff_eq!(fx, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(fy, 0.0, epsilon = 1e-9);
}

#[test]
fn test_support_settlement_of_propped_cantilever() {
    let delta = 0.01;
    let (mut model, beam, case) = beam_model(
        Support::fixed(),
        Support::pinned().with_prescribed(0.0, -delta, 0.0),
    );
    model.analyze().unwrap();
    let ei = flexural_rigidity(&model);

    let end = model.node_displacement(1, case).unwrap();
    assert_relative_eq!(end.uy, -delta, max_relative = 1e-12);

    let shear = 3.0 * ei * delta / L.powi(3);
    let root = model.node_reactions(0, case).unwrap();
    let tip = model.node_reactions(1, case).unwrap();
    assert_relative_eq!(root.fy, shear, max_relative = 1e-9);
    assert_relative_eq!(tip.fy, -shear, max_relative = 1e-9);
    assert_relative_eq!(root.mz.abs(), 3.0 * ei * delta / (L * L), max_relative = 1e-9);

    // Member end forces only reflect the imposed deformation
    let d = model.member_diagram(beam, case).unwrap();
    assert_relative_eq!(d.moment[0].abs(), 3.0 * ei * delta / (L * L), max_relative = 1e-9);
    assert_abs_diff_eq!(*d.moment.last().unwrap(), 0.0, epsilon = 1e-6);
    assert_relative_eq!(*d.uy.last().unwrap(), -delta, max_relative = 1e-9);
}

#[test]
fn test_settlement_along_skewed_roller_axis() {
    let delta = 0.01;
    // Support frame X is global Y, so the settlement is vertical
    let settled = Support::with_restraints(true, false, false)
        .with_angle(FRAC_PI_2)
        .with_prescribed(-delta, 0.0, 0.0);
    let (mut model, beam, case) = beam_model(Support::fixed(), settled);
    model.analyze().unwrap();
    let ei = flexural_rigidity(&model);

    let end = model.node_displacement(1, case).unwrap();
    assert_relative_eq!(end.uy, -delta, max_relative = 1e-12);
    assert_abs_diff_eq!(end.ux, 0.0, epsilon = 1e-12);

    let shear = 3.0 * ei * delta / L.powi(3);
    let root = model.node_reactions(0, case).unwrap();
    let tip = model.node_reactions(1, case).unwrap();
    assert_relative_eq!(root.fy, shear, max_relative = 1e-9);
    assert_relative_eq!(tip.fx, -shear, max_relative = 1e-9);
    assert_eq!(tip.fy, 0.0);
    assert_relative_eq!(tip.to_global(-FRAC_PI_2).fy, -shear, max_relative = 1e-9);

    let d = model.member_diagram(beam, case).unwrap();
    assert_relative_eq!(*d.uy.last().unwrap(), -delta, max_relative = 1e-9);
    assert_abs_diff_eq!(*d.moment.last().unwrap(), 0.0, epsilon = 1e-6);

    let [fx, fy] = model.equilibrium_residual(case).unwrap();
    assert_abs_diff_eq!(fx, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(fy, 0.0, epsilon = 1e-9);
}

#[test]
fn test_spring_supported_cantilever_tip() {
    let (p, k) = (-20.0, 2.0e4);
    let (mut model, _, case) = beam_model(
        Support::fixed(),
        Support::free().with_springs(0.0, k, 0.0),
    );
    model.set_nodal_force(1, case, NodalForce::fy(p)).unwrap();
    model.analyze().unwrap();
    let ei = flexural_rigidity(&model);

    let expected = p / (k + 3.0 * ei / L.powi(3));
    let tip = model.node_displacement(1, case).unwrap();
    assert_relative_eq!(tip.uy, expected, max_relative = 1e-9);

    let spring = model.node_reactions(1, case).unwrap();
    assert_relative_eq!(spring.fy, -k * tip.uy, max_relative = 1e-9);
    assert_eq!(spring.fx, 0.0);

    let [_, fy] = model.equilibrium_residual(case).unwrap();
    assert_abs_diff_eq!(fy, 0.0, epsilon = 1e-9);
}

#[test]
fn test_internal_hinge_transfers_shear_only() {
    let w = 6.0;
    let mut model = StructureModel::new();
    let steel = model.add_material(Material::steel());
    let sec = model.add_section(Section::rectangle(0.25, 0.5));
    let n0 = model.add_node(0.0, 0.0).unwrap();
    let n1 = model.add_node(L, 0.0).unwrap();
    let n2 = model.add_node(2.0 * L, 0.0).unwrap();
    let cantilever = model.add_member(n0, n1, steel, sec).unwrap();
    let suspended = model.add_member(n1, n2, steel, sec).unwrap();
    model.set_support(n0, Support::fixed()).unwrap();
    model.set_support(n2, Support::roller_y()).unwrap();
    model.set_node_hinge(n1, true).unwrap();
    let case = model.load_case_id("Case 1").unwrap();
    model
        .set_distributed_load(suspended, case, DistributedLoad::uniform_global_y(-w))
        .unwrap();
    model.analyze().unwrap();

    // The suspended span is simply supported on the hinge and the roller
    let roller = model.node_reactions(n2, case).unwrap();
    assert_relative_eq!(roller.fy, w * L / 2.0, max_relative = 1e-9);

    let root = model.node_reactions(n0, case).unwrap();
    assert_relative_eq!(root.fy, w * L / 2.0, max_relative = 1e-9);
    assert_relative_eq!(root.mz, w * L * L / 2.0, max_relative = 1e-9);

    let hinge_side = model.member_diagram(suspended, case).unwrap();
    assert_abs_diff_eq!(hinge_side.moment[0], 0.0, epsilon = 1e-9);
    let peak = hinge_side.moment_max[0].map(|i| hinge_side.moment[i]).unwrap();
    assert_relative_eq!(peak, w * L * L / 8.0, max_relative = 1e-3);

    // Both members meet at the same deflected point but with a kink
    let left = model.member_diagram(cantilever, case).unwrap();
    assert_relative_eq!(*left.uy.last().unwrap(), hinge_side.uy[0], max_relative = 1e-9);
    assert!((left.rz.last().unwrap() - hinge_side.rz[0]).abs() > 1e-6);
}

#[test]
fn test_restrained_beam_uniform_heating() {
    let t = 25.0;
    let mut model = StructureModel::new();
    let steel = model.add_material(Material::steel());
    let sec = model.add_section(Section::rectangle(0.25, 0.5));
    let n0 = model.add_node(0.0, 0.0).unwrap();
    let n1 = model.add_node(L, 0.0).unwrap();
    let n2 = model.add_node(2.0 * L, 0.0).unwrap();
    let a = model.add_member(n0, n1, steel, sec).unwrap();
    let b = model.add_member(n1, n2, steel, sec).unwrap();
    model.set_support(n0, Support::fixed()).unwrap();
    model.set_support(n2, Support::fixed()).unwrap();
    let case = model.load_case_id("Case 1").unwrap();
    for m in [a, b] {
        model
            .set_temperature(m, case, Temperature::new(t + 10.0, t - 10.0))
            .unwrap();
    }
    model.analyze().unwrap();

    let material = &model.materials[steel];
    let section = &model.sections[sec];
    let axial = -material.elasticity * section.area * material.thermal * t;
    let moment = material.elasticity * section.inertia * material.thermal * 20.0 / section.depth();

    for m in [a, b] {
        let d = model.member_diagram(m, case).unwrap();
        for i in 0..d.num_points() {
            assert_relative_eq!(d.axial[i], axial, max_relative = 1e-9);
            assert_relative_eq!(d.moment[i], moment, max_relative = 1e-9);
            assert_abs_diff_eq!(d.uy[i], 0.0, epsilon = 1e-12);
        }
    }
    let mid = model.node_displacement(n1, case).unwrap();
    assert_abs_diff_eq!(mid.ux, 0.0, epsilon = 1e-12);
}

#[test]
fn test_simple_beam_thermal_gradient() {
    let (top, bottom) = (30.0, 10.0);
    let (mut model, beam, case) = beam_model(Support::pinned(), Support::roller_y());
    model
        .set_temperature(beam, case, Temperature::new(top, bottom))
        .unwrap();
    model.analyze().unwrap();

    let alpha = model.materials[0].thermal;
    let depth = model.sections[0].depth();
    let curvature = -alpha * (top - bottom) / depth;

    // Statically determinate: free thermal deformation, no internal forces
    let d = model.member_diagram(beam, case).unwrap();
    assert!(d.max_abs(DiagramField::Moment) < 1e-9);
    assert!(d.max_abs(DiagramField::Axial) < 1e-9);

    let mid = d.value_at(DiagramField::Uy, L / 2.0);
    assert_relative_eq!(mid, -curvature * L * L / 8.0, max_relative = 1e-3);

    let end = model.node_displacement(1, case).unwrap();
    assert_relative_eq!(end.ux, alpha * (top + bottom) / 2.0 * L, max_relative = 1e-9);
}
