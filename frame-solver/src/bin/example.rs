//! Frame Solver Example - Simple Portal Frame

use frame_solver::prelude::*;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Frame Solver Example: Portal Frame ===\n");

    // Create a new model (units: kN, m)
    let mut model = StructureModel::new();

    let steel = model.add_material(Material::steel());
    let column = model.add_section(Section::rectangle(0.3, 0.3).named("Column"));
    let girder = model.add_section(Section::rectangle(0.3, 0.6).named("Girder"));

    // Create a simple portal frame
    //
    //     N3 -------- N4
    //     |          |
    //     |          |
    //     |          |
    //     N1        N2
    //     ^          ^
    //   Fixed     Pinned
    //
    let height = 4.0;
    let span = 6.0;

    let n1 = model.add_node(0.0, 0.0)?;
    let n2 = model.add_node(span, 0.0)?;
    let n3 = model.add_node(0.0, height)?;
    let n4 = model.add_node(span, height)?;

    let col1 = model.add_member(n1, n3, steel, column)?;
    let col2 = model.add_member(n2, n4, steel, column)?;
    let beam = model.add_member(n3, n4, steel, girder)?;

    model.set_support(n1, Support::fixed())?;
    model.set_support(n2, Support::pinned())?;

    // Dead load case: 20 kN/m on the beam and 10 kN lateral at roof level
    let dead = model.load_case_id("Case 1")?;
    model.rename_load_case(dead, "Dead")?;
    model.set_distributed_load(beam, dead, DistributedLoad::uniform_global_y(-20.0))?;
    model.set_nodal_force(n3, dead, NodalForce::fx(10.0))?;

    // Thermal load case: beam top heated by 30 degrees
    let thermal = model.add_load_case("Thermal")?;
    model.set_temperature(beam, thermal, Temperature::new(30.0, 0.0))?;

    println!("Running linear analysis...\n");
    model.analyze_with(AnalysisOptions::default().with_statics_check(1e-6))?;

    for (case, name) in model.load_case_names().iter().enumerate() {
        let case = LoadCaseId(case);
        println!("=== Results for {} ===\n", name);

        println!("Node Displacements:");
        for (label, node) in [("N1", n1), ("N2", n2), ("N3", n3), ("N4", n4)] {
            let disp = model.node_displacement(node, case)?;
            println!(
                "  {}: UX={:.4}mm, UY={:.4}mm, RZ={:.6}rad",
                label,
                disp.ux * 1000.0,
                disp.uy * 1000.0,
                disp.rz
            );
        }

        println!("\nSupport Reactions:");
        for (label, node) in [("N1", n1), ("N2", n2)] {
            let rxn = model.node_reactions(node, case)?;
            println!(
                "  {}: FX={:.2}kN, FY={:.2}kN, MZ={:.2}kN·m",
                label, rxn.fx, rxn.fy, rxn.mz
            );
        }

        println!("\nMember Forces:");
        for (label, member) in [("Col1", col1), ("Col2", col2), ("Beam", beam)] {
            let diagram = model.member_diagram(member, case)?;
            println!(
                "  {}: Nmax={:.2}kN, Vmax={:.2}kN, Mmax={:.2}kN·m",
                label,
                diagram.max_abs(DiagramField::Axial),
                diagram.max_abs(DiagramField::Shear),
                diagram.max_abs(DiagramField::Moment)
            );
        }

        let summary = model.summary(case)?;
        info!("Summary for {}: {:?}", name, summary);
        let [rx, ry] = model.equilibrium_residual(case)?;
        println!("\nEquilibrium residual: [{:.3e}, {:.3e}]\n", rx, ry);
    }

    println!("=== Results (JSON) ===\n");
    println!("{}", model.results()?.to_json()?);

    Ok(())
}
