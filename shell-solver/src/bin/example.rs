//! Shell Solver Example - Folded Composite Strip

use shell_solver::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Shell Solver Example: Folded Composite Strip ===\n");

    // Quasi-isotropic carbon/epoxy layup, 0.125 mm plies
    let plies = [0.0, 45.0, -45.0, 90.0, 90.0, -45.0, 45.0, 0.0]
        .iter()
        .map(|&deg| Ply::with_degrees(Material::carbon_epoxy(), 0.125, deg))
        .collect::<ShellResult<Vec<_>>>()?;
    let laminate = Laminate::new(plies);

    println!("Layup:\n{laminate}\n");
    println!("Total thickness: {:.3} mm\n", laminate.thickness());

    // Three rows of nodes, each row raised a little more than the last
    //
    //   N2 ---- N5 ---- N8
    //   |       |       |
    //   N1 ---- N4 ---- N7
    //   |       |       |
    //   N0 ---- N3 ---- N6
    //   ^ clamped       ^ loaded
    let mut structure = Structure::new();
    let rows = [(0.0, 0.0), (100.0, 10.0), (200.0, 30.0)];
    let mut nodes = Vec::new();
    for (x, z) in rows {
        for y in [0.0, 100.0, 200.0] {
            nodes.push(structure.add_node(x, y, z));
        }
    }

    // Fibres along global X
    let reference = Vec3::x();
    for (a, b, c, d) in [(0, 1, 4, 3), (1, 2, 5, 4), (3, 4, 7, 6), (4, 5, 8, 7)] {
        structure.add_element(ShellElement::new(
            [nodes[a], nodes[b], nodes[c], nodes[d]],
            reference,
            &laminate,
        ));
    }

    // Clamp the first row
    for id in &nodes[0..3] {
        structure.set_constraint(*id, Constraint::fixed())?;
    }

    // Downward load of 10 N on each far node
    for id in &nodes[6..9] {
        structure.set_force(*id, Force::fz(-10.0))?;
    }

    // Run analysis
    println!("Running linear analysis...\n");
    structure.solve()?;

    // Node displacements
    println!("Node Displacements:");
    for id in &nodes {
        let disp = structure.node_displacement(*id)?;
        println!(
            "  {}: DX={:.5}mm, DY={:.5}mm, DZ={:.5}mm, RX={:.6}rad, RY={:.6}rad",
            id, disp.dx, disp.dy, disp.dz, disp.rx, disp.ry
        );
    }

    // Element strains
    println!("\nElement Strains (material axes):");
    for index in 0..structure.elements().len() {
        let strain = structure.element_strain(ElementId(index))?;
        let (e1, e2) = strain.principal_membrane();
        println!(
            "  E{}: exx={:.3e}, eyy={:.3e}, gxy={:.3e}, kxx={:.3e}, kyy={:.3e}, e1={:.3e}, e2={:.3e}",
            index,
            strain.membrane[0],
            strain.membrane[1],
            strain.membrane[2],
            strain.curvature[0],
            strain.curvature[1],
            e1,
            e2
        );
    }

    // Summary
    let summary = structure.summary()?;
    println!("\nSummary:");
    println!("  Nodes: {} ({} active)", summary.num_nodes, summary.num_active_nodes);
    println!("  Elements: {}", summary.num_elements);
    println!("  Free DOFs: {} of {}", summary.free_dofs, summary.total_dofs);
    if let Some(node) = summary.max_disp_node {
        println!("  Max displacement: {:.5}mm at {}", summary.max_displacement, node);
    }

    println!("\n=== Analysis Complete ===");
    Ok(())
}
