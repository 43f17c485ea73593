//! Structure - node arena, shell elements, assembly and linear solve

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::analysis::SolverOptions;
use crate::elements::{
    Constraint, DofSlot, ElementId, Node, NodeId, ShellElement, ShellFormulation,
    DOFS_PER_ELEMENT, DOFS_PER_NODE,
};
use crate::error::{ShellError, ShellResult};
use crate::loads::Force;
use crate::math::{self, Mat, Vec20, Vector, WeakPivot};
use crate::results::{AnalysisSummary, ElementStrain, NodeDisplacement, UnconstrainedDof};

/// Global system of the last successful assembly
#[derive(Debug, Clone)]
struct Assembly {
    /// Nodes referenced by at least one element, first-seen order
    unique_nodes: Vec<NodeId>,
    /// Owner of every global equation
    dof_owners: Vec<(NodeId, DofSlot)>,
    formulations: Vec<ShellFormulation>,
    stiffness: Mat,
    forces: Option<Vector>,
}

#[derive(Debug, Clone)]
struct Solution {
    displacements: Vector,
    strains: Vec<ElementStrain>,
}

/// A shell structure
///
/// Nodes are stored in an arena and shared between elements through their
/// [`NodeId`]. Numbering, element formulation and assembly are derived from
/// scratch by every assembly call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Structure {
    nodes: Vec<Node>,
    elements: Vec<ShellElement>,

    #[serde(skip)]
    assembly: Option<Assembly>,

    #[serde(skip)]
    solution: Option<Solution>,
}

impl Structure {
    /// Create a new empty structure
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a free, unloaded node and return its handle
    pub fn add_node(&mut self, x: f64, y: f64, z: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, x, y, z));
        id
    }

    pub fn node(&self, id: NodeId) -> ShellResult<&Node> {
        self.nodes.get(id.0).ok_or(ShellError::NodeNotFound(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> ShellResult<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(ShellError::NodeNotFound(id))
    }

    /// All nodes, including those no element references
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Replace the constraint of a node
    pub fn set_constraint(&mut self, id: NodeId, constraint: Constraint) -> ShellResult<()> {
        self.node_mut(id)?.constraint = constraint;
        Ok(())
    }

    /// Replace the load of a node
    pub fn set_force(&mut self, id: NodeId, force: Force) -> ShellResult<()> {
        self.node_mut(id)?.force = force;
        Ok(())
    }

    /// Register an element; node handles are checked at assembly time
    pub fn add_element(&mut self, element: ShellElement) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> ShellResult<&ShellElement> {
        self.elements
            .get(id.0)
            .ok_or(ShellError::ElementNotFound(id.0))
    }

    pub fn elements(&self) -> &[ShellElement] {
        &self.elements
    }

    /// Nodes referenced by at least one element, deduplicated, in
    /// first-encounter order
    pub fn unique_nodes(&self) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.elements
            .iter()
            .flat_map(|e| e.nodes().iter().copied())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    // ========================
    // Assembly
    // ========================

    /// Assign global equation numbers to the free slots of the active nodes
    fn number_dofs(&mut self, unique_nodes: &[NodeId]) -> ShellResult<Vec<(NodeId, DofSlot)>> {
        if let Some(missing) = unique_nodes.iter().find(|id| id.0 >= self.nodes.len()) {
            return Err(ShellError::NodeNotFound(*missing));
        }

        for node in &mut self.nodes {
            node.dof_numbers = [None; DOFS_PER_NODE];
        }

        let mut dof_owners = Vec::new();
        for &id in unique_nodes {
            let node = &mut self.nodes[id.0];
            let start = dof_owners.len();
            let next = node.enumerate_dofs(start);
            dof_owners.extend(
                DofSlot::ALL
                    .iter()
                    .filter(|slot| node.constraint.is_free(**slot))
                    .map(|slot| (id, *slot)),
            );
            debug_assert_eq!(next, dof_owners.len());
        }

        log::debug!(
            "Numbered {} free DOFs on {} active nodes",
            dof_owners.len(),
            unique_nodes.len()
        );
        Ok(dof_owners)
    }

    /// Number the DOFs, formulate every element and assemble the global
    /// stiffness matrix
    ///
    /// Any previous assembly and solution are discarded first, node
    /// displacements included, so a failure leaves no global matrix or stale
    /// result behind.
    pub fn assemble_global_stiffness_matrix(&mut self) -> ShellResult<&Mat> {
        self.assembly = None;
        self.solution = None;
        for node in &mut self.nodes {
            node.clear_results();
        }

        let unique_nodes = self.unique_nodes();
        let dof_owners = self.number_dofs(&unique_nodes)?;
        let n_dofs = dof_owners.len();

        let formulations = self
            .elements
            .iter()
            .enumerate()
            .map(|(index, element)| element.formulate(&self.nodes, index))
            .collect::<ShellResult<Vec<_>>>()?;

        let mut stiffness = Mat::zeros(n_dofs, n_dofs);
        for formulation in &formulations {
            scatter_add(&mut stiffness, formulation);
        }

        log::debug!(
            "Assembled {} elements into a {n_dofs}x{n_dofs} stiffness matrix",
            formulations.len()
        );

        let assembly = self.assembly.insert(Assembly {
            unique_nodes,
            dof_owners,
            formulations,
            stiffness,
            forces: None,
        });
        Ok(&assembly.stiffness)
    }

    /// Assemble the global force vector from the nodal loads
    ///
    /// Uses the numbering of the last stiffness assembly. Loads on fixed
    /// slots are dropped; reactions are not computed.
    pub fn assemble_forces_matrix(&mut self) -> ShellResult<&Vector> {
        let assembly = self.assembly.as_mut().ok_or(ShellError::NotAssembled)?;

        let mut forces = Vector::zeros(assembly.dof_owners.len());
        for id in &assembly.unique_nodes {
            let node = &self.nodes[id.0];
            for (number, load) in node.dof_numbers.iter().zip(node.force.as_array()) {
                if let Some(dof) = number {
                    forces[*dof] += load;
                }
            }
        }

        Ok(assembly.forces.insert(forces))
    }

    // ========================
    // Diagnostics
    // ========================

    fn owner(&self, dof: usize) -> ShellResult<(NodeId, DofSlot)> {
        let assembly = self.assembly.as_ref().ok_or(ShellError::NotAssembled)?;
        assembly
            .dof_owners
            .get(dof)
            .copied()
            .ok_or_else(|| ShellError::Configuration(format!("DOF {dof} has no owner")))
    }

    fn check_zero_rows(&self, tolerance: f64) -> ShellResult<()> {
        let assembly = self.assembly.as_ref().ok_or(ShellError::NotAssembled)?;
        let unconstrained = math::zero_rows(&assembly.stiffness, tolerance)
            .into_iter()
            .map(|dof| {
                let (node, slot) = assembly.dof_owners[dof];
                UnconstrainedDof { node, slot, dof }
            })
            .collect::<Vec<_>>();

        if unconstrained.is_empty() {
            return Ok(());
        }
        for dof in &unconstrained {
            log::warn!("Free DOF {dof} has no stiffness");
        }
        Err(ShellError::UnderConstrained(unconstrained))
    }

    fn singular_error(&self, weak: WeakPivot) -> ShellError {
        match self.owner(weak.column) {
            Ok((node, slot)) => {
                log::warn!(
                    "Vanishing pivot {:.3e} at DOF {} ({node}.{slot})",
                    weak.pivot,
                    weak.column
                );
                ShellError::SingularMatrix {
                    node,
                    slot,
                    dof: weak.column,
                    pivot: weak.pivot,
                }
            }
            Err(err) => err,
        }
    }

    /// Check the assembled stiffness matrix for singularity
    ///
    /// Free DOFs with an empty stiffness row are reported as
    /// [`ShellError::UnderConstrained`]; otherwise the first vanishing LU
    /// pivot is reported as [`ShellError::SingularMatrix`]. Nothing is
    /// corrected.
    pub fn diagnose_singularity(&self, options: &SolverOptions) -> ShellResult<()> {
        options.validate()?;
        let assembly = self.assembly.as_ref().ok_or(ShellError::NotAssembled)?;
        if assembly.dof_owners.is_empty() {
            return Ok(());
        }
        self.check_zero_rows(options.zero_row_tolerance)?;
        match math::find_weak_pivot(&assembly.stiffness, options.pivot_tolerance) {
            Some(weak) => Err(self.singular_error(weak)),
            None => Ok(()),
        }
    }

    // ========================
    // Analysis
    // ========================

    /// Assemble and solve with default options
    pub fn solve(&mut self) -> ShellResult<()> {
        self.solve_with(&SolverOptions::default())
    }

    /// Assemble, solve K u = F, write nodal displacements and element strains
    pub fn solve_with(&mut self, options: &SolverOptions) -> ShellResult<()> {
        options.validate()?;

        log::info!(
            "Solving structure: {} nodes, {} elements",
            self.nodes.len(),
            self.elements.len()
        );

        self.assemble_global_stiffness_matrix()?;
        self.assemble_forces_matrix()?;

        let assembly = self.assembly.as_ref().ok_or(ShellError::NotAssembled)?;
        let forces = assembly.forces.as_ref().ok_or(ShellError::NotAssembled)?;
        let n_dofs = assembly.dof_owners.len();

        let displacements = if n_dofs == 0 {
            log::info!("No free DOFs, all displacements are zero");
            Vector::zeros(0)
        } else {
            if options.check_singularity {
                self.check_zero_rows(options.zero_row_tolerance)?;
            }
            math::solve_linear_system(&assembly.stiffness, forces, options.pivot_tolerance)
                .map_err(|weak| self.singular_error(weak))?
        };

        for node in &mut self.nodes {
            let numbers = node.dof_numbers;
            let displacement = numbers.map(|n| n.map_or(0.0, |dof| displacements[dof]));
            node.set_displacement(displacement);
        }

        let assembly = self.assembly.as_ref().ok_or(ShellError::NotAssembled)?;
        let strains = assembly
            .formulations
            .iter()
            .map(|f| f.strain(&self.element_displacements(f)))
            .collect();

        log::info!(
            "Solved {n_dofs} DOFs, max |u| = {:.6e}",
            displacements.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
        );

        self.solution = Some(Solution {
            displacements,
            strains,
        });
        Ok(())
    }

    /// Global displacements of the element's nodes, in element DOF order
    fn element_displacements(&self, formulation: &ShellFormulation) -> Vec20 {
        let mut u = Vec20::zeros();
        for (i, id) in formulation.nodes().iter().enumerate() {
            let d = self.nodes[id.0].displacement();
            for (slot, value) in d.iter().enumerate() {
                u[i * DOFS_PER_NODE + slot] = *value;
            }
        }
        u
    }

    // ========================
    // Results
    // ========================

    pub fn is_assembled(&self) -> bool {
        self.assembly.is_some()
    }

    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Number of free DOFs of the last assembly
    pub fn dof_count(&self) -> ShellResult<usize> {
        self.assembly
            .as_ref()
            .map(|a| a.dof_owners.len())
            .ok_or(ShellError::NotAssembled)
    }

    pub fn global_stiffness(&self) -> ShellResult<&Mat> {
        self.assembly
            .as_ref()
            .map(|a| &a.stiffness)
            .ok_or(ShellError::NotAssembled)
    }

    pub fn global_forces(&self) -> ShellResult<&Vector> {
        self.assembly
            .as_ref()
            .and_then(|a| a.forces.as_ref())
            .ok_or(ShellError::NotAssembled)
    }

    /// Solved free-DOF displacement vector
    pub fn displacements(&self) -> ShellResult<&Vector> {
        self.solution
            .as_ref()
            .map(|s| &s.displacements)
            .ok_or(ShellError::NotSolved)
    }

    /// Get node displacement
    pub fn node_displacement(&self, id: NodeId) -> ShellResult<NodeDisplacement> {
        if self.solution.is_none() {
            return Err(ShellError::NotSolved);
        }
        Ok(NodeDisplacement::from_array(self.node(id)?.displacement()))
    }

    pub fn element_formulation(&self, id: ElementId) -> ShellResult<&ShellFormulation> {
        let assembly = self.assembly.as_ref().ok_or(ShellError::NotAssembled)?;
        assembly
            .formulations
            .get(id.0)
            .ok_or(ShellError::ElementNotFound(id.0))
    }

    /// Averaged strain of an element from the last solve
    pub fn element_strain(&self, id: ElementId) -> ShellResult<ElementStrain> {
        let solution = self.solution.as_ref().ok_or(ShellError::NotSolved)?;
        solution
            .strains
            .get(id.0)
            .copied()
            .ok_or(ShellError::ElementNotFound(id.0))
    }

    /// Get analysis summary
    pub fn summary(&self) -> ShellResult<AnalysisSummary> {
        let assembly = self.assembly.as_ref().ok_or(ShellError::NotAssembled)?;
        if self.solution.is_none() {
            return Err(ShellError::NotSolved);
        }

        let mut summary = AnalysisSummary {
            num_nodes: self.nodes.len(),
            num_active_nodes: assembly.unique_nodes.len(),
            num_elements: self.elements.len(),
            total_dofs: assembly.unique_nodes.len() * DOFS_PER_NODE,
            free_dofs: assembly.dof_owners.len(),
            ..Default::default()
        };

        for id in &assembly.unique_nodes {
            let mag = NodeDisplacement::from_array(self.nodes[id.0].displacement())
                .translation_magnitude();
            if mag > summary.max_displacement {
                summary.max_displacement = mag;
                summary.max_disp_node = Some(*id);
            }
        }

        Ok(summary)
    }
}

/// Scatter-add an element's global stiffness, skipping fixed DOFs
fn scatter_add(k: &mut Mat, formulation: &ShellFormulation) {
    let numbers = formulation.dof_numbers();
    let ke = formulation.global_stiffness();
    for a in 0..DOFS_PER_ELEMENT {
        let Some(row) = numbers[a] else { continue };
        for b in 0..DOFS_PER_ELEMENT {
            let Some(col) = numbers[b] else { continue };
            k[(row, col)] += ke[(a, b)];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ShellSection;
    use crate::math::{Mat2, Mat3, Vec3};
    use approx::assert_relative_eq;

    fn section() -> ShellSection {
        let a = Mat3::new(103239.0, 7287.45, 0.0, 7287.45, 103239.0, 0.0, 0.0, 0.0, 6000.0);
        let d = Mat3::new(15941.3, 874.494, 0.0, 874.494, 8836.03, 0.0, 0.0, 0.0, 720.0);
        ShellSection::from_matrices(a, Mat3::zeros(), d, Mat2::from_diagonal_element(4000.0))
    }

    fn unit_square(points: [[f64; 3]; 4]) -> (Structure, [NodeId; 4]) {
        let mut s = Structure::new();
        let ids = points.map(|p| s.add_node(p[0], p[1], p[2]));
        s.add_element(ShellElement::new(ids, Vec3::x(), section()));
        (s, ids)
    }

    fn flat_square() -> (Structure, [NodeId; 4]) {
        unit_square([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]])
    }

    /// 2x1 strip of elements sharing the edge n1-n4
    fn strip() -> (Structure, Vec<NodeId>) {
        let mut s = Structure::new();
        let ids: Vec<NodeId> = [
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [2.0, 1.0],
        ]
        .iter()
        .map(|p| s.add_node(p[0], p[1], 0.0))
        .collect();
        s.add_element(ShellElement::new([ids[0], ids[1], ids[4], ids[3]], Vec3::x(), section()));
        s.add_element(ShellElement::new([ids[1], ids[2], ids[5], ids[4]], Vec3::x(), section()));
        (s, ids)
    }

    #[test]
    fn test_unique_nodes_first_encounter_order() {
        let (mut s, ids) = strip();
        s.add_node(9.0, 9.0, 9.0);
        assert_eq!(s.unique_nodes(), vec![ids[0], ids[1], ids[4], ids[3], ids[2], ids[5]]);
    }

    #[test]
    fn test_dof_numbering_is_permutation() {
        let (mut s, ids) = strip();
        s.set_constraint(ids[0], Constraint::fixed()).unwrap();
        s.set_constraint(ids[3], Constraint::pinned()).unwrap();
        s.set_constraint(ids[5], Constraint::free().with_fixed(DofSlot::Tz)).unwrap();
        s.assemble_global_stiffness_matrix().unwrap();

        let n = s.dof_count().unwrap();
        assert_eq!(n, 30 - 5 - 3 - 1);

        let mut numbers: Vec<usize> = s
            .nodes()
            .iter()
            .flat_map(|node| node.dof_numbers().into_iter().flatten())
            .collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (0..n).collect::<Vec<_>>());

        assert_eq!(s.node(ids[0]).unwrap().dof_numbers(), [None; 5]);
        assert_eq!(s.node(ids[5]).unwrap().dof_numbers()[2], None);
        // n1 is the first active node with free slots
        assert_eq!(s.node(ids[1]).unwrap().dof_numbers()[0], Some(0));
    }

    #[test]
    fn test_global_stiffness_is_symmetric() {
        let (mut s, ids) = strip();
        s.set_constraint(ids[0], Constraint::fixed()).unwrap();
        let k = s.assemble_global_stiffness_matrix().unwrap().clone();
        assert_relative_eq!(k, k.transpose(), max_relative = 1e-10, epsilon = 1e-6);
    }

    #[test]
    fn test_all_fixed_gives_empty_system() {
        let (mut s, ids) = flat_square();
        for id in ids {
            s.set_constraint(id, Constraint::fixed()).unwrap();
            s.set_force(id, Force::fz(10.0)).unwrap();
        }
        s.solve().unwrap();

        assert_eq!(s.dof_count().unwrap(), 0);
        assert_eq!(s.global_stiffness().unwrap().nrows(), 0);
        assert_eq!(s.displacements().unwrap().len(), 0);
        for id in ids {
            assert_eq!(s.node(id).unwrap().displacement(), [0.0; 5]);
        }
        assert_eq!(s.element_strain(ElementId(0)).unwrap(), ElementStrain::default());
    }

    fn loaded_corner(load: f64) -> f64 {
        let (mut s, ids) = flat_square();
        for id in &ids[..3] {
            s.set_constraint(*id, Constraint::fixed()).unwrap();
        }
        s.set_constraint(ids[3], Constraint::new(false, false, true, false, false))
            .unwrap();
        s.set_force(ids[3], Force::fz(load)).unwrap();
        s.solve().unwrap();
        assert_eq!(s.dof_count().unwrap(), 1);
        s.node_displacement(ids[3]).unwrap().dz
    }

    #[test]
    fn test_single_element_out_of_plane_load() {
        let w1 = loaded_corner(1.0);
        let w2 = loaded_corner(2.0);
        assert!(w1 > 0.0, "w1 = {w1}");
        assert_relative_eq!(w2, 2.0 * w1, max_relative = 1e-12);
        assert!(loaded_corner(-1.0) < 0.0);
    }

    #[test]
    fn test_displaced_positions_follow_solution() {
        let (mut s, ids) = flat_square();
        for id in &ids[..3] {
            s.set_constraint(*id, Constraint::fixed()).unwrap();
        }
        s.set_force(ids[3], Force::fz(5.0)).unwrap();
        s.solve().unwrap();

        let node = s.node(ids[3]).unwrap();
        let d = node.displacement();
        assert_eq!(node.displaced_position(), [d[0], 1.0 + d[1], d[2]]);
        assert_eq!(s.displacements().unwrap().len(), 5);
        assert!(s.global_forces().unwrap()[2] == 5.0);
    }

    /// Element in the XZ plane: the in-plane rotation block drops global ry
    fn vertical_square() -> (Structure, [NodeId; 4]) {
        let (mut s, ids) =
            unit_square([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]]);
        for id in &ids[..3] {
            s.set_constraint(*id, Constraint::fixed()).unwrap();
        }
        s.set_force(ids[3], Force::fx(1.0)).unwrap();
        (s, ids)
    }

    #[test]
    fn test_under_constrained_node_is_named() {
        let (mut s, ids) = vertical_square();
        let err = s.solve().unwrap_err();
        match err {
            ShellError::UnderConstrained(dofs) => {
                assert_eq!(
                    dofs,
                    vec![UnconstrainedDof {
                        node: ids[3],
                        slot: DofSlot::Ry,
                        dof: 4
                    }]
                );
            }
            other => panic!("unexpected error {other:?}"),
        }
        // the matrix stays available for inspection
        assert!(s.is_assembled());
        assert!(!s.is_solved());
        assert!(s.diagnose_singularity(&SolverOptions::default()).is_err());
    }

    #[test]
    fn test_vanishing_pivot_is_named() {
        let (mut s, ids) = vertical_square();
        let options = SolverOptions::default().without_singularity_check();
        let err = s.solve_with(&options).unwrap_err();
        assert!(
            matches!(
                err,
                ShellError::SingularMatrix { node, slot: DofSlot::Ry, dof: 4, .. } if node == ids[3]
            ),
            "{err}"
        );
    }

    #[test]
    fn test_negative_pivot_tolerance_is_rejected() {
        let (mut s, _) = vertical_square();
        let options = SolverOptions::default().with_pivot_tolerance(-1.0);
        let err = s.solve_with(&options).unwrap_err();
        assert!(matches!(err, ShellError::Configuration(_)), "{err}");
        assert!(!s.is_assembled());
    }

    #[test]
    fn test_inverted_element_clears_assembly() {
        let (mut s, ids) = flat_square();
        for id in &ids[..2] {
            s.set_constraint(*id, Constraint::fixed()).unwrap();
        }
        s.set_force(ids[2], Force::fz(1.0)).unwrap();
        s.solve().unwrap();
        assert!(s.is_solved());

        // swap the last two corners into a bow-tie
        s.node_mut(ids[2]).unwrap().x = 0.0;
        s.node_mut(ids[3]).unwrap().x = 1.0;
        let err = s.solve().unwrap_err();

        assert!(matches!(err, ShellError::NonPositiveJacobian { element: 0, .. }));
        assert!(matches!(s.global_stiffness(), Err(ShellError::NotAssembled)));
        assert!(matches!(s.displacements(), Err(ShellError::NotSolved)));
        assert!(matches!(s.element_formulation(ElementId(0)), Err(ShellError::NotAssembled)));

        // no stale results remain on the nodes
        for id in &ids {
            let node = s.node(*id).unwrap();
            assert_eq!(node.displacement(), [0.0; DOFS_PER_NODE]);
            assert_eq!(node.displaced_position(), node.coords());
        }
    }

    #[test]
    fn test_solve_is_idempotent() {
        let (mut s, ids) = strip();
        s.set_constraint(ids[0], Constraint::fixed()).unwrap();
        s.set_constraint(ids[3], Constraint::fixed()).unwrap();
        s.set_force(ids[2], Force::new(10.0, 0.0, 2.0, 0.0, 0.0)).unwrap();
        s.set_force(ids[5], Force::fz(2.0)).unwrap();

        s.solve().unwrap();
        let first = s.displacements().unwrap().clone();
        let strain = s.element_strain(ElementId(1)).unwrap();
        s.solve().unwrap();

        assert_eq!(s.displacements().unwrap(), &first);
        assert_eq!(s.element_strain(ElementId(1)).unwrap(), strain);
    }

    #[test]
    fn test_unknown_node_in_element() {
        let mut s = Structure::new();
        let a = s.add_node(0.0, 0.0, 0.0);
        let b = s.add_node(1.0, 0.0, 0.0);
        s.add_element(ShellElement::new([a, b, NodeId(7), NodeId(8)], Vec3::x(), section()));
        let err = s.solve().unwrap_err();
        assert!(matches!(err, ShellError::NodeNotFound(NodeId(7))));
    }

    #[test]
    fn test_forces_require_assembly() {
        let (mut s, _) = flat_square();
        assert!(matches!(s.assemble_forces_matrix(), Err(ShellError::NotAssembled)));
        assert!(matches!(s.summary(), Err(ShellError::NotAssembled)));
    }

    #[test]
    fn test_summary_reports_max_displacement() {
        let (mut s, ids) = strip();
        s.set_constraint(ids[0], Constraint::fixed()).unwrap();
        s.set_constraint(ids[3], Constraint::fixed()).unwrap();
        s.set_force(ids[2], Force::fz(1.0)).unwrap();
        s.set_force(ids[5], Force::fz(1.0)).unwrap();
        s.solve().unwrap();

        let summary = s.summary().unwrap();
        assert_eq!(summary.num_elements, 2);
        assert_eq!(summary.num_active_nodes, 6);
        assert_eq!(summary.free_dofs, 20);
        let tip = summary.max_disp_node.unwrap();
        assert!(tip == ids[2] || tip == ids[5], "{tip}");
        assert!(summary.max_displacement > 0.0);
    }
}
