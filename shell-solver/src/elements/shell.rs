//! Shell element - flat 4-node laminated shell with 5 DOFs per node
//!
//! The element has no drilling stiffness: each node carries DX, DY, DZ and two
//! bending rotations, so folded or curved assemblies rely on neighbouring
//! elements for the rotation about the normal.

use serde::{Deserialize, Serialize};

use super::dof::{NodeId, DOFS_PER_ELEMENT, DOFS_PER_NODE, NODES_PER_ELEMENT};
use super::node::Node;
use crate::error::{ShellError, ShellResult};
use crate::laminate::Laminate;
use crate::math::shell::{strain_displacement, StrainDisplacement, GAUSS_POINTS};
use crate::math::{
    material_transformation_matrix, shell_transformation_matrix, Mat2, Mat20, Mat3, Mat6,
    ShellFrame, Vec2, Vec20, Vec3,
};
use crate::results::ElementStrain;

/// Fourth-node distance from the element plane, relative to element size,
/// above which the element is reported as warped
const WARP_TOLERANCE: f64 = 1e-3;

/// Section stiffness of a shell element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellSection {
    /// [[A, B], [B, D]]
    pub abd: Mat6,
    /// Transverse shear stiffness for (γxz, γyz)
    pub shear: Mat2,
}

impl ShellSection {
    /// Section from explicit A, B, D and transverse shear matrices
    pub fn from_matrices(a: Mat3, b: Mat3, d: Mat3, shear: Mat2) -> Self {
        let mut abd = Mat6::zeros();
        abd.fixed_view_mut::<3, 3>(0, 0).copy_from(&a);
        abd.fixed_view_mut::<3, 3>(0, 3).copy_from(&b);
        abd.fixed_view_mut::<3, 3>(3, 0).copy_from(&b);
        abd.fixed_view_mut::<3, 3>(3, 3).copy_from(&d);
        Self { abd, shear }
    }
}

impl From<&Laminate> for ShellSection {
    fn from(laminate: &Laminate) -> Self {
        Self {
            abd: *laminate.abd(),
            shear: *laminate.transverse_shear(),
        }
    }
}

/// Topology and section of a shell element
///
/// Nodes are listed counter-clockwise around the element normal.
/// `reference` is the global direction whose projection onto the element
/// plane becomes the material x-axis (the 0° fibre direction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellElement {
    nodes: [NodeId; NODES_PER_ELEMENT],
    reference: Vec3,
    section: ShellSection,
}

impl ShellElement {
    pub fn new(
        nodes: [NodeId; NODES_PER_ELEMENT],
        reference: Vec3,
        section: impl Into<ShellSection>,
    ) -> Self {
        Self {
            nodes,
            reference,
            section: section.into(),
        }
    }

    /// Node handles in element order
    pub fn nodes(&self) -> &[NodeId; NODES_PER_ELEMENT] {
        &self.nodes
    }

    pub fn reference(&self) -> &Vec3 {
        &self.reference
    }

    pub fn section(&self) -> &ShellSection {
        &self.section
    }

    /// Compute frame, transformations and stiffness matrices
    ///
    /// `nodes` is the node arena of the owning structure, with DOF numbers
    /// already assigned; `index` names the element in error messages.
    pub fn formulate(&self, nodes: &[Node], index: usize) -> ShellResult<ShellFormulation> {
        let element_nodes = self
            .nodes
            .iter()
            .map(|id| nodes.get(id.0).ok_or(ShellError::NodeNotFound(*id)))
            .collect::<ShellResult<Vec<_>>>()?;
        let points: [Vec3; NODES_PER_ELEMENT] =
            std::array::from_fn(|i| element_nodes[i].position());

        let frame = ShellFrame::from_points(&points[0], &points[1], &points[2]).ok_or_else(|| {
            ShellError::DegenerateElement {
                element: index,
                reason: "nodes 1, 2 and 3 are coincident or collinear".to_string(),
            }
        })?;

        let size = element_size(&points);
        let warp = frame.out_of_plane(&points[0], &points[3]).abs();
        if warp > WARP_TOLERANCE * size {
            log::warn!(
                "Element {index}: node 4 lies {warp:.3e} off the element plane (size {size:.3e}), \
                 treating it as flat"
            );
        }

        let coords: [Vec2; NODES_PER_ELEMENT] =
            std::array::from_fn(|i| frame.project(&(points[i] - points[0])));

        let (c, s) = self.material_axis(&frame, index)?;
        let material_coords = coords.map(|p| Vec2::new(c * p.x + s * p.y, -s * p.x + c * p.y));

        let mut k_material = Mat20::zeros();
        let mut gauss = Vec::with_capacity(GAUSS_POINTS.len());
        for (point, &(xi, eta)) in GAUSS_POINTS.iter().enumerate() {
            let sd = strain_displacement(&material_coords, xi, eta).map_err(|det| {
                ShellError::NonPositiveJacobian {
                    element: index,
                    point,
                    det,
                }
            })?;
            k_material += sd.bc.transpose() * self.section.abd * sd.bc * sd.det_j;
            k_material += sd.bs.transpose() * self.section.shear * sd.bs * sd.det_j;
            gauss.push(sd);
        }

        let t = shell_transformation_matrix(&frame);
        let t_material = material_transformation_matrix(c, s);
        let k_local = t_material.transpose() * k_material * t_material;
        let k_global = t.transpose() * k_local * t;

        let mut dof_numbers = [None; DOFS_PER_ELEMENT];
        for (i, node) in element_nodes.iter().enumerate() {
            dof_numbers[i * DOFS_PER_NODE..(i + 1) * DOFS_PER_NODE]
                .copy_from_slice(&node.dof_numbers());
        }

        log::debug!(
            "Element {index}: normal ({:.3}, {:.3}, {:.3}), material axis ({c:.3}, {s:.3})",
            frame.e3.x,
            frame.e3.y,
            frame.e3.z
        );

        Ok(ShellFormulation {
            index,
            nodes: self.nodes,
            frame,
            coords,
            material_axis: (c, s),
            t,
            t_material,
            k_local,
            k_global,
            dof_numbers,
            gauss,
        })
    }

    /// Components (c, s) of the material x-axis in the element (e1, e2) basis
    fn material_axis(&self, frame: &ShellFrame, index: usize) -> ShellResult<(f64, f64)> {
        let in_plane = frame.project(&self.reference);
        let length = in_plane.norm();
        if !(length > 1e-9 * self.reference.norm()) {
            return Err(ShellError::DegenerateElement {
                element: index,
                reason: "reference direction has no component in the element plane".to_string(),
            });
        }
        Ok((in_plane.x / length, in_plane.y / length))
    }
}

fn element_size(points: &[Vec3; NODES_PER_ELEMENT]) -> f64 {
    let d1 = (points[2] - points[0]).norm();
    let d2 = (points[3] - points[1]).norm();
    d1.max(d2)
}

/// Result of [`ShellElement::formulate`]
#[derive(Debug, Clone)]
pub struct ShellFormulation {
    index: usize,
    nodes: [NodeId; NODES_PER_ELEMENT],
    frame: ShellFrame,
    coords: [Vec2; NODES_PER_ELEMENT],
    material_axis: (f64, f64),
    t: Mat20,
    t_material: Mat20,
    k_local: Mat20,
    k_global: Mat20,
    dof_numbers: [Option<usize>; DOFS_PER_ELEMENT],
    gauss: Vec<StrainDisplacement>,
}

impl ShellFormulation {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn nodes(&self) -> &[NodeId; NODES_PER_ELEMENT] {
        &self.nodes
    }

    pub fn frame(&self) -> &ShellFrame {
        &self.frame
    }

    /// Node coordinates in the element (e1, e2) plane, relative to node 1
    pub fn local_coords(&self) -> &[Vec2; NODES_PER_ELEMENT] {
        &self.coords
    }

    /// Material x-axis as (cos, sin) in the element plane
    pub fn material_axis(&self) -> (f64, f64) {
        self.material_axis
    }

    /// Global-to-element transformation
    pub fn transformation(&self) -> &Mat20 {
        &self.t
    }

    /// Element-to-material transformation
    pub fn material_transformation(&self) -> &Mat20 {
        &self.t_material
    }

    /// Stiffness in the element frame, after the material rotation
    pub fn local_stiffness(&self) -> &Mat20 {
        &self.k_local
    }

    /// Stiffness in global axes
    pub fn global_stiffness(&self) -> &Mat20 {
        &self.k_global
    }

    /// Global equation number of every element DOF, `None` where fixed
    pub fn dof_numbers(&self) -> &[Option<usize>; DOFS_PER_ELEMENT] {
        &self.dof_numbers
    }

    /// Gauss-point averaged strains for global nodal displacements `u`
    pub fn strain(&self, u: &Vec20) -> ElementStrain {
        let u_material = self.t_material * (self.t * u);
        let weight = 1.0 / self.gauss.len() as f64;

        let mut generalized = nalgebra::Vector6::<f64>::zeros();
        let mut shear = nalgebra::Vector2::<f64>::zeros();
        for sd in &self.gauss {
            generalized += sd.bc * u_material * weight;
            shear += sd.bs * u_material * weight;
        }

        ElementStrain {
            membrane: [generalized[0], generalized[1], generalized[2]],
            curvature: [generalized[3], generalized[4], generalized[5]],
            transverse_shear: [shear[0], shear[1]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laminate::{Material, Ply};
    use approx::assert_relative_eq;

    fn cross_ply() -> Laminate {
        let plies = [0.0, 90.0, 90.0, 0.0]
            .iter()
            .map(|&deg| Ply::with_degrees(Material::carbon_epoxy(), 0.125, deg).unwrap())
            .collect();
        Laminate::new(plies)
    }

    fn arena(points: &[[f64; 3]]) -> Vec<Node> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| Node::new(NodeId(i), p[0], p[1], p[2]))
            .collect()
    }

    fn quad() -> [NodeId; 4] {
        [NodeId(0), NodeId(1), NodeId(2), NodeId(3)]
    }

    fn eigenvalues(k: &Mat20) -> Vec<f64> {
        let mut values: Vec<f64> = (*k).symmetric_eigen().eigenvalues.iter().copied().collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values
    }

    fn assert_rigid_modes(k: &Mat20) {
        let values = eigenvalues(k);
        let largest = values[values.len() - 1];
        let zero = values.iter().filter(|v| v.abs() < 1e-8 * largest).count();
        assert_eq!(zero, 6, "eigenvalues: {values:?}");
        assert!(values[0] > -1e-8 * largest, "negative eigenvalue {}", values[0]);
    }

    #[test]
    fn test_unit_square_stiffness_properties() {
        let nodes = arena(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        let element = ShellElement::new(quad(), Vec3::x(), &cross_ply());
        let f = element.formulate(&nodes, 0).unwrap();

        let k = f.global_stiffness();
        assert_relative_eq!(*k, k.transpose(), max_relative = 1e-10, epsilon = 1e-6);
        assert_rigid_modes(k);
    }

    #[test]
    fn test_distorted_rotated_element_keeps_rigid_modes() {
        // irregular quad in the XY plane, material axis at 30°
        let nodes = arena(&[[0.0, 0.0, 0.0], [2.0, 0.2, 0.0], [2.3, 1.6, 0.0], [-0.1, 1.2, 0.0]]);
        let reference = Vec3::new(30f64.to_radians().cos(), 30f64.to_radians().sin(), 0.0);
        let element = ShellElement::new(quad(), reference, &cross_ply());
        let f = element.formulate(&nodes, 0).unwrap();

        let k = f.global_stiffness();
        assert_relative_eq!(*k, k.transpose(), max_relative = 1e-10, epsilon = 1e-6);
        assert_rigid_modes(k);
    }

    #[test]
    fn test_reversed_reference_gives_same_local_stiffness() {
        let nodes = arena(&[[0.0, 0.0, 0.0], [1.5, 0.0, 0.0], [1.4, 1.1, 0.0], [0.1, 0.9, 0.0]]);
        let reference = Vec3::new(1.0, 0.5, 0.0);
        let forward = ShellElement::new(quad(), reference, &cross_ply())
            .formulate(&nodes, 0)
            .unwrap();
        let backward = ShellElement::new(quad(), -reference, &cross_ply())
            .formulate(&nodes, 0)
            .unwrap();

        let scale = forward.local_stiffness().amax();
        assert_relative_eq!(
            *forward.local_stiffness(),
            *backward.local_stiffness(),
            epsilon = 1e-10 * scale
        );
    }

    #[test]
    fn test_frame_and_local_coordinates() {
        let nodes = arena(&[[1.0, 1.0, 0.0], [3.0, 1.0, 0.0], [3.0, 2.0, 0.0], [1.0, 2.0, 0.0]]);
        let f = ShellElement::new(quad(), Vec3::x(), &cross_ply())
            .formulate(&nodes, 0)
            .unwrap();

        assert_relative_eq!(f.frame().e3, Vec3::z());
        assert_relative_eq!(f.local_coords()[2], Vec2::new(2.0, 1.0));
        assert_eq!(f.material_axis(), (1.0, 0.0));
    }

    #[test]
    fn test_bow_tie_element_fails() {
        let nodes = arena(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]);
        let err = ShellElement::new(quad(), Vec3::x(), &cross_ply())
            .formulate(&nodes, 4)
            .unwrap_err();
        match err {
            ShellError::NonPositiveJacobian { element, point, det } => {
                assert_eq!(element, 4);
                assert_eq!(point, 2);
                assert!(det < 0.0);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_collinear_nodes_fail() {
        let nodes = arena(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let err = ShellElement::new(quad(), Vec3::x(), &cross_ply())
            .formulate(&nodes, 1)
            .unwrap_err();
        assert!(matches!(err, ShellError::DegenerateElement { element: 1, .. }));
    }

    #[test]
    fn test_reference_normal_to_plane_fails() {
        let nodes = arena(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        let err = ShellElement::new(quad(), Vec3::z(), &cross_ply())
            .formulate(&nodes, 0)
            .unwrap_err();
        assert!(matches!(err, ShellError::DegenerateElement { .. }));
    }

    #[test]
    fn test_unknown_node_fails() {
        let nodes = arena(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]);
        let err = ShellElement::new(quad(), Vec3::x(), &cross_ply())
            .formulate(&nodes, 0)
            .unwrap_err();
        assert!(matches!(err, ShellError::NodeNotFound(NodeId(3))));
    }

    #[test]
    fn test_membrane_strain_recovery() {
        let nodes = arena(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        let f = ShellElement::new(quad(), Vec3::x(), &cross_ply())
            .formulate(&nodes, 0)
            .unwrap();

        // uniform stretch of 1e-3 along X
        let mut u = Vec20::zeros();
        for (i, node) in nodes.iter().enumerate() {
            u[i * DOFS_PER_NODE] = 1e-3 * node.x;
        }
        let strain = f.strain(&u);
        assert_relative_eq!(strain.membrane[0], 1e-3, epsilon = 1e-12);
        assert_relative_eq!(strain.membrane[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(strain.curvature[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(strain.transverse_shear[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_strain_recovery_in_rotated_frames() {
        // element in the XZ plane: e1 = X, e2 = Z, fibres 30° from X towards Z
        let nodes = arena(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 0.0, 1.0], [0.0, 0.0, 1.0]]);
        let angle = 30f64.to_radians();
        let (c, s) = (angle.cos(), angle.sin());
        let f = ShellElement::new(quad(), Vec3::new(c, 0.0, s), &cross_ply())
            .formulate(&nodes, 0)
            .unwrap();
        assert_relative_eq!(f.frame().e3, -Vec3::y());
        let (mc, ms) = f.material_axis();
        assert_relative_eq!(mc, c, epsilon = 1e-12);
        assert_relative_eq!(ms, s, epsilon = 1e-12);

        let eps = 1e-3;
        let mut u = Vec20::zeros();
        for (i, node) in nodes.iter().enumerate() {
            u[i * DOFS_PER_NODE] = eps * node.x;
        }
        let strain = f.strain(&u);
        assert_relative_eq!(strain.membrane[0], eps * c * c, epsilon = 1e-12);
        assert_relative_eq!(strain.membrane[1], eps * s * s, epsilon = 1e-12);
        assert_relative_eq!(strain.membrane[2], -2.0 * eps * s * c, epsilon = 1e-12);
        for k in strain.curvature {
            assert_relative_eq!(k, 0.0, epsilon = 1e-12);
        }
        for g in strain.transverse_shear {
            assert_relative_eq!(g, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_fixture_section_from_matrices() {
        let a = Mat3::new(103239.0, 7287.45, 0.0, 7287.45, 103239.0, 0.0, 0.0, 0.0, 6000.0);
        let d = Mat3::new(15941.3, 874.494, 0.0, 874.494, 8836.03, 0.0, 0.0, 0.0, 720.0);
        let section = ShellSection::from_matrices(a, Mat3::zeros(), d, Mat2::from_diagonal_element(4000.0));
        assert_eq!(section.abd[(0, 1)], 7287.45);
        assert_eq!(section.abd[(4, 4)], 8836.03);
        assert_eq!(section.abd[(0, 3)], 0.0);

        let nodes = arena(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
        let f = ShellElement::new(quad(), Vec3::x(), section).formulate(&nodes, 0).unwrap();
        assert_rigid_modes(f.global_stiffness());
    }
}
