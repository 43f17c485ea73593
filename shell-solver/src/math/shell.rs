//! Shell element kinematics
//!
//! Bilinear 4-node isoparametric interpolation on the element plane:
//! - Membrane strains (εxx, εyy, γxy) from the in-plane translations
//! - Curvatures (κxx, κyy, κxy) from the two rotations
//! - Transverse shear strains (γxz, γyz) from the normal translation and rotations
//!
//! Node i sits at natural coordinates (ξi, ηi) = (−1,−1), (1,−1), (1,1), (−1,1)
//! and owns columns 5i..5i+4 of every B-matrix.

use nalgebra::SMatrix;

use super::{Mat2, Vec2};
use crate::elements::{DOFS_PER_ELEMENT, DOFS_PER_NODE, NODES_PER_ELEMENT};

/// Generalized strain-displacement matrix (membrane + bending)
pub type Mat6x20 = SMatrix<f64, 6, DOFS_PER_ELEMENT>;
/// Transverse shear strain-displacement matrix
pub type Mat2x20 = SMatrix<f64, 2, DOFS_PER_ELEMENT>;

/// Gauss coordinate of the 2-point rule, 1/√3
pub const GAUSS_COORD: f64 = 0.577_350_269_189_625_8;

/// 2x2 Gauss points in (ξ, η); all weights are 1
pub const GAUSS_POINTS: [(f64, f64); 4] = [
    (-GAUSS_COORD, -GAUSS_COORD),
    (GAUSS_COORD, -GAUSS_COORD),
    (GAUSS_COORD, GAUSS_COORD),
    (-GAUSS_COORD, GAUSS_COORD),
];

const NODE_XI: [f64; NODES_PER_ELEMENT] = [-1.0, 1.0, 1.0, -1.0];
const NODE_ETA: [f64; NODES_PER_ELEMENT] = [-1.0, -1.0, 1.0, 1.0];

/// Bilinear shape functions N1..N4 at (ξ, η)
pub fn shape_functions(xi: f64, eta: f64) -> [f64; NODES_PER_ELEMENT] {
    std::array::from_fn(|i| 0.25 * (1.0 + NODE_XI[i] * xi) * (1.0 + NODE_ETA[i] * eta))
}

/// Shape function derivatives (dN/dξ, dN/dη) at (ξ, η)
pub fn shape_derivatives(xi: f64, eta: f64) -> ([f64; NODES_PER_ELEMENT], [f64; NODES_PER_ELEMENT]) {
    let dn_dxi = std::array::from_fn(|i| 0.25 * NODE_XI[i] * (1.0 + NODE_ETA[i] * eta));
    let dn_deta = std::array::from_fn(|i| 0.25 * NODE_ETA[i] * (1.0 + NODE_XI[i] * xi));
    (dn_dxi, dn_deta)
}

/// Jacobian of the map (ξ, η) -> (x, y)
///
/// J = [dx/dξ  dy/dξ]
///     [dx/dη  dy/dη]
pub fn jacobian(coords: &[Vec2; NODES_PER_ELEMENT], xi: f64, eta: f64) -> Mat2 {
    let (dn_dxi, dn_deta) = shape_derivatives(xi, eta);
    let mut j = Mat2::zeros();
    for (i, p) in coords.iter().enumerate() {
        j[(0, 0)] += dn_dxi[i] * p.x;
        j[(0, 1)] += dn_dxi[i] * p.y;
        j[(1, 0)] += dn_deta[i] * p.x;
        j[(1, 1)] += dn_deta[i] * p.y;
    }
    j
}

/// B-matrices and Jacobian determinant at one integration point
#[derive(Debug, Clone)]
pub struct StrainDisplacement {
    /// Rows εxx, εyy, γxy, κxx, κyy, κxy
    pub bc: Mat6x20,
    /// Rows γxz, γyz
    pub bs: Mat2x20,
    pub det_j: f64,
}

/// Evaluate the strain-displacement matrices at (ξ, η)
///
/// Returns `Err(det)` when the Jacobian determinant is not positive.
pub fn strain_displacement(
    coords: &[Vec2; NODES_PER_ELEMENT],
    xi: f64,
    eta: f64,
) -> Result<StrainDisplacement, f64> {
    let j = jacobian(coords, xi, eta);
    let det_j = j.determinant();
    if !(det_j > 0.0) {
        return Err(det_j);
    }

    let j_inv = Mat2::new(j[(1, 1)], -j[(0, 1)], -j[(1, 0)], j[(0, 0)]) / det_j;
    let n = shape_functions(xi, eta);
    let (dn_dxi, dn_deta) = shape_derivatives(xi, eta);

    let mut bc = Mat6x20::zeros();
    let mut bs = Mat2x20::zeros();

    for i in 0..NODES_PER_ELEMENT {
        let dn_dx = j_inv[(0, 0)] * dn_dxi[i] + j_inv[(0, 1)] * dn_deta[i];
        let dn_dy = j_inv[(1, 0)] * dn_dxi[i] + j_inv[(1, 1)] * dn_deta[i];
        let c = i * DOFS_PER_NODE;

        // membrane
        bc[(0, c)] = dn_dx;
        bc[(1, c + 1)] = dn_dy;
        bc[(2, c)] = dn_dy;
        bc[(2, c + 1)] = dn_dx;

        // bending
        bc[(3, c + 3)] = dn_dx;
        bc[(4, c + 4)] = dn_dy;
        bc[(5, c + 3)] = dn_dy;
        bc[(5, c + 4)] = dn_dx;

        // transverse shear
        bs[(0, c + 2)] = dn_dx;
        bs[(0, c + 3)] = n[i];
        bs[(1, c + 2)] = dn_dy;
        bs[(1, c + 4)] = n[i];
    }

    Ok(StrainDisplacement { bc, bs, det_j })
}
