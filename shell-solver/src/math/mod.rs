//! Mathematical utilities for shell FEA calculations

pub mod shell;

use nalgebra::linalg::LU;
use nalgebra::{
    DMatrix, DVector, Dyn, Matrix2, Matrix3, Matrix6, SMatrix, SVector, Vector2, Vector3,
};

use crate::elements::{DOFS_PER_ELEMENT, DOFS_PER_NODE, NODES_PER_ELEMENT};

pub type Mat = DMatrix<f64>;
pub type Vector = DVector<f64>;
pub type Mat2 = Matrix2<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;

/// 20x20 matrix for shell element stiffness
pub type Mat20 = SMatrix<f64, DOFS_PER_ELEMENT, DOFS_PER_ELEMENT>;
/// 20-element vector for shell element displacements
pub type Vec20 = SVector<f64, DOFS_PER_ELEMENT>;

/// Orthonormal element frame: e1, e2 span the element plane, e3 is the normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellFrame {
    pub e1: Vec3,
    pub e2: Vec3,
    pub e3: Vec3,
}

impl ShellFrame {
    /// Build the frame from the first three element nodes
    ///
    /// e1 points from p1 to p2, e2 is the part of p1->p3 orthogonal to e1.
    /// Returns `None` when p1, p2, p3 are coincident or collinear.
    pub fn from_points(p1: &Vec3, p2: &Vec3, p3: &Vec3) -> Option<Self> {
        let d12 = p2 - p1;
        let d13 = p3 - p1;
        let scale = d12.norm().max(d13.norm());
        if scale == 0.0 || d12.norm() <= 1e-12 * scale {
            return None;
        }
        let e1 = d12.normalize();
        let in_plane = d13 - e1 * d13.dot(&e1);
        if in_plane.norm() <= 1e-9 * scale {
            return None;
        }
        let e2 = in_plane.normalize();
        let e3 = e1.cross(&e2);
        Some(Self { e1, e2, e3 })
    }

    /// Direction cosine matrix with rows e1, e2, e3
    pub fn rotation(&self) -> Mat3 {
        Mat3::from_rows(&[self.e1.transpose(), self.e2.transpose(), self.e3.transpose()])
    }

    /// In-plane components of a global vector
    pub fn project(&self, v: &Vec3) -> Vec2 {
        Vec2::new(v.dot(&self.e1), v.dot(&self.e2))
    }

    /// Distance of a point from the plane through `origin`
    pub fn out_of_plane(&self, origin: &Vec3, p: &Vec3) -> f64 {
        (p - origin).dot(&self.e3)
    }
}

/// Build the 20x20 global-to-local transformation matrix of a shell element
///
/// Per node: the 3x3 direction cosines on the translations and their
/// in-plane 2x2 part on the two rotations.
pub fn shell_transformation_matrix(frame: &ShellFrame) -> Mat20 {
    let r = frame.rotation();
    let mut t = Mat20::zeros();

    for node in 0..NODES_PER_ELEMENT {
        let offset = node * DOFS_PER_NODE;
        t.fixed_view_mut::<3, 3>(offset, offset).copy_from(&r);
        t.fixed_view_mut::<2, 2>(offset + 3, offset + 3)
            .copy_from(&r.fixed_view::<2, 2>(0, 0));
    }

    t
}

/// Build the 20x20 local-to-material transformation matrix
///
/// `(c, s)` are the components of the material x-axis in the element's
/// (e1, e2) basis. Both in-plane slot pairs (tx, ty) and (rx, ry) are rotated;
/// the out-of-plane translation is left alone.
pub fn material_transformation_matrix(c: f64, s: f64) -> Mat20 {
    let r = Mat2::new(c, s, -s, c);
    let mut t = Mat20::zeros();

    for node in 0..NODES_PER_ELEMENT {
        let offset = node * DOFS_PER_NODE;
        t.fixed_view_mut::<2, 2>(offset, offset).copy_from(&r);
        t[(offset + 2, offset + 2)] = 1.0;
        t.fixed_view_mut::<2, 2>(offset + 3, offset + 3).copy_from(&r);
    }

    t
}

/// Rows of `k` whose entries are all within `tolerance` of zero
pub fn zero_rows(k: &Mat, tolerance: f64) -> Vec<usize> {
    k.row_iter()
        .enumerate()
        .filter(|(_, row)| row.iter().all(|v| v.abs() <= tolerance))
        .map(|(i, _)| i)
        .collect()
}

/// Column whose LU pivot vanished during a solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeakPivot {
    pub column: usize,
    pub pivot: f64,
}

/// First LU pivot whose magnitude is at most `pivot_tolerance` times the
/// largest pivot
///
/// Partial pivoting only swaps rows, so pivot `i` belongs to column `i` of
/// the input matrix.
fn weak_pivot_of(lu: &LU<f64, Dyn, Dyn>, pivot_tolerance: f64) -> Option<WeakPivot> {
    let diagonal = lu.u().diagonal();
    let largest = diagonal.amax();

    diagonal
        .iter()
        .enumerate()
        .find(|(_, p)| p.abs() <= pivot_tolerance * largest)
        .map(|(column, pivot)| WeakPivot {
            column,
            pivot: *pivot,
        })
}

/// Factorize `a` and report its first vanishing pivot, if any
pub fn find_weak_pivot(a: &Mat, pivot_tolerance: f64) -> Option<WeakPivot> {
    weak_pivot_of(&a.clone().lu(), pivot_tolerance)
}

/// Solve a linear system using LU decomposition with partial pivoting
///
/// A vanishing pivot is reported instead of producing a solution.
pub fn solve_linear_system(a: &Mat, b: &Vector, pivot_tolerance: f64) -> Result<Vector, WeakPivot> {
    let lu = a.clone().lu();
    if let Some(weak) = weak_pivot_of(&lu, pivot_tolerance) {
        return Err(weak);
    }

    lu.solve(b).ok_or_else(|| smallest_pivot(&lu))
}

/// Pivot of smallest magnitude; the zero pivot that stopped back substitution
fn smallest_pivot(lu: &LU<f64, Dyn, Dyn>) -> WeakPivot {
    let (column, pivot) = lu
        .u()
        .diagonal()
        .iter()
        .copied()
        .enumerate()
        .min_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
        .unwrap_or((0, 0.0));
    WeakPivot { column, pivot }
}
