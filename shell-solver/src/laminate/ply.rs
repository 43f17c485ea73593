//! Single lamina of a laminate

use serde::{Deserialize, Serialize};

use super::material::Material;
use crate::error::{ShellError, ShellResult};
use crate::math::{Mat2, Mat3};

/// A ply: material, thickness and fibre angle
///
/// The reduced stiffness in ply axes and its rotation into laminate axes are
/// computed when the ply is built; a ply is immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PlyFields", into = "PlyFields")]
pub struct Ply {
    material: Material,
    thickness: f64,
    rotation_angle: f64,
    q: Mat3,
    q_bar: Mat3,
    q_shear: Mat2,
    q_shear_bar: Mat2,
}

#[derive(Serialize, Deserialize)]
struct PlyFields {
    material: Material,
    thickness: f64,
    rotation_angle: f64,
}

impl TryFrom<PlyFields> for Ply {
    type Error = ShellError;

    fn try_from(fields: PlyFields) -> ShellResult<Self> {
        Ply::new(fields.material, fields.thickness, fields.rotation_angle)
    }
}

impl From<Ply> for PlyFields {
    fn from(ply: Ply) -> Self {
        PlyFields {
            material: ply.material,
            thickness: ply.thickness,
            rotation_angle: ply.rotation_angle,
        }
    }
}

impl Ply {
    /// Create a ply; `rotation_angle` is in radians
    pub fn new(material: Material, thickness: f64, rotation_angle: f64) -> ShellResult<Self> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(ShellError::Configuration(format!(
                "ply of '{}': thickness must be positive, got {thickness}",
                material.name
            )));
        }
        material.validate()?;

        let q = reduced_stiffness(&material);
        let q_bar = stress_to_laminate(rotation_angle) * q * strain_to_ply(rotation_angle);
        let q_shear = Mat2::new(material.g_31, 0.0, 0.0, material.g_32);
        let r = shear_rotation(rotation_angle);
        let q_shear_bar = r.transpose() * q_shear * r;

        Ok(Self {
            material,
            thickness,
            rotation_angle,
            q,
            q_bar,
            q_shear,
            q_shear_bar,
        })
    }

    /// Create a ply with the fibre angle given in degrees
    pub fn with_degrees(material: Material, thickness: f64, degrees: f64) -> ShellResult<Self> {
        Self::new(material, thickness, degrees.to_radians())
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Fibre angle in radians
    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    /// Reduced stiffness in ply axes
    pub fn q(&self) -> &Mat3 {
        &self.q
    }

    /// Reduced stiffness rotated into laminate axes
    pub fn q_bar(&self) -> &Mat3 {
        &self.q_bar
    }

    /// Transverse shear stiffness (γxz, γyz) in ply axes
    pub fn q_shear(&self) -> &Mat2 {
        &self.q_shear
    }

    /// Transverse shear stiffness rotated into laminate axes
    pub fn q_shear_bar(&self) -> &Mat2 {
        &self.q_shear_bar
    }
}

/// Plane-stress reduced stiffness [Q11 Q21 0; Q21 Q22 0; 0 0 Q66]
fn reduced_stiffness(m: &Material) -> Mat3 {
    let v_12 = m.minor_poisson();
    let denom = 1.0 - v_12 * m.v_31;

    let q11 = m.e_1 / denom;
    let q22 = m.e_2 / denom;
    let q66 = m.g_31;
    let q21 = m.v_31 * m.e_2 / denom;

    Mat3::new(
        q11, q21, 0.0,
        q21, q22, 0.0,
        0.0, 0.0, q66,
    )
}

/// Stress transformation from ply to laminate axes
pub(crate) fn stress_to_laminate(alpha: f64) -> Mat3 {
    let (s, c) = alpha.sin_cos();
    let s2 = (2.0 * alpha).sin();
    Mat3::new(
        c * c,       s * s,       -s2,
        s * s,       c * c,       s2,
        0.5 * s2,    -0.5 * s2,   (2.0 * alpha).cos(),
    )
}

/// Engineering-strain transformation from laminate to ply axes
pub(crate) fn strain_to_ply(alpha: f64) -> Mat3 {
    let (s, c) = alpha.sin_cos();
    let s2 = (2.0 * alpha).sin();
    Mat3::new(
        c * c,   s * s,   0.5 * s2,
        s * s,   c * c,   -0.5 * s2,
        -s2,     s2,      (2.0 * alpha).cos(),
    )
}

/// Rotation of the transverse shear strain pair (γxz, γyz) into ply axes
fn shear_rotation(alpha: f64) -> Mat2 {
    let (s, c) = alpha.sin_cos();
    Mat2::new(c, s, -s, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_reduced_stiffness_terms() {
        let mat = Material::carbon_epoxy();
        let ply = Ply::new(mat.clone(), 0.125, 0.0).unwrap();
        let v_12 = mat.e_2 / mat.e_1 * mat.v_31;
        let denom = 1.0 - v_12 * mat.v_31;

        assert_relative_eq!(ply.q()[(0, 0)], mat.e_1 / denom, max_relative = 1e-12);
        assert_relative_eq!(ply.q()[(1, 1)], mat.e_2 / denom, max_relative = 1e-12);
        assert_relative_eq!(ply.q()[(0, 1)], mat.v_31 * mat.e_2 / denom, max_relative = 1e-12);
        assert_eq!(ply.q()[(0, 2)], 0.0);
        assert_eq!(ply.q()[(2, 2)], mat.g_31);
    }

    #[test]
    fn test_zero_angle_leaves_stiffness_unchanged() {
        let ply = Ply::new(Material::carbon_epoxy(), 0.125, 0.0).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(ply.q_bar()[(i, j)], ply.q()[(i, j)], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_ninety_degrees_swaps_axes() {
        let ply = Ply::new(Material::carbon_epoxy(), 0.125, FRAC_PI_2).unwrap();
        let q = ply.q();
        let qb = ply.q_bar();
        assert_relative_eq!(qb[(0, 0)], q[(1, 1)], max_relative = 1e-9);
        assert_relative_eq!(qb[(1, 1)], q[(0, 0)], max_relative = 1e-9);
        assert_relative_eq!(qb[(2, 2)], q[(2, 2)], max_relative = 1e-9);
        assert_relative_eq!(ply.q_shear_bar()[(0, 0)], ply.q_shear()[(1, 1)], max_relative = 1e-9);
    }

    #[test]
    fn test_q_bar_symmetric_at_off_axis_angle() {
        let ply = Ply::with_degrees(Material::glass_epoxy(), 0.2, 30.0).unwrap();
        let qb = ply.q_bar();
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(qb[(i, j)], qb[(j, i)], max_relative = 1e-9, epsilon = 1e-6);
            }
        }
        // off-axis plies couple normal and shear terms
        assert!(qb[(0, 2)].abs() > 1.0);
    }

    #[test]
    fn test_thickness_must_be_positive() {
        assert!(matches!(
            Ply::new(Material::carbon_epoxy(), 0.0, 0.0),
            Err(ShellError::Configuration(_))
        ));
        assert!(Ply::new(Material::carbon_epoxy(), -0.1, 0.0).is_err());
    }
}
