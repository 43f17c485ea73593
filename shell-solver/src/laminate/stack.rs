//! Laminate - ordered ply stack and its ABD constitutive matrix

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ply::Ply;
use crate::error::{ShellError, ShellResult};
use crate::math::{Mat2, Mat3, Mat6};

/// Shear correction factor for the transverse shear stiffness
pub const SHEAR_CORRECTION: f64 = 5.0 / 6.0;

/// A stack of plies, listed from top to bottom
///
/// A, B, D and H are recomputed every time the stack changes, so the
/// accessors always describe the current layup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "LayupFields", into = "LayupFields")]
pub struct Laminate {
    plies: Vec<Ply>,
    thickness: f64,
    z_coords: Vec<f64>,
    a: Mat3,
    b: Mat3,
    d: Mat3,
    h: Mat2,
    abd: Mat6,
}

#[derive(Serialize, Deserialize)]
struct LayupFields {
    plies: Vec<Ply>,
}

impl From<LayupFields> for Laminate {
    fn from(fields: LayupFields) -> Self {
        Laminate::new(fields.plies)
    }
}

impl From<Laminate> for LayupFields {
    fn from(laminate: Laminate) -> Self {
        LayupFields { plies: laminate.plies }
    }
}

impl Laminate {
    /// Build a laminate from plies in top-to-bottom order
    pub fn new(plies: Vec<Ply>) -> Self {
        let mut laminate = Self {
            plies,
            thickness: 0.0,
            z_coords: Vec::new(),
            a: Mat3::zeros(),
            b: Mat3::zeros(),
            d: Mat3::zeros(),
            h: Mat2::zeros(),
            abd: Mat6::zeros(),
        };
        laminate.update_properties();
        laminate
    }

    /// Append a ply at the bottom of the stack
    pub fn add_ply(&mut self, ply: Ply) {
        self.plies.push(ply);
        self.update_properties();
    }

    /// Remove and return the ply at `index`
    pub fn remove_ply(&mut self, index: usize) -> ShellResult<Ply> {
        if index >= self.plies.len() {
            return Err(ShellError::PlyIndexOutOfRange {
                index,
                len: self.plies.len(),
            });
        }
        let ply = self.plies.remove(index);
        self.update_properties();
        Ok(ply)
    }

    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    pub fn len(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    /// Total thickness
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Interface coordinates z0..zn measured from the midplane
    pub fn z_coords(&self) -> &[f64] {
        &self.z_coords
    }

    /// In-plane stiffness A
    pub fn a(&self) -> &Mat3 {
        &self.a
    }

    /// Membrane-bending coupling B
    pub fn b(&self) -> &Mat3 {
        &self.b
    }

    /// Bending stiffness D
    pub fn d(&self) -> &Mat3 {
        &self.d
    }

    /// Assembled [[A, B], [B, D]]
    pub fn abd(&self) -> &Mat6 {
        &self.abd
    }

    /// Transverse shear stiffness H for (γxz, γyz), including [`SHEAR_CORRECTION`]
    pub fn transverse_shear(&self) -> &Mat2 {
        &self.h
    }

    /// True when B vanishes relative to A and D
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let scale = (self.a.amax() * self.d.amax()).sqrt();
        scale == 0.0 || self.b.amax() <= tolerance * scale
    }

    fn update_properties(&mut self) {
        self.thickness = self.plies.iter().map(Ply::thickness).sum();

        let mut z = -self.thickness / 2.0;
        self.z_coords = Vec::with_capacity(self.plies.len() + 1);
        self.z_coords.push(z);
        for ply in &self.plies {
            z += ply.thickness();
            self.z_coords.push(z);
        }

        let mut a = Mat3::zeros();
        let mut b = Mat3::zeros();
        let mut d = Mat3::zeros();
        let mut h = Mat2::zeros();

        for (k, ply) in self.plies.iter().enumerate() {
            let z0 = self.z_coords[k];
            let z1 = self.z_coords[k + 1];
            let q_bar = ply.q_bar();

            a += q_bar * (z1 - z0);
            b += q_bar * (0.5 * (z1 * z1 - z0 * z0));
            d += q_bar * ((z1.powi(3) - z0.powi(3)) / 3.0);
            h += ply.q_shear_bar() * (SHEAR_CORRECTION * (z1 - z0));
        }

        let mut abd = Mat6::zeros();
        abd.fixed_view_mut::<3, 3>(0, 0).copy_from(&a);
        abd.fixed_view_mut::<3, 3>(0, 3).copy_from(&b);
        abd.fixed_view_mut::<3, 3>(3, 0).copy_from(&b);
        abd.fixed_view_mut::<3, 3>(3, 3).copy_from(&d);

        self.a = a;
        self.b = b;
        self.d = d;
        self.h = h;
        self.abd = abd;
    }
}

impl Default for Laminate {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Display for Laminate {
    /// Layup table: ply number, material, thickness in mm, angle in degrees
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ply | Material | Thickness | Angle")?;
        writeln!(f, "-----------------------------------")?;
        for (i, ply) in self.plies.iter().enumerate() {
            writeln!(
                f,
                "{} | {} | {} | {:.1}",
                i + 1,
                ply.material().name,
                ply.thickness(),
                ply.rotation_angle().to_degrees()
            )?;
        }
        write!(f, "-----------------------------------")
    }
}
