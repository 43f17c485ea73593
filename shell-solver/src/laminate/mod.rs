//! Composite constitutive layer: lamina materials, plies and laminates

mod material;
mod ply;
mod stack;

pub use material::Material;
pub use ply::Ply;
pub use stack::{Laminate, SHEAR_CORRECTION};
