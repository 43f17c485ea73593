//! Shell Solver - A native Rust laminated flat-shell FEA library
//!
//! This library provides linear static analysis of structures built from flat
//! 4-node composite shell elements:
//! - Orthotropic ply materials and classical laminate theory (ABD matrix)
//! - Transverse shear stiffness with a shear correction factor
//! - 5 DOFs per node (three translations, two bending rotations)
//! - Direct-stiffness assembly and dense LU solve
//! - Singularity diagnostics naming the offending node and DOF
//!
//! ## Example
//! ```rust
//! use shell_solver::prelude::*;
//!
//! // Layup [0/90]s of carbon/epoxy
//! let plies = [0.0, 90.0, 90.0, 0.0]
//!     .iter()
//!     .map(|&deg| Ply::with_degrees(Material::carbon_epoxy(), 0.125, deg))
//!     .collect::<ShellResult<Vec<_>>>()
//!     .unwrap();
//! let laminate = Laminate::new(plies);
//!
//! let mut structure = Structure::new();
//!
//! // Add nodes
//! let n1 = structure.add_node(0.0, 0.0, 0.0);
//! let n2 = structure.add_node(10.0, 0.0, 0.0);
//! let n3 = structure.add_node(10.0, 10.0, 0.0);
//! let n4 = structure.add_node(0.0, 10.0, 0.0);
//!
//! // Add element, fibres along global X
//! structure.add_element(ShellElement::new([n1, n2, n3, n4], Vec3::x(), &laminate));
//!
//! // Clamp one edge and load the other
//! structure.set_constraint(n1, Constraint::fixed()).unwrap();
//! structure.set_constraint(n4, Constraint::fixed()).unwrap();
//! structure.set_force(n2, Force::fz(-5.0)).unwrap();
//! structure.set_force(n3, Force::fz(-5.0)).unwrap();
//!
//! // Analyze
//! structure.solve().unwrap();
//!
//! // Get results
//! let displacement = structure.node_displacement(n2).unwrap();
//! assert!(displacement.dz < 0.0);
//! ```

pub mod analysis;
pub mod config;
pub mod elements;
pub mod error;
pub mod laminate;
pub mod loads;
pub mod math;
pub mod results;
pub mod structure;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::SolverOptions;
    pub use crate::config::{LaminateRecord, MaterialLibrary, PlyRecord};
    pub use crate::elements::{
        Constraint, DofSlot, ElementId, Node, NodeId, ShellElement, ShellFormulation,
        ShellSection,
    };
    pub use crate::error::{ErrorCategory, ShellError, ShellResult};
    pub use crate::laminate::{Laminate, Material, Ply};
    pub use crate::loads::Force;
    pub use crate::math::Vec3;
    pub use crate::results::{AnalysisSummary, ElementStrain, NodeDisplacement, UnconstrainedDof};
    pub use crate::structure::Structure;
}
