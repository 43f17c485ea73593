//! Error types for the shell solver

use thiserror::Error;

use crate::elements::{DofSlot, NodeId};
use crate::results::UnconstrainedDof;

/// Broad classification of a [`ShellError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Degenerate or inverted element geometry
    Geometry,
    /// Inconsistent model: bad indices, missing supports, stale state
    Model,
    /// Malformed material or laminate configuration record
    Configuration,
}

/// Main error type for shell solver operations
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Element {element}: non-positive Jacobian determinant {det:.6e} at Gauss point {point}")]
    NonPositiveJacobian { element: usize, point: usize, det: f64 },

    #[error("Element {element}: degenerate geometry ({reason})")]
    DegenerateElement { element: usize, reason: String },

    #[error("Ply index {index} out of range for laminate with {len} plies")]
    PlyIndexOutOfRange { index: usize, len: usize },

    #[error("Model is under-constrained: {}", format_dofs(.0))]
    UnderConstrained(Vec<UnconstrainedDof>),

    #[error("Singular stiffness matrix at DOF {dof} (node {node}, slot {slot}), pivot {pivot:.3e}")]
    SingularMatrix {
        node: NodeId,
        slot: DofSlot,
        dof: usize,
        pivot: f64,
    },

    #[error("Node {0} not found in structure")]
    NodeNotFound(NodeId),

    #[error("Element {0} not found in structure")]
    ElementNotFound(usize),

    #[error("Structure not assembled - run assemble_global_stiffness_matrix() first")]
    NotAssembled,

    #[error("Structure not solved - run solve() first")]
    NotSolved,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellError {
    /// Classify the error for callers that only care about its broad kind
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NonPositiveJacobian { .. } | Self::DegenerateElement { .. } => {
                ErrorCategory::Geometry
            }
            Self::Configuration(_) | Self::Io(_) => ErrorCategory::Configuration,
            _ => ErrorCategory::Model,
        }
    }
}

fn format_dofs(dofs: &[UnconstrainedDof]) -> String {
    dofs.iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for shell solver operations
pub type ShellResult<T> = Result<T, ShellError>;
