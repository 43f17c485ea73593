//! Degree-of-freedom bookkeeping shared by nodes, elements and the structure

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of generalized DOFs carried by every node
pub const DOFS_PER_NODE: usize = 5;

/// Number of nodes of a shell element
pub const NODES_PER_ELEMENT: usize = 4;

/// Number of DOFs of a shell element
pub const DOFS_PER_ELEMENT: usize = DOFS_PER_NODE * NODES_PER_ELEMENT;

/// Positional DOF slot of a node
///
/// The order (tx, ty, tz, rx, ry) is a hard contract: loads, constraints,
/// displacements and element matrices are all indexed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DofSlot {
    /// Translation along x
    Tx,
    /// Translation along y
    Ty,
    /// Translation along z
    Tz,
    /// Rotation about local x
    Rx,
    /// Rotation about local y
    Ry,
}

impl DofSlot {
    /// All slots in positional order
    pub const ALL: [DofSlot; DOFS_PER_NODE] =
        [DofSlot::Tx, DofSlot::Ty, DofSlot::Tz, DofSlot::Rx, DofSlot::Ry];

    /// Position of the slot within a node's 5-vector
    pub fn index(self) -> usize {
        match self {
            DofSlot::Tx => 0,
            DofSlot::Ty => 1,
            DofSlot::Tz => 2,
            DofSlot::Rx => 3,
            DofSlot::Ry => 4,
        }
    }

    /// Slot at a position, if in range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short label used in diagnostics
    pub fn label(self) -> &'static str {
        match self {
            DofSlot::Tx => "tx",
            DofSlot::Ty => "ty",
            DofSlot::Tz => "tz",
            DofSlot::Rx => "rx",
            DofSlot::Ry => "ry",
        }
    }
}

impl fmt::Display for DofSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable handle of a node inside a [`Structure`](crate::structure::Structure)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// Handle of an element inside a [`Structure`](crate::structure::Structure)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Global equation numbers of a node's slots; `None` marks a fixed slot
pub type DofNumbers = [Option<usize>; DOFS_PER_NODE];
