//! Node element - represents a point in 3D space carrying five DOFs

use serde::{Deserialize, Serialize};

use super::constraint::Constraint;
use super::dof::{DofNumbers, NodeId, DOFS_PER_NODE};
use crate::loads::Force;
use crate::math::Vec3;

/// A node of the shell model
///
/// Nodes live in the arena of a [`Structure`](crate::structure::Structure)
/// and are referenced by elements through their [`NodeId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub(crate) id: NodeId,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
    /// Free/fixed mask
    pub constraint: Constraint,
    /// Applied load
    pub force: Force,

    /// Global equation numbers, assigned during DOF numbering
    #[serde(skip)]
    pub(crate) dof_numbers: DofNumbers,

    /// Displacement [DX, DY, DZ, RX, RY] from the last solve
    #[serde(skip)]
    pub(crate) displacement: [f64; DOFS_PER_NODE],
}

impl Node {
    pub(crate) fn new(id: NodeId, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            x,
            y,
            z,
            constraint: Constraint::default(),
            force: Force::default(),
            dof_numbers: [None; DOFS_PER_NODE],
            displacement: [0.0; DOFS_PER_NODE],
        }
    }

    /// Handle of this node in its structure
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Get the position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        (other.position() - self.position()).norm()
    }

    /// Displacement [DX, DY, DZ, RX, RY] from the last solve
    pub fn displacement(&self) -> [f64; DOFS_PER_NODE] {
        self.displacement
    }

    /// Global equation numbers from the last DOF numbering
    pub fn dof_numbers(&self) -> DofNumbers {
        self.dof_numbers
    }

    /// Current position plus the translational displacement
    pub fn calculate_new_position(&self) -> [f64; 3] {
        let d = self.displacement;
        [self.x + d[0], self.y + d[1], self.z + d[2]]
    }

    /// Displaced position; equals [`Node::coords`] when no solution is held
    pub fn displaced_position(&self) -> [f64; 3] {
        self.calculate_new_position()
    }

    /// True if at least one slot is restrained
    pub fn check_constraints(&self) -> bool {
        self.constraint.is_supported()
    }

    /// True if any load component is nonzero
    pub fn check_forces(&self) -> bool {
        !self.force.is_zero()
    }

    /// Assign equation numbers to the free slots starting at `start`;
    /// returns the next unused number
    pub(crate) fn enumerate_dofs(&mut self, start: usize) -> usize {
        let mut next = start;
        for (number, free) in self.dof_numbers.iter_mut().zip(self.constraint.as_array()) {
            if free {
                *number = Some(next);
                next += 1;
            } else {
                *number = None;
            }
        }
        next
    }

    pub(crate) fn set_displacement(&mut self, displacement: [f64; DOFS_PER_NODE]) {
        self.displacement = displacement;
    }

    /// Drop results of a previous solve
    pub(crate) fn clear_results(&mut self) {
        self.displacement = [0.0; DOFS_PER_NODE];
    }
}
