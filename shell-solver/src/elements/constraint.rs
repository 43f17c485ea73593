//! Constraint conditions

use serde::{Deserialize, Serialize};

use super::dof::{DofSlot, DOFS_PER_NODE};

/// Free/fixed mask of a node's five DOFs
///
/// `true` means the slot is free and takes part in the solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    free: [bool; DOFS_PER_NODE],
}

impl Constraint {
    /// Create a constraint from the free flags of each slot
    pub fn new(tx: bool, ty: bool, tz: bool, rx: bool, ry: bool) -> Self {
        Self {
            free: [tx, ty, tz, rx, ry],
        }
    }

    /// No restraints
    pub fn free() -> Self {
        Self::new(true, true, true, true, true)
    }

    /// All slots restrained
    pub fn fixed() -> Self {
        Self::new(false, false, false, false, false)
    }

    /// Translations restrained, rotations free
    pub fn pinned() -> Self {
        Self::new(false, false, false, true, true)
    }

    /// Restrain an additional slot
    pub fn with_fixed(mut self, slot: DofSlot) -> Self {
        self.free[slot.index()] = false;
        self
    }

    /// Release an additional slot
    pub fn with_free(mut self, slot: DofSlot) -> Self {
        self.free[slot.index()] = true;
        self
    }

    /// Whether a slot participates in the solve
    pub fn is_free(&self, slot: DofSlot) -> bool {
        self.free[slot.index()]
    }

    /// Free flags in slot order
    pub fn as_array(&self) -> [bool; DOFS_PER_NODE] {
        self.free
    }

    /// Free slots in positional order
    pub fn free_slots(&self) -> Vec<DofSlot> {
        DofSlot::ALL.into_iter().filter(|s| self.is_free(*s)).collect()
    }

    /// Restrained slots in positional order
    pub fn fixed_slots(&self) -> Vec<DofSlot> {
        DofSlot::ALL.into_iter().filter(|s| !self.is_free(*s)).collect()
    }

    /// Count of free slots
    pub fn num_free(&self) -> usize {
        self.free.iter().filter(|f| **f).count()
    }

    /// Check if any slot is restrained
    pub fn is_supported(&self) -> bool {
        self.num_free() < DOFS_PER_NODE
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::free()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_free() {
        let c = Constraint::default();
        assert_eq!(c.num_free(), 5);
        assert!(!c.is_supported());
    }

    #[test]
    fn test_pinned_constraint() {
        let c = Constraint::pinned();
        assert_eq!(c.fixed_slots(), vec![DofSlot::Tx, DofSlot::Ty, DofSlot::Tz]);
        assert_eq!(c.free_slots(), vec![DofSlot::Rx, DofSlot::Ry]);
        assert!(c.is_supported());
    }

    #[test]
    fn test_builder_flags() {
        let c = Constraint::fixed().with_free(DofSlot::Tz);
        assert!(c.is_free(DofSlot::Tz));
        assert_eq!(c.num_free(), 1);

        let c = Constraint::free().with_fixed(DofSlot::Ry);
        assert!(!c.is_free(DofSlot::Ry));
        assert_eq!(c.as_array(), [true, true, true, true, false]);
    }
}
