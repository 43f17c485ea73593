//! Nodal forces - loads applied directly to node DOFs

use serde::{Deserialize, Serialize};

use crate::elements::{DofSlot, DOFS_PER_NODE};

/// A load applied to a node, in global directions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Force in X direction
    pub fx: f64,
    /// Force in Y direction
    pub fy: f64,
    /// Force in Z direction
    pub fz: f64,
    /// Moment about X axis
    pub mx: f64,
    /// Moment about Y axis
    pub my: f64,
}

impl Force {
    /// Create a new force with all components
    pub fn new(fx: f64, fy: f64, fz: f64, mx: f64, my: f64) -> Self {
        Self { fx, fy, fz, mx, my }
    }

    /// Create a force-only load
    pub fn force(fx: f64, fy: f64, fz: f64) -> Self {
        Self::new(fx, fy, fz, 0.0, 0.0)
    }

    /// Create a moment-only load
    pub fn moment(mx: f64, my: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, mx, my)
    }

    /// Create a load in X direction
    pub fn fx(value: f64) -> Self {
        Self::force(value, 0.0, 0.0)
    }

    /// Create a load in Y direction
    pub fn fy(value: f64) -> Self {
        Self::force(0.0, value, 0.0)
    }

    /// Create a load in Z direction
    pub fn fz(value: f64) -> Self {
        Self::force(0.0, 0.0, value)
    }

    /// Get the load as an array [FX, FY, FZ, MX, MY]
    pub fn as_array(&self) -> [f64; DOFS_PER_NODE] {
        [self.fx, self.fy, self.fz, self.mx, self.my]
    }

    /// Component acting on a DOF slot
    pub fn component(&self, slot: DofSlot) -> f64 {
        self.as_array()[slot.index()]
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            fx: self.fx * factor,
            fy: self.fy * factor,
            fz: self.fz * factor,
            mx: self.mx * factor,
            my: self.my * factor,
        }
    }

    /// True when every component is exactly zero
    pub fn is_zero(&self) -> bool {
        self.as_array().iter().all(|c| *c == 0.0)
    }
}

impl Default for Force {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }
}
