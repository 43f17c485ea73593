//! Result types for shell analysis

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::elements::{DofSlot, NodeId, DOFS_PER_NODE};

/// Displacement results at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction
    pub dz: f64,
    /// First bending rotation
    pub rx: f64,
    /// Second bending rotation
    pub ry: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ, RX, RY]
    pub fn from_array(arr: [f64; DOFS_PER_NODE]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
        }
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }

    /// Get rotation magnitude
    pub fn rotation_magnitude(&self) -> f64 {
        (self.rx.powi(2) + self.ry.powi(2)).sqrt()
    }
}

/// Element strains averaged over the Gauss points, in material axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStrain {
    /// Midplane strains (εxx, εyy, γxy)
    pub membrane: [f64; 3],
    /// Curvatures (κxx, κyy, κxy)
    pub curvature: [f64; 3],
    /// Transverse shear strains (γxz, γyz)
    pub transverse_shear: [f64; 2],
}

impl ElementStrain {
    /// Generalized strain vector (εxx, εyy, γxy, κxx, κyy, κxy)
    pub fn generalized(&self) -> [f64; 6] {
        let [exx, eyy, gxy] = self.membrane;
        let [kxx, kyy, kxy] = self.curvature;
        [exx, eyy, gxy, kxx, kyy, kxy]
    }

    /// Strain (εxx, εyy, γxy) at distance `z` from the midplane
    pub fn at_height(&self, z: f64) -> [f64; 3] {
        std::array::from_fn(|i| self.membrane[i] + z * self.curvature[i])
    }

    /// Principal midplane strains (ε1, ε2), ε1 >= ε2
    pub fn principal_membrane(&self) -> (f64, f64) {
        let [exx, eyy, gxy] = self.membrane;
        let e_avg = (exx + eyy) / 2.0;
        let r = ((exx - eyy).powi(2) / 4.0 + (gxy / 2.0).powi(2)).sqrt();
        (e_avg + r, e_avg - r)
    }
}

/// A free DOF with no stiffness, reported by the singularity check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnconstrainedDof {
    pub node: NodeId,
    pub slot: DofSlot,
    /// Global equation number
    pub dof: usize,
}

impl fmt::Display for UnconstrainedDof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} (dof {})", self.node, self.slot, self.dof)
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Maximum translation magnitude
    pub max_displacement: f64,
    /// Node with maximum translation
    pub max_disp_node: Option<NodeId>,
    /// Total number of nodes in the structure
    pub num_nodes: usize,
    /// Nodes referenced by at least one element
    pub num_active_nodes: usize,
    /// Total number of shell elements
    pub num_elements: usize,
    /// Total DOFs of the active nodes
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
}
