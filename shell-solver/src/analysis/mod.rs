//! Solver options

use serde::{Deserialize, Serialize};

use crate::error::{ShellError, ShellResult};

/// Options for the linear static solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    /// LU pivots at or below this fraction of the largest pivot count as zero
    pub pivot_tolerance: f64,
    /// Stiffness rows whose entries are all at or below this magnitude count as empty
    pub zero_row_tolerance: f64,
    /// Run the singularity diagnostic before solving
    pub check_singularity: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1e-12,
            zero_row_tolerance: 0.0,
            check_singularity: true,
        }
    }
}

impl SolverOptions {
    /// Set the relative pivot tolerance
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Set the absolute zero-row tolerance
    pub fn with_zero_row_tolerance(mut self, tol: f64) -> Self {
        self.zero_row_tolerance = tol;
        self
    }

    /// Skip the zero-row scan; a vanishing pivot is still reported
    pub fn without_singularity_check(mut self) -> Self {
        self.check_singularity = false;
        self
    }

    /// Reject negative or NaN tolerances
    pub fn validate(&self) -> ShellResult<()> {
        for (name, value) in [
            ("pivot_tolerance", self.pivot_tolerance),
            ("zero_row_tolerance", self.zero_row_tolerance),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ShellError::Configuration(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
