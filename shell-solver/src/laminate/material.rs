//! Ply material properties
//!
//! Engineering constants of a unidirectional composite lamina. Index 1 is the
//! fibre direction, 2 the in-plane transverse direction and 3 the thickness
//! direction; `G_31` is the in-plane shear modulus and `G_32` the transverse
//! one. Record keys follow the upper-case names used by material data sheets.

use serde::{Deserialize, Serialize};

use crate::error::{ShellError, ShellResult};

/// Material properties of a single lamina
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Fibre type (e.g. "carbon", "glass")
    pub fibre_type: String,
    /// Fibre volume fraction
    pub vf: f64,
    /// Longitudinal modulus
    #[serde(rename = "E_1", alias = "e_1")]
    pub e_1: f64,
    /// Transverse modulus
    #[serde(rename = "E_2", alias = "e_2")]
    pub e_2: f64,
    /// In-plane shear modulus
    #[serde(rename = "G_31", alias = "g_31")]
    pub g_31: f64,
    /// Transverse shear modulus
    #[serde(rename = "G_32", alias = "g_32")]
    pub g_32: f64,
    /// Major Poisson ratio
    pub v_31: f64,
    /// Transverse Poisson ratio
    pub v_32: f64,
    /// Longitudinal compressive strength
    #[serde(rename = "R_1c", alias = "r_1c")]
    pub r_1c: f64,
    /// Longitudinal tensile strength
    #[serde(rename = "R_1t", alias = "r_1t")]
    pub r_1t: f64,
    /// Transverse compressive strength
    #[serde(rename = "R_2c", alias = "r_2c")]
    pub r_2c: f64,
    /// Transverse tensile strength
    #[serde(rename = "R_2t", alias = "r_2t")]
    pub r_2t: f64,
    /// In-plane shear strength
    #[serde(rename = "R_31", alias = "r_31")]
    pub r_31: f64,
    /// Transverse shear strength
    #[serde(rename = "R_32", alias = "r_32")]
    pub r_32: f64,
    /// Density
    pub roh: f64,
    /// Minor Poisson ratio as given by the data sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v_12: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_13_minus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_13_plus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_32_minus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tau_21_c: Option<f64>,
}

impl Material {
    /// Create a material from its stiffness constants; strengths are zero
    pub fn orthotropic(name: &str, e_1: f64, e_2: f64, g_31: f64, g_32: f64, v_31: f64) -> Self {
        Self {
            name: name.to_string(),
            fibre_type: String::new(),
            vf: 0.0,
            e_1,
            e_2,
            g_31,
            g_32,
            v_31,
            v_32: 0.0,
            r_1c: 0.0,
            r_1t: 0.0,
            r_2c: 0.0,
            r_2t: 0.0,
            r_31: 0.0,
            r_32: 0.0,
            roh: 0.0,
            v_12: None,
            p_13_minus: None,
            p_13_plus: None,
            p_32_minus: None,
            tau_21_c: None,
        }
    }

    /// Create a material with strength values
    pub fn with_strengths(mut self, r_1t: f64, r_1c: f64, r_2t: f64, r_2c: f64, r_31: f64, r_32: f64) -> Self {
        self.r_1t = r_1t;
        self.r_1c = r_1c;
        self.r_2t = r_2t;
        self.r_2c = r_2c;
        self.r_31 = r_31;
        self.r_32 = r_32;
        self
    }

    /// Create a material with density
    pub fn with_density(mut self, roh: f64) -> Self {
        self.roh = roh;
        self
    }

    /// Typical high-strength carbon/epoxy UD prepreg (N, mm)
    pub fn carbon_epoxy() -> Self {
        Self {
            fibre_type: "carbon".to_string(),
            vf: 0.6,
            v_32: 0.4,
            ..Self::orthotropic("CFRP", 135_000.0, 10_000.0, 5_000.0, 3_600.0, 0.3)
        }
        .with_strengths(2_000.0, 1_200.0, 50.0, 200.0, 80.0, 60.0)
        .with_density(1.55e-9)
    }

    /// Typical E-glass/epoxy UD lamina (N, mm)
    pub fn glass_epoxy() -> Self {
        Self {
            fibre_type: "glass".to_string(),
            vf: 0.55,
            v_32: 0.4,
            ..Self::orthotropic("GFRP", 40_000.0, 10_000.0, 4_000.0, 3_500.0, 0.28)
        }
        .with_strengths(1_000.0, 600.0, 30.0, 120.0, 60.0, 50.0)
        .with_density(1.9e-9)
    }

    /// Minor Poisson ratio derived from reciprocity, v_12 = E_2 / E_1 * v_31
    pub fn minor_poisson(&self) -> f64 {
        self.e_2 / self.e_1 * self.v_31
    }

    /// Parse and validate a material from a JSON record
    pub fn from_json_str(json: &str) -> ShellResult<Self> {
        let material: Material = serde_json::from_str(json)
            .map_err(|e| ShellError::Configuration(format!("material record: {e}")))?;
        material.validate()?;
        Ok(material)
    }

    /// Check that the constants describe a physically admissible lamina
    pub fn validate(&self) -> ShellResult<()> {
        let moduli = [
            ("E_1", self.e_1),
            ("E_2", self.e_2),
            ("G_31", self.g_31),
            ("G_32", self.g_32),
        ];
        for (key, value) in moduli {
            if !(value.is_finite() && value > 0.0) {
                return Err(ShellError::Configuration(format!(
                    "material '{}': {key} must be positive, got {value}",
                    self.name
                )));
            }
        }
        if 1.0 - self.minor_poisson() * self.v_31 <= 0.0 {
            return Err(ShellError::Configuration(format!(
                "material '{}': Poisson ratio v_31 = {} is not admissible",
                self.name, self.v_31
            )));
        }
        if self.roh < 0.0 {
            return Err(ShellError::Configuration(format!(
                "material '{}': negative density",
                self.name
            )));
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::carbon_epoxy()
    }
}
