//! Configuration records for materials and layups
//!
//! Records are plain JSON documents supplied by the model builder:
//!
//! ```json
//! { "materials": [ { "name": "CFRP", "E_1": 135000.0, ... } ] }
//! { "plies": [ { "material": "CFRP", "thickness": 0.125, "rotation_angle": 0.0 } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ShellError, ShellResult};
use crate::laminate::{Laminate, Material, Ply};

/// Named collection of lamina materials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialLibrary {
    materials: HashMap<String, Material>,
}

#[derive(Deserialize)]
struct LibraryRecord {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material under its own name
    pub fn add(&mut self, material: Material) -> ShellResult<()> {
        material.validate()?;
        if self.materials.contains_key(&material.name) {
            return Err(ShellError::Configuration(format!(
                "duplicate material name '{}'",
                material.name
            )));
        }
        self.materials.insert(material.name.clone(), material);
        Ok(())
    }

    pub fn get(&self, name: &str) -> ShellResult<&Material> {
        self.materials
            .get(name)
            .ok_or_else(|| ShellError::Configuration(format!("material '{name}' not found")))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Parse a `{ "materials": [...] }` record
    pub fn from_json_str(json: &str) -> ShellResult<Self> {
        let record: LibraryRecord = serde_json::from_str(json)
            .map_err(|e| ShellError::Configuration(format!("material library: {e}")))?;
        let mut library = Self::new();
        for material in record.materials {
            library.add(material)?;
        }
        Ok(library)
    }

    /// Read a material library from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> ShellResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// One ply of a layup record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyRecord {
    /// Name of a material in the library
    pub material: String,
    /// Ply thickness
    pub thickness: f64,
    /// Fibre angle in radians
    #[serde(default)]
    pub rotation_angle: f64,
}

/// A layup: plies from top to bottom
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaminateRecord {
    pub plies: Vec<PlyRecord>,
}

impl LaminateRecord {
    pub fn from_json_str(json: &str) -> ShellResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ShellError::Configuration(format!("laminate record: {e}")))
    }

    /// Resolve material names and build the laminate
    pub fn build(&self, library: &MaterialLibrary) -> ShellResult<Laminate> {
        let plies = self
            .plies
            .iter()
            .map(|p| Ply::new(library.get(&p.material)?.clone(), p.thickness, p.rotation_angle))
            .collect::<ShellResult<Vec<_>>>()?;
        Ok(Laminate::new(plies))
    }
}
