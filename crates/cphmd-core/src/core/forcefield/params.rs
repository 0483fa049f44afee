use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Local-frame definition of an atomic multipole.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MultipoleFrame {
    ZThenX,
    Bisector,
    ZThenBisector,
    ThreeFold,
    ZOnly,
    #[default]
    None,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AtomTypeParam {
    pub class: u32,
    pub atomic_number: u8,
    #[serde(default)]
    pub description: String,
}

/// Charge, dipole (3) and traceless quadrupole (6) coefficients in the local frame.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MultipoleParam {
    #[serde(default)]
    pub frame: MultipoleFrame,
    pub coefficients: [f64; 10],
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct PolarizeParam {
    pub polarizability: f64,
    #[serde(default)]
    pub thole: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct VdwParam {
    pub radius: f64,
    pub well_depth: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SoluteParam {
    pub radius: f64,
}

/// Force-field parameter store queried when the titration state tables are built.
///
/// Every table is keyed by strings in the file (TOML table keys are strings) and by
/// integers in code: `residue_cb` maps a residue three-letter code to the biotype of its
/// CB atom, `biotypes` maps a biotype to an atom type, `atom_types` / `multipoles` /
/// `polarize` / `solute` are keyed by atom type and `vdw` by atom class.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ForceField {
    #[serde(default)]
    pub residue_cb: HashMap<String, u32>,
    #[serde(default)]
    pub biotypes: HashMap<String, u32>,
    #[serde(default)]
    pub atom_types: HashMap<String, AtomTypeParam>,
    #[serde(default)]
    pub multipoles: HashMap<String, MultipoleParam>,
    #[serde(default)]
    pub polarize: HashMap<String, PolarizeParam>,
    #[serde(default)]
    pub vdw: HashMap<String, VdwParam>,
    #[serde(default)]
    pub solute: HashMap<String, SoluteParam>,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl ForceField {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn residue_cb_biotype(&self, residue_code: &str) -> Option<u32> {
        self.residue_cb.get(residue_code).copied()
    }

    pub fn atom_type_of_biotype(&self, biotype: u32) -> Option<u32> {
        self.biotypes.get(&biotype.to_string()).copied()
    }

    pub fn atom_type(&self, atom_type: u32) -> Option<&AtomTypeParam> {
        self.atom_types.get(&atom_type.to_string())
    }

    pub fn multipole(&self, atom_type: u32) -> Option<&MultipoleParam> {
        self.multipoles.get(&atom_type.to_string())
    }

    pub fn polarize(&self, atom_type: u32) -> Option<&PolarizeParam> {
        self.polarize.get(&atom_type.to_string())
    }

    pub fn vdw(&self, atom_class: u32) -> Option<&VdwParam> {
        self.vdw.get(&atom_class.to_string())
    }

    pub fn solute(&self, atom_type: u32) -> Option<&SoluteParam> {
        self.solute.get(&atom_type.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const SAMPLE_TOML: &str = r#"
        [residue_cb]
        ASP = 100

        [biotypes]
        100 = 12

        [atom_types.12]
        class = 8
        atomic_number = 6
        description = "Asp CB"

        [multipoles.12]
        frame = "z_then_x"
        coefficients = [-0.1, 0.0, 0.0, 0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]

        [polarize.12]
        polarizability = 1.334
        thole = 0.39

        [vdw.8]
        radius = 3.82
        well_depth = 0.101

        [solute.12]
        radius = 1.7
    "#;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_parses_all_tables() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "ff.toml", SAMPLE_TOML);
        let ff = ForceField::load(&path).unwrap();

        assert_eq!(ff.residue_cb_biotype("ASP"), Some(100));
        assert_eq!(ff.atom_type_of_biotype(100), Some(12));
        let atom_type = ff.atom_type(12).unwrap();
        assert_eq!(atom_type.class, 8);
        assert_eq!(atom_type.atomic_number, 6);
        let multipole = ff.multipole(12).unwrap();
        assert_eq!(multipole.frame, MultipoleFrame::ZThenX);
        assert_eq!(multipole.coefficients[0], -0.1);
        assert_eq!(ff.polarize(12).unwrap().polarizability, 1.334);
        assert_eq!(ff.vdw(8).unwrap().well_depth, 0.101);
        assert_eq!(ff.solute(12).unwrap().radius, 1.7);
    }

    #[test]
    fn missing_tables_default_to_empty() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "ff.toml", "[residue_cb]\nLYS = 40\n");
        let ff = ForceField::load(&path).unwrap();
        assert_eq!(ff.residue_cb_biotype("LYS"), Some(40));
        assert!(ff.multipoles.is_empty());
        assert!(ff.atom_type_of_biotype(40).is_none());
    }

    #[test]
    fn load_returns_io_error_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ForceField::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ParamLoadError::Io { .. })));
    }

    #[test]
    fn load_returns_toml_error_for_invalid_content() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "bad.toml", "[multipoles.1]\ncoefficients = \"oops\"\n");
        let result = ForceField::load(&path);
        assert!(matches!(result, Err(ParamLoadError::Toml { .. })));
    }
}
