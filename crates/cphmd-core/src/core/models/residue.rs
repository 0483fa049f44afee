use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Amino-acid identity of a residue, including its protonation variants.
///
/// Four identities are "dynamic": they stand for a residue whose protonation state is
/// sampled by the extended system rather than fixed.
///
/// | Dynamic identity | Fixed states it covers |
/// |---|---|
/// | `ASD` | ASP, ASH |
/// | `GLD` | GLU, GLH |
/// | `HIS` | HIS (doubly protonated), HID, HIE |
/// | `LYS` | LYS, LYD |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueType {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // ALA
    Glycine,    // GLY
    Isoleucine, // ILE
    Leucine,    // LEU
    Proline,    // PRO
    Valine,     // VAL

    // --- Aromatic ---
    Phenylalanine, // PHE
    Tryptophan,    // TRP
    Tyrosine,      // TYR

    // --- Polar, Uncharged ---
    Asparagine, // ASN
    Cysteine,   // CYS
    Glutamine,  // GLN
    Serine,     // SER
    Threonine,  // THR
    Methionine, // MET
    Arginine,   // ARG

    // --- Aspartate family ---
    AsparticAcid,          // ASP - deprotonated
    AsparticAcidNeutral,   // ASH - protonated
    AsparticAcidDynamic,   // ASD - titrating

    // --- Glutamate family ---
    GlutamicAcid,        // GLU - deprotonated
    GlutamicAcidNeutral, // GLH - protonated
    GlutamicAcidDynamic, // GLD - titrating

    // --- Histidine family ---
    Histidine,        // HIS - doubly protonated, titrating
    HistidineDelta,   // HID - delta protonated
    HistidineEpsilon, // HIE - epsilon protonated

    // --- Lysine family ---
    Lysine,        // LYS - protonated, titrating
    LysineNeutral, // LYD - deprotonated

    Unknown,
}

impl ResidueType {
    /// Returns the three-letter code of the residue identity.
    pub fn to_three_letter(&self) -> &'static str {
        match self {
            Self::Alanine => "ALA",
            Self::Glycine => "GLY",
            Self::Isoleucine => "ILE",
            Self::Leucine => "LEU",
            Self::Proline => "PRO",
            Self::Valine => "VAL",
            Self::Phenylalanine => "PHE",
            Self::Tryptophan => "TRP",
            Self::Tyrosine => "TYR",
            Self::Asparagine => "ASN",
            Self::Cysteine => "CYS",
            Self::Glutamine => "GLN",
            Self::Serine => "SER",
            Self::Threonine => "THR",
            Self::Methionine => "MET",
            Self::Arginine => "ARG",
            Self::AsparticAcid => "ASP",
            Self::AsparticAcidNeutral => "ASH",
            Self::AsparticAcidDynamic => "ASD",
            Self::GlutamicAcid => "GLU",
            Self::GlutamicAcidNeutral => "GLH",
            Self::GlutamicAcidDynamic => "GLD",
            Self::Histidine => "HIS",
            Self::HistidineDelta => "HID",
            Self::HistidineEpsilon => "HIE",
            Self::Lysine => "LYS",
            Self::LysineNeutral => "LYD",
            Self::Unknown => "UNK",
        }
    }

    /// Whether a residue of this identity receives a titration lambda particle.
    pub fn is_titratable(&self) -> bool {
        matches!(
            self,
            Self::AsparticAcidDynamic | Self::GlutamicAcidDynamic | Self::Histidine | Self::Lysine
        )
    }

    /// Whether a residue of this identity additionally receives a tautomer lambda particle.
    pub fn is_tautomer(&self) -> bool {
        matches!(
            self,
            Self::AsparticAcidDynamic | Self::GlutamicAcidDynamic | Self::Histidine
        )
    }
}

impl fmt::Display for ResidueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_three_letter())
    }
}

impl FromStr for ResidueType {
    type Err = ();

    /// Parses a three-letter residue code, case-insensitively.
    ///
    /// Unrecognized codes parse to [`ResidueType::Unknown`] rather than failing, since any
    /// residue outside the titratable families is simply carried along unchanged.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let residue_type = match s.trim().to_ascii_uppercase().as_str() {
            "ALA" => Self::Alanine,
            "GLY" => Self::Glycine,
            "ILE" => Self::Isoleucine,
            "LEU" => Self::Leucine,
            "PRO" => Self::Proline,
            "VAL" => Self::Valine,
            "PHE" => Self::Phenylalanine,
            "TRP" => Self::Tryptophan,
            "TYR" => Self::Tyrosine,
            "ASN" => Self::Asparagine,
            "CYS" => Self::Cysteine,
            "GLN" => Self::Glutamine,
            "SER" => Self::Serine,
            "THR" => Self::Threonine,
            "MET" => Self::Methionine,
            "ARG" => Self::Arginine,
            "ASP" => Self::AsparticAcid,
            "ASH" => Self::AsparticAcidNeutral,
            "ASD" => Self::AsparticAcidDynamic,
            "GLU" => Self::GlutamicAcid,
            "GLH" => Self::GlutamicAcidNeutral,
            "GLD" => Self::GlutamicAcidDynamic,
            "HIS" => Self::Histidine,
            "HID" => Self::HistidineDelta,
            "HIE" => Self::HistidineEpsilon,
            "LYS" => Self::Lysine,
            "LYD" => Self::LysineNeutral,
            _ => Self::Unknown,
        };
        Ok(residue_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,                     // Residue sequence number
    pub name: String,                      // Name of the residue (e.g., "ASD", "GLY")
    pub residue_type: ResidueType,         // Protonation-aware identity
    pub(crate) atoms: Vec<usize>,          // Array indices of atoms belonging to this residue
    atom_name_map: HashMap<String, usize>, // Map from atom name to its array index
}

impl Residue {
    pub(crate) fn new(number: isize, name: &str, residue_type: ResidueType) -> Self {
        Self {
            number,
            name: name.to_string(),
            residue_type,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_index: usize) {
        self.atoms.push(atom_index);
        self.atom_name_map.insert(atom_name.to_string(), atom_index);
    }

    pub fn atoms(&self) -> &[usize] {
        &self.atoms
    }

    pub fn atom_index_by_name(&self, name: &str) -> Option<usize> {
        self.atom_name_map.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dynamic_identities_are_titratable() {
        assert!(ResidueType::AsparticAcidDynamic.is_titratable());
        assert!(ResidueType::GlutamicAcidDynamic.is_titratable());
        assert!(ResidueType::Histidine.is_titratable());
        assert!(ResidueType::Lysine.is_titratable());
    }

    #[test]
    fn fixed_protonation_states_are_not_titratable() {
        for residue_type in [
            ResidueType::AsparticAcid,
            ResidueType::AsparticAcidNeutral,
            ResidueType::GlutamicAcid,
            ResidueType::GlutamicAcidNeutral,
            ResidueType::HistidineDelta,
            ResidueType::HistidineEpsilon,
            ResidueType::LysineNeutral,
            ResidueType::Glycine,
            ResidueType::Unknown,
        ] {
            assert!(!residue_type.is_titratable(), "{residue_type} should not titrate");
            assert!(!residue_type.is_tautomer(), "{residue_type} should not tautomerize");
        }
    }

    #[test]
    fn lysine_titrates_without_tautomer() {
        assert!(ResidueType::Lysine.is_titratable());
        assert!(!ResidueType::Lysine.is_tautomer());
    }

    #[test]
    fn acids_and_histidine_have_tautomers() {
        assert!(ResidueType::AsparticAcidDynamic.is_tautomer());
        assert!(ResidueType::GlutamicAcidDynamic.is_tautomer());
        assert!(ResidueType::Histidine.is_tautomer());
    }

    #[test]
    fn from_str_is_case_insensitive_and_falls_back_to_unknown() {
        assert_eq!("asd".parse::<ResidueType>(), Ok(ResidueType::AsparticAcidDynamic));
        assert_eq!(" HIE ".parse::<ResidueType>(), Ok(ResidueType::HistidineEpsilon));
        assert_eq!("XYZ".parse::<ResidueType>(), Ok(ResidueType::Unknown));
    }

    #[test]
    fn three_letter_code_round_trips_through_from_str() {
        for code in ["ASD", "GLD", "HIS", "LYS", "LYD", "ASH", "GLH", "HID", "GLY"] {
            let residue_type: ResidueType = code.parse().unwrap();
            assert_eq!(residue_type.to_three_letter(), code);
        }
    }

    #[test]
    fn add_atom_maps_name_to_index() {
        let mut residue = Residue::new(3, "LYS", ResidueType::Lysine);
        residue.add_atom("NZ", 17);
        assert_eq!(residue.atoms(), &[17]);
        assert_eq!(residue.atom_index_by_name("NZ"), Some(17));
        assert_eq!(residue.atom_index_by_name("CA"), None);
    }
}
