use crate::core::models::residue::ResidueType;
use phf::{Map, phf_map};
use std::fmt;

/// Which tautomer an atom belongs to.
///
/// `Positive` atoms are fully present when the tautomer lambda is 1, `Negative` atoms when it
/// is 0, and `None` atoms are shared by both tautomers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TautomerDirection {
    Positive,
    Negative,
    #[default]
    None,
}

/// Static description of one named side-chain atom of a titratable family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomRoleSpec {
    pub name: &'static str,
    /// Biotype offset from the CB biotype of each state, in state order. Negative means the
    /// atom does not exist in that state.
    pub offsets: &'static [i8],
    pub tautomer_direction: TautomerDirection,
    pub titrating_hydrogen: bool,
}

const fn role(
    name: &'static str,
    offsets: &'static [i8],
    tautomer_direction: TautomerDirection,
    titrating_hydrogen: bool,
) -> AtomRoleSpec {
    AtomRoleSpec {
        name,
        offsets,
        tautomer_direction,
        titrating_hydrogen,
    }
}

use TautomerDirection::{Negative, None as Shared, Positive};

static ASPARTATE_ROLES: [AtomRoleSpec; 8] = [
    role("CB", &[0, 0, 0], Shared, false),
    role("HB2", &[1, 1, 1], Shared, false),
    role("HB3", &[1, 1, 1], Shared, false),
    role("CG", &[2, 2, 2], Shared, false),
    role("OD1", &[3, 4, 3], Shared, false),
    role("OD2", &[3, 3, 4], Shared, false),
    role("HD1", &[-1, 5, -1], Positive, true),
    role("HD2", &[-1, -1, 5], Negative, true),
];

static GLUTAMATE_ROLES: [AtomRoleSpec; 11] = [
    role("CB", &[0, 0, 0], Shared, false),
    role("HB2", &[1, 1, 1], Shared, false),
    role("HB3", &[1, 1, 1], Shared, false),
    role("CG", &[2, 2, 2], Shared, false),
    role("HG2", &[3, 3, 3], Shared, false),
    role("HG3", &[3, 3, 3], Shared, false),
    role("CD", &[4, 4, 4], Shared, false),
    role("OE1", &[5, 6, 5], Shared, false),
    role("OE2", &[5, 5, 6], Shared, false),
    role("HE1", &[-1, 7, -1], Positive, true),
    role("HE2", &[-1, -1, 7], Negative, true),
];

static HISTIDINE_ROLES: [AtomRoleSpec; 12] = [
    role("CB", &[0, 0, 0], Shared, false),
    role("HB2", &[1, 1, 1], Shared, false),
    role("HB3", &[1, 1, 1], Shared, false),
    role("CG", &[2, 2, 2], Shared, false),
    role("ND1", &[3, 3, 3], Shared, false),
    role("HD1", &[4, 4, -1], Negative, true),
    role("CD2", &[5, 5, 4], Shared, false),
    role("HD2", &[6, 6, 5], Shared, false),
    role("CE1", &[7, 7, 6], Shared, false),
    role("HE1", &[8, 8, 7], Shared, false),
    role("NE2", &[9, 9, 8], Shared, false),
    role("HE2", &[10, -1, 9], Positive, true),
];

static LYSINE_ROLES: [AtomRoleSpec; 16] = [
    role("CB", &[0, 0], Shared, false),
    role("HB2", &[1, 1], Shared, false),
    role("HB3", &[1, 1], Shared, false),
    role("CG", &[2, 2], Shared, false),
    role("HG2", &[3, 3], Shared, false),
    role("HG3", &[3, 3], Shared, false),
    role("CD", &[4, 4], Shared, false),
    role("HD2", &[5, 5], Shared, false),
    role("HD3", &[5, 5], Shared, false),
    role("CE", &[6, 6], Shared, false),
    role("HE2", &[7, 7], Shared, false),
    role("HE3", &[7, 7], Shared, false),
    role("NZ", &[8, 8], Shared, false),
    role("HZ1", &[9, 9], Shared, false),
    role("HZ2", &[9, 9], Shared, false),
    role("HZ3", &[9, -1], Shared, true),
];

static ASPARTATE_ROLE_INDEX: Map<&'static str, usize> = phf_map! {
    "CB" => 0, "HB2" => 1, "HB3" => 2, "CG" => 3, "OD1" => 4, "OD2" => 5, "HD1" => 6, "HD2" => 7,
};

static GLUTAMATE_ROLE_INDEX: Map<&'static str, usize> = phf_map! {
    "CB" => 0, "HB2" => 1, "HB3" => 2, "CG" => 3, "HG2" => 4, "HG3" => 5, "CD" => 6,
    "OE1" => 7, "OE2" => 8, "HE1" => 9, "HE2" => 10,
};

static HISTIDINE_ROLE_INDEX: Map<&'static str, usize> = phf_map! {
    "CB" => 0, "HB2" => 1, "HB3" => 2, "CG" => 3, "ND1" => 4, "HD1" => 5, "CD2" => 6,
    "HD2" => 7, "CE1" => 8, "HE1" => 9, "NE2" => 10, "HE2" => 11,
};

static LYSINE_ROLE_INDEX: Map<&'static str, usize> = phf_map! {
    "CB" => 0, "HB2" => 1, "HB3" => 2, "CG" => 3, "HG2" => 4, "HG3" => 5, "CD" => 6,
    "HD2" => 7, "HD3" => 8, "CE" => 9, "HE2" => 10, "HE3" => 11, "NZ" => 12,
    "HZ1" => 13, "HZ2" => 14, "HZ3" => 15,
};

/// A family of residues that interconvert by protonation or tautomerization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitratableFamily {
    Aspartate,
    Glutamate,
    Histidine,
    Lysine,
}

impl TitratableFamily {
    pub const ALL: [TitratableFamily; 4] = [
        TitratableFamily::Aspartate,
        TitratableFamily::Glutamate,
        TitratableFamily::Histidine,
        TitratableFamily::Lysine,
    ];

    /// Family of any member identity, fixed or dynamic.
    pub fn of(residue_type: ResidueType) -> Option<Self> {
        match residue_type {
            ResidueType::AsparticAcid
            | ResidueType::AsparticAcidNeutral
            | ResidueType::AsparticAcidDynamic => Some(Self::Aspartate),
            ResidueType::GlutamicAcid
            | ResidueType::GlutamicAcidNeutral
            | ResidueType::GlutamicAcidDynamic => Some(Self::Glutamate),
            ResidueType::Histidine
            | ResidueType::HistidineDelta
            | ResidueType::HistidineEpsilon => Some(Self::Histidine),
            ResidueType::Lysine | ResidueType::LysineNeutral => Some(Self::Lysine),
            _ => None,
        }
    }

    /// Names of the family's states, in table order.
    pub fn state_names(&self) -> &'static [&'static str] {
        match self {
            Self::Aspartate => &["ASP", "ASH1", "ASH2"],
            Self::Glutamate => &["GLU", "GLH1", "GLH2"],
            Self::Histidine => &["HIS", "HID", "HIE"],
            Self::Lysine => &["LYS", "LYD"],
        }
    }

    /// Residue code whose CB biotype is the base of each state's parameter lookups.
    pub fn state_base_residues(&self) -> &'static [&'static str] {
        match self {
            Self::Aspartate => &["ASP", "ASH", "ASH"],
            Self::Glutamate => &["GLU", "GLH", "GLH"],
            Self::Histidine => &["HIS", "HID", "HIE"],
            Self::Lysine => &["LYS", "LYD"],
        }
    }

    pub fn state_count(&self) -> usize {
        self.state_names().len()
    }

    pub fn roles(&self) -> &'static [AtomRoleSpec] {
        match self {
            Self::Aspartate => &ASPARTATE_ROLES,
            Self::Glutamate => &GLUTAMATE_ROLES,
            Self::Histidine => &HISTIDINE_ROLES,
            Self::Lysine => &LYSINE_ROLES,
        }
    }

    pub fn role_index(&self, atom_name: &str) -> Option<usize> {
        let map = match self {
            Self::Aspartate => &ASPARTATE_ROLE_INDEX,
            Self::Glutamate => &GLUTAMATE_ROLE_INDEX,
            Self::Histidine => &HISTIDINE_ROLE_INDEX,
            Self::Lysine => &LYSINE_ROLE_INDEX,
        };
        map.get(atom_name.trim()).copied()
    }

    pub fn role(&self, atom_name: &str) -> Option<&'static AtomRoleSpec> {
        self.role_index(atom_name).map(|i| &self.roles()[i])
    }

    pub fn is_titrating_hydrogen(&self, atom_name: &str) -> bool {
        self.role(atom_name).is_some_and(|r| r.titrating_hydrogen)
    }

    pub fn tautomer_direction(&self, atom_name: &str) -> TautomerDirection {
        self.role(atom_name)
            .map(|r| r.tautomer_direction)
            .unwrap_or_default()
    }
}

impl fmt::Display for TitratableFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Aspartate => "ASP",
            Self::Glutamate => "GLU",
            Self::Histidine => "HIS",
            Self::Lysine => "LYS",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_index_maps_agree_with_role_tables() {
        for family in TitratableFamily::ALL {
            for (i, spec) in family.roles().iter().enumerate() {
                assert_eq!(family.role_index(spec.name), Some(i), "{family} {}", spec.name);
                assert_eq!(spec.offsets.len(), family.state_count());
            }
        }
    }

    #[test]
    fn every_state_has_a_base_residue() {
        for family in TitratableFamily::ALL {
            assert_eq!(family.state_base_residues().len(), family.state_count());
        }
    }

    #[test]
    fn titrating_hydrogens_are_recognized_per_family() {
        assert!(TitratableFamily::Aspartate.is_titrating_hydrogen("HD1"));
        assert!(TitratableFamily::Aspartate.is_titrating_hydrogen("HD2"));
        assert!(TitratableFamily::Glutamate.is_titrating_hydrogen("HE1"));
        assert!(TitratableFamily::Glutamate.is_titrating_hydrogen("HE2"));
        assert!(TitratableFamily::Histidine.is_titrating_hydrogen("HD1"));
        assert!(TitratableFamily::Histidine.is_titrating_hydrogen("HE2"));
        assert!(!TitratableFamily::Histidine.is_titrating_hydrogen("HE1"));
        assert!(TitratableFamily::Lysine.is_titrating_hydrogen("HZ3"));
        assert!(!TitratableFamily::Lysine.is_titrating_hydrogen("HZ1"));
    }

    #[test]
    fn titrating_hydrogens_are_absent_in_some_state() {
        for family in TitratableFamily::ALL {
            for spec in family.roles().iter().filter(|r| r.titrating_hydrogen) {
                assert!(spec.offsets.iter().any(|&o| o < 0), "{family} {}", spec.name);
            }
        }
    }

    #[test]
    fn tautomer_directions_follow_the_protonation_site() {
        use TautomerDirection as D;
        let (asp, his) = (TitratableFamily::Aspartate, TitratableFamily::Histidine);
        assert_eq!(asp.tautomer_direction("HD1"), D::Positive);
        assert_eq!(asp.tautomer_direction("HD2"), D::Negative);
        assert_eq!(his.tautomer_direction("HD1"), D::Negative);
        assert_eq!(his.tautomer_direction("HE2"), D::Positive);
        assert_eq!(TitratableFamily::Lysine.tautomer_direction("HZ3"), D::None);
        assert_eq!(asp.tautomer_direction("XX"), D::None);
    }

    #[test]
    fn family_of_covers_fixed_and_dynamic_members() {
        use ResidueType as R;
        use TitratableFamily as F;
        assert_eq!(F::of(R::AsparticAcidNeutral), Some(F::Aspartate));
        assert_eq!(F::of(R::GlutamicAcidDynamic), Some(F::Glutamate));
        assert_eq!(F::of(R::HistidineDelta), Some(F::Histidine));
        assert_eq!(F::of(R::LysineNeutral), Some(F::Lysine));
        assert_eq!(F::of(R::Glycine), None);
    }
}
