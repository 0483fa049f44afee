use super::families::TitratableFamily;
use crate::core::forcefield::params::{
    ForceField, MultipoleFrame, MultipoleParam, PolarizeParam, VdwParam,
};
use crate::core::utils::identifiers::is_heavy_atomic_number;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// Solvation radius reported for absent atoms.
const ABSENT_SOLUTE_RADIUS: f64 = 1.0;

/// Where continuum-solvation radii come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoluteRadiiSource {
    /// Fitted per-type radii from the force field's `solute` table, falling back to the
    /// element census radius.
    #[default]
    Solute,
    /// The atom's vdW radius.
    Vdw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    AtomType,
    Multipole,
    Polarize,
    Vdw,
    Solute,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AtomType => "atom type",
            Self::Multipole => "multipole",
            Self::Polarize => "polarize",
            Self::Vdw => "vdW",
            Self::Solute => "solute",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TitrationTableError {
    #[error("No CB biotype defined for residue '{residue}' ({family} state tables)")]
    MissingBaseBiotype {
        family: TitratableFamily,
        residue: &'static str,
    },
    #[error(
        "Missing {kind} parameter for key {key} ({family} state {state} atom {atom})"
    )]
    MissingParameter {
        family: TitratableFamily,
        state: &'static str,
        atom: &'static str,
        kind: ParameterKind,
        key: u32,
    },
}

/// Identity of the atom occupying a table slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomIdentity {
    Type(u32),
    /// Placeholder for a hydrogen that does not exist in the state.
    DeprotonatedHydrogen,
}

/// Parameters of one atom in one protonation state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateAtomParameters {
    pub atom_type: u32,
    pub atom_class: u32,
    pub atomic_number: u8,
    pub multipole: MultipoleParam,
    pub polarize: PolarizeParam,
    pub vdw: VdwParam,
    pub solute_radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateSlot {
    Present(StateAtomParameters),
    Absent,
}

impl StateSlot {
    pub fn identity(&self) -> AtomIdentity {
        match self {
            Self::Present(p) => AtomIdentity::Type(p.atom_type),
            Self::Absent => AtomIdentity::DeprotonatedHydrogen,
        }
    }

    pub fn multipole_coefficients(&self) -> [f64; 10] {
        match self {
            Self::Present(p) => p.multipole.coefficients,
            Self::Absent => [0.0; 10],
        }
    }

    pub fn multipole_frame(&self) -> MultipoleFrame {
        match self {
            Self::Present(p) => p.multipole.frame,
            Self::Absent => MultipoleFrame::None,
        }
    }

    pub fn polarizability(&self) -> f64 {
        match self {
            Self::Present(p) => p.polarize.polarizability,
            Self::Absent => 0.0,
        }
    }

    pub fn vdw_radius(&self) -> f64 {
        match self {
            Self::Present(p) => p.vdw.radius,
            Self::Absent => 0.0,
        }
    }

    pub fn vdw_well_depth(&self) -> f64 {
        match self {
            Self::Present(p) => p.vdw.well_depth,
            Self::Absent => 0.0,
        }
    }

    pub fn solute_radius(&self) -> f64 {
        match self {
            Self::Present(p) => p.solute_radius,
            Self::Absent => ABSENT_SOLUTE_RADIUS,
        }
    }

    /// Absent slots stand in for hydrogens.
    pub fn atomic_number(&self) -> u8 {
        match self {
            Self::Present(p) => p.atomic_number,
            Self::Absent => 1,
        }
    }
}

/// `[state][role]` parameter grid of one titratable family.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomStateTable {
    family: TitratableFamily,
    slots: Vec<Vec<StateSlot>>,
}

impl AtomStateTable {
    pub fn family(&self) -> TitratableFamily {
        self.family
    }

    pub fn slot(&self, state: usize, role: usize) -> Option<&StateSlot> {
        self.slots.get(state).and_then(|row| row.get(role))
    }

    pub fn state(&self, state: usize) -> Option<&[StateSlot]> {
        self.slots.get(state).map(Vec::as_slice)
    }

    /// Cross-state differences that do not prevent the table from being used.
    ///
    /// Each state is compared with state 0 role by role. A multipole frame change is always
    /// reported; vdW radius or well-depth changes are reported for heavy atoms only.
    pub fn inconsistencies(&self) -> Vec<TableInconsistency> {
        let mut found = Vec::new();
        let Some(reference) = self.slots.first() else {
            return found;
        };
        let roles = self.family.roles();
        for (state, row) in self.slots.iter().enumerate().skip(1) {
            for (role, (slot, slot0)) in row.iter().zip(reference).enumerate() {
                if slot.multipole_frame() != slot0.multipole_frame() {
                    found.push(TableInconsistency {
                        family: self.family,
                        state: self.family.state_names()[state],
                        atom: roles[role].name,
                        kind: InconsistencyKind::MultipoleFrame,
                    });
                }
                if is_heavy_atomic_number(slot0.atomic_number())
                    && (slot.vdw_radius() != slot0.vdw_radius()
                        || slot.vdw_well_depth() != slot0.vdw_well_depth())
                {
                    found.push(TableInconsistency {
                        family: self.family,
                        state: self.family.state_names()[state],
                        atom: roles[role].name,
                        kind: InconsistencyKind::HeavyAtomVdw,
                    });
                }
            }
        }
        found
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InconsistencyKind {
    MultipoleFrame,
    HeavyAtomVdw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableInconsistency {
    pub family: TitratableFamily,
    pub state: &'static str,
    pub atom: &'static str,
    pub kind: InconsistencyKind,
}

/// Parameter tables for every titratable family, built once from a force field.
#[derive(Debug, Clone, PartialEq)]
pub struct TitrationTables {
    tables: HashMap<TitratableFamily, AtomStateTable>,
}

impl TitrationTables {
    pub fn build(
        forcefield: &ForceField,
        radii_source: SoluteRadiiSource,
    ) -> Result<Self, TitrationTableError> {
        let mut tables = HashMap::with_capacity(TitratableFamily::ALL.len());
        for family in TitratableFamily::ALL {
            let table = build_family(forcefield, family, radii_source)?;
            for issue in table.inconsistencies() {
                debug!(
                    family = %issue.family,
                    state = issue.state,
                    atom = issue.atom,
                    kind = ?issue.kind,
                    "State parameters differ from the reference state"
                );
            }
            tables.insert(family, table);
        }
        info!(families = tables.len(), "Titration state tables built");
        Ok(Self { tables })
    }

    pub fn table(&self, family: TitratableFamily) -> Option<&AtomStateTable> {
        self.tables.get(&family)
    }
}

/// Builds the `[state][role]` table of one family by resolving every atom's parameters from
/// the CB biotype of its state plus the role's offset.
pub fn build_family(
    forcefield: &ForceField,
    family: TitratableFamily,
    radii_source: SoluteRadiiSource,
) -> Result<AtomStateTable, TitrationTableError> {
    let state_names = family.state_names();
    let mut slots = Vec::with_capacity(family.state_count());

    for (state, &base_residue) in family.state_base_residues().iter().enumerate() {
        let biotype_cb = forcefield.residue_cb_biotype(base_residue).ok_or(
            TitrationTableError::MissingBaseBiotype {
                family,
                residue: base_residue,
            },
        )?;

        let row = family
            .roles()
            .iter()
            .map(|spec| {
                let offset = spec.offsets[state];
                if offset < 0 {
                    return Ok(StateSlot::Absent);
                }
                let missing = |kind, key| TitrationTableError::MissingParameter {
                    family,
                    state: state_names[state],
                    atom: spec.name,
                    kind,
                    key,
                };
                let biotype = biotype_cb + offset as u32;
                let atom_type = forcefield
                    .atom_type_of_biotype(biotype)
                    .ok_or_else(|| missing(ParameterKind::AtomType, biotype))?;
                let type_param = forcefield
                    .atom_type(atom_type)
                    .ok_or_else(|| missing(ParameterKind::AtomType, atom_type))?;
                let multipole = forcefield
                    .multipole(atom_type)
                    .ok_or_else(|| missing(ParameterKind::Multipole, atom_type))?;
                let polarize = forcefield
                    .polarize(atom_type)
                    .ok_or_else(|| missing(ParameterKind::Polarize, atom_type))?;
                let vdw = forcefield
                    .vdw(type_param.class)
                    .ok_or_else(|| missing(ParameterKind::Vdw, type_param.class))?;
                let solute_radius = match radii_source {
                    SoluteRadiiSource::Solute => forcefield
                        .solute(atom_type)
                        .map(|s| s.radius)
                        .or_else(|| census_radius(type_param.atomic_number)),
                    SoluteRadiiSource::Vdw => Some(vdw.radius),
                }
                .ok_or_else(|| missing(ParameterKind::Solute, atom_type))?;

                Ok(StateSlot::Present(StateAtomParameters {
                    atom_type,
                    atom_class: type_param.class,
                    atomic_number: type_param.atomic_number,
                    multipole: multipole.clone(),
                    polarize: *polarize,
                    vdw: *vdw,
                    solute_radius,
                }))
            })
            .collect::<Result<Vec<_>, TitrationTableError>>()?;
        slots.push(row);
    }

    Ok(AtomStateTable { family, slots })
}

/// Bondi radius by element.
fn census_radius(atomic_number: u8) -> Option<f64> {
    match atomic_number {
        1 => Some(1.20),
        6 => Some(1.70),
        7 => Some(1.55),
        8 => Some(1.52),
        16 => Some(1.80),
        _ => None,
    }
}
