//! Shared fixtures for unit tests.

use crate::core::forcefield::params::{
    AtomTypeParam, ForceField, MultipoleFrame, MultipoleParam, PolarizeParam, SoluteParam, VdwParam,
};
use crate::core::models::atom::Atom;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::ResidueType;
use crate::core::models::system::MolecularSystem;
use crate::core::titration::families::TitratableFamily;
use nalgebra::Point3;

const BASE_BIOTYPES: [(&str, u32); 9] = [
    ("ASP", 100),
    ("ASH", 120),
    ("GLU", 140),
    ("GLH", 160),
    ("HIS", 180),
    ("HID", 200),
    ("HIE", 220),
    ("LYS", 240),
    ("LYD", 260),
];

fn atomic_number(atom_name: &str) -> u8 {
    match atom_name.chars().next() {
        Some('H') => 1,
        Some('N') => 7,
        Some('O') => 8,
        _ => 6,
    }
}

/// A force field covering every state of every titratable family.
///
/// Biotype `b` maps to atom type `b` and atom class `b`, and every parameter is a distinct
/// smooth function of the type number so that states are distinguishable.
pub(crate) fn synthetic_forcefield() -> ForceField {
    let mut ff = ForceField::default();
    for (residue, cb) in BASE_BIOTYPES {
        ff.residue_cb.insert(residue.to_string(), cb);
    }
    for family in TitratableFamily::ALL {
        for (state, base) in family.state_base_residues().iter().enumerate() {
            let cb = BASE_BIOTYPES
                .iter()
                .find(|(r, _)| r == base)
                .map(|(_, b)| *b)
                .unwrap();
            for spec in family.roles() {
                let offset = spec.offsets[state];
                if offset < 0 {
                    continue;
                }
                let t = cb + offset as u32;
                let key = t.to_string();
                let x = t as f64;
                ff.biotypes.insert(key.clone(), t);
                ff.atom_types.insert(
                    key.clone(),
                    AtomTypeParam {
                        class: t,
                        atomic_number: atomic_number(spec.name),
                        description: format!("{base} {}", spec.name),
                    },
                );
                let mut coefficients = [0.0; 10];
                for (k, c) in coefficients.iter_mut().enumerate() {
                    *c = ((x + k as f64) * 0.37).sin() * 0.5;
                }
                ff.multipoles.insert(
                    key.clone(),
                    MultipoleParam {
                        frame: MultipoleFrame::ZThenX,
                        coefficients,
                    },
                );
                ff.polarize.insert(
                    key.clone(),
                    PolarizeParam {
                        polarizability: 0.5 + x * 1e-3,
                        thole: 0.39,
                    },
                );
                ff.vdw.insert(
                    key.clone(),
                    VdwParam {
                        radius: 1.0 + x * 1e-3,
                        well_depth: 0.01 + x * 1e-4,
                    },
                );
                ff.solute.insert(key, SoluteParam { radius: 1.1 + x * 1e-3 });
            }
        }
    }
    ff
}

/// Appends a residue with backbone atoms and, for titratable families, every side-chain atom
/// named in the family table. Atoms carry Lennard-Jones parameters.
pub(crate) fn add_residue(
    system: &mut MolecularSystem,
    number: isize,
    residue_type: ResidueType,
) -> ResidueId {
    let id = system.add_residue(number, residue_type.to_three_letter(), residue_type);
    let mut names: Vec<&str> = vec!["N", "CA", "C", "O"];
    if let Some(family) = TitratableFamily::of(residue_type) {
        names.extend(family.roles().iter().map(|r| r.name));
    }
    let origin = number as f64 * 6.0;
    for (k, name) in names.into_iter().enumerate() {
        let angle = k as f64 * 1.1;
        let position = Point3::new(origin + 1.4 * angle.cos(), 1.4 * angle.sin(), 0.45 * k as f64);
        let (radius, well_depth) = if atomic_number(name) == 1 { (0.6, 0.02) } else { (1.7, 0.1) };
        let atom = Atom::new(name, id, position).with_lennard_jones(radius, well_depth);
        system.add_atom_to_residue(id, atom);
    }
    id
}

/// Builds a system from a sequence of residue identities, numbered from 1.
pub(crate) fn build_system(residues: &[ResidueType]) -> (MolecularSystem, Vec<ResidueId>) {
    let mut system = MolecularSystem::new();
    let ids = residues
        .iter()
        .enumerate()
        .map(|(i, &r)| add_residue(&mut system, i as isize + 1, r))
        .collect();
    (system, ids)
}
