use crate::core::forcefield::potentials::{combine_lennard_jones, lennard_jones_12_6};
use crate::core::models::atom::{Atom, CachedVdwParam};
use crate::core::models::system::MolecularSystem;
use crate::engine::error::EngineError;
use crate::engine::extended::system::ExtendedSystem;
use crate::engine::potential::LambdaPotential;
use itertools::Itertools;
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Lambda-scaled Lennard-Jones energy between atoms of different residues.
#[derive(Debug, Clone, Copy)]
pub struct VdwEnergy<'a> {
    pub system: &'a MolecularSystem,
}

impl<'a> VdwEnergy<'a> {
    pub fn new(system: &'a MolecularSystem) -> Self {
        Self { system }
    }
}

impl LambdaPotential for VdwEnergy<'_> {
    fn evaluate(&self, esv: &ExtendedSystem) -> Result<f64, EngineError> {
        run(self.system, esv)
    }
}

/// Evaluates the inter-residue van der Waals energy and accumulates its lambda
/// derivatives into the vdW channel of `esv`.
///
/// Every pair energy is scaled by the product of the two atoms' prefactors. Atoms without
/// cached Lennard-Jones parameters do not interact.
#[instrument(skip_all, name = "vdw_energy_task")]
pub fn run(system: &MolecularSystem, esv: &ExtendedSystem) -> Result<f64, EngineError> {
    esv.init_vdw();

    let residue_atoms: Vec<&[usize]> = system.residues_iter().map(|(_, r)| r.atoms()).collect();
    if residue_atoms.len() < 2 {
        return Ok(0.0);
    }

    let residue_pairs = residue_atoms.iter().tuple_combinations::<(_, _)>();

    #[cfg(not(feature = "parallel"))]
    let total = residue_pairs
        .map(|(atoms_a, atoms_b)| residue_pair_energy(system, esv, atoms_a, atoms_b))
        .try_fold(0.0, |acc, energy| energy.map(|e| acc + e))?;

    #[cfg(feature = "parallel")]
    let total = residue_pairs
        .par_bridge()
        .map(|(atoms_a, atoms_b)| residue_pair_energy(system, esv, atoms_a, atoms_b))
        .try_reduce(|| 0.0, |acc, energy| Ok(acc + energy))?;

    Ok(total)
}

fn residue_pair_energy(
    system: &MolecularSystem,
    esv: &ExtendedSystem,
    atoms_a: &[usize],
    atoms_b: &[usize],
) -> Result<f64, EngineError> {
    let mut energy = 0.0;
    for &i in atoms_a {
        let atom_i = lookup(system, i)?;
        let CachedVdwParam::LennardJones {
            radius: radius_i,
            well_depth: eps_i,
        } = atom_i.vdw_param
        else {
            continue;
        };
        let pref_i = esv.vdw_prefactor(i);
        for &j in atoms_b {
            let atom_j = lookup(system, j)?;
            let CachedVdwParam::LennardJones {
                radius: radius_j,
                well_depth: eps_j,
            } = atom_j.vdw_param
            else {
                continue;
            };
            let (r_min, well_depth) = combine_lennard_jones(radius_i, eps_i, radius_j, eps_j);
            if well_depth == 0.0 {
                continue;
            }
            let dist = nalgebra::distance(&atom_i.position, &atom_j.position);
            let pair = lennard_jones_12_6(dist, r_min, well_depth);
            let pref_j = esv.vdw_prefactor(j);

            energy += pref_i.scale * pref_j.scale * pair;
            esv.add_vdw_deriv(i, pair, &pref_i, pref_j.scale);
            esv.add_vdw_deriv(j, pair, &pref_j, pref_i.scale);
        }
    }
    Ok(energy)
}

fn lookup(system: &MolecularSystem, index: usize) -> Result<&Atom, EngineError> {
    system
        .atom(index)
        .ok_or_else(|| EngineError::Evaluation(format!("atom index {index} is not in the system")))
}
