use super::ids::ResidueId;
use nalgebra::Point3;

/// Caches van der Waals parameters for pairwise energy evaluation.
///
/// The parameters are resolved once from the force field and stored on the atom so that
/// evaluators do not repeat class lookups inside their pair loops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CachedVdwParam {
    /// Lennard-Jones 12-6 parameters.
    LennardJones {
        /// The van der Waals radius (minimum-energy distance contribution) in Angstroms.
        radius: f64,
        /// The well depth parameter (epsilon) in kcal/mol.
        well_depth: f64,
    },
    /// No cached parameters available; the atom does not take part in vdW evaluation.
    None,
}

/// Represents an atom of the molecular system.
///
/// Every atom owns a stable array index that is assigned when it is added to a
/// [`MolecularSystem`](super::system::MolecularSystem). The extended system keys all of
/// its per-atom arrays on this index, which is also the index force-field evaluators use
/// when reporting lambda derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "OD1", "HZ3").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The stable array index of the atom within its system.
    pub index: usize,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Cached van der Waals parameters.
    pub vdw_param: CachedVdwParam,
}

impl Atom {
    /// Creates a new `Atom` without cached parameters.
    ///
    /// The array index is left at zero and assigned by the system on insertion.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_id,
            index: 0,
            position,
            vdw_param: CachedVdwParam::None,
        }
    }

    /// Returns a copy of the atom carrying Lennard-Jones parameters.
    pub fn with_lennard_jones(mut self, radius: f64, well_depth: f64) -> Self {
        self.vdw_param = CachedVdwParam::LennardJones { radius, well_depth };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_residue_id() -> ResidueId {
        ResidueId::from(KeyData::from_ffi(1))
    }

    #[test]
    fn new_initializes_atom_without_vdw_parameters() {
        let atom = Atom::new("CB", dummy_residue_id(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.name, "CB");
        assert_eq!(atom.index, 0);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.vdw_param, CachedVdwParam::None);
    }

    #[test]
    fn with_lennard_jones_sets_cached_parameters() {
        let atom =
            Atom::new("OD1", dummy_residue_id(), Point3::origin()).with_lennard_jones(1.7, 0.12);
        assert_eq!(
            atom.vdw_param,
            CachedVdwParam::LennardJones {
                radius: 1.7,
                well_depth: 0.12
            }
        );
    }
}
