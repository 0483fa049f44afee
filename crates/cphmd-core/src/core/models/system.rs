use super::atom::Atom;
use super::ids::ResidueId;
use super::residue::{Residue, ResidueType};
use crate::core::utils::identifiers::is_backbone_atom;
use slotmap::SlotMap;

/// Represents a molecular system made of residues and their atoms.
///
/// Atoms are stored densely so that an atom's position in storage is its stable array index.
/// Residues are stored in a slot map for stable IDs and additionally tracked in insertion
/// order, which is the order extended-system variables are assigned in.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Dense atom storage, indexed by the atom's array index.
    atoms: Vec<Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Residue IDs in insertion order.
    residue_order: Vec<ResidueId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an atom by its array index.
    ///
    /// # Arguments
    ///
    /// * `index` - The array index to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the index is in range, otherwise `None`.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Retrieves a mutable reference to an atom by its array index.
    pub fn atom_mut(&mut self, index: usize) -> Option<&mut Atom> {
        self.atoms.get_mut(index)
    }

    /// Returns all atoms ordered by array index.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns the number of atoms in the system.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Retrieves a residue by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The residue ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Residue)` if the residue exists, otherwise `None`.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues in insertion order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(ResidueId, &Residue)` pairs.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residue_order
            .iter()
            .filter_map(|&id| self.residues.get(id).map(|residue| (id, residue)))
    }

    /// Appends a new residue to the system.
    ///
    /// # Arguments
    ///
    /// * `number` - The sequence number of the residue.
    /// * `name` - The name of the residue.
    /// * `residue_type` - The protonation-aware identity of the residue.
    ///
    /// # Return
    ///
    /// The ID of the newly created residue.
    pub fn add_residue(
        &mut self,
        number: isize,
        name: &str,
        residue_type: ResidueType,
    ) -> ResidueId {
        let id = self.residues.insert(Residue::new(number, name, residue_type));
        self.residue_order.push(id);
        id
    }

    /// Adds an atom to a specific residue and assigns its array index.
    ///
    /// # Arguments
    ///
    /// * `residue_id` - The ID of the residue to add the atom to.
    /// * `atom` - The atom to add.
    ///
    /// # Return
    ///
    /// Returns `Some(index)` with the assigned array index, or `None` if the residue
    /// does not exist.
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<usize> {
        let residue = self.residues.get_mut(residue_id)?;
        let index = self.atoms.len();
        atom.index = index;
        atom.residue_id = residue_id;
        residue.add_atom(&atom.name, index);
        self.atoms.push(atom);
        Some(index)
    }

    /// Returns the array indices of the side-chain atoms of a residue.
    ///
    /// Side-chain atoms are all atoms of the residue whose names are not backbone names.
    /// An unknown residue yields an empty list.
    pub fn side_chain_atoms(&self, residue_id: ResidueId) -> Vec<usize> {
        let Some(residue) = self.residues.get(residue_id) else {
            return Vec::new();
        };
        residue
            .atoms()
            .iter()
            .copied()
            .filter(|&index| {
                self.atoms
                    .get(index)
                    .is_some_and(|atom| !is_backbone_atom(&atom.name))
            })
            .collect()
    }
}
