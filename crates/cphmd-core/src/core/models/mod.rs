//! # Core Models Module
//!
//! Data structures describing the molecular system the extended system is attached to.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom with its stable array index, coordinates and vdW parameters
//! - [`residue`] - Residue structure and protonation-aware residue classification
//! - [`system`] - Complete molecular system with residues kept in insertion order
//! - [`ids`] - Unique identifier types for residues
//!
//! ## Usage
//!
//! ```ignore
//! use cphmd::core::models::{atom::Atom, residue::ResidueType, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let residue_id = system.add_residue(1, "ASD", ResidueType::AsparticAcidDynamic);
//! let cb = system.add_atom_to_residue(residue_id, Atom::new("CB", residue_id, Point3::origin()));
//! ```

pub mod atom;
pub mod ids;
pub mod residue;
pub mod system;
