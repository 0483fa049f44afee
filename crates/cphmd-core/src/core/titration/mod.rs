//! # Titration Module
//!
//! Static knowledge about titratable residues and the state parameter tables built from a
//! force field.
//!
//! ## Key Components
//!
//! - [`constants`] - Physical constants and the calibrated constants of each reaction
//! - [`families`] - Per-family atom-role tables (biotype offsets, tautomer directions,
//!   titrating hydrogens) with compile-time name lookups
//! - [`tables`] - `[state][role]` parameter tables with explicit absent slots
//! - [`interpolation`] - Lambda-weighted multipoles and polarizabilities with derivatives
//! - [`rotamer_bias`] - pH reference energies of fixed protonation states

pub mod constants;
pub mod families;
pub mod interpolation;
pub mod rotamer_bias;
pub mod tables;
