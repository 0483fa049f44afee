//! # Core Module
//!
//! Stateless building blocks shared by the engine.
//!
//! ## Key Components
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues and the molecular system
//! - **Force Field** ([`forcefield`]) - Parameter store and pairwise potential kernels
//! - **Titration Knowledge** ([`titration`]) - Reaction constants, per-family atom tables and
//!   the state parameter tables built from the force field
//! - **Utilities** ([`utils`]) - Atom name classification helpers

pub mod forcefield;
pub mod models;
pub mod titration;
pub mod utils;
