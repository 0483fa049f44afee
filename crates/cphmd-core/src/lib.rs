//! # CpHMD Core Library
//!
//! A constant-pH extended-system engine for molecular dynamics. Titratable residues carry
//! continuous "lambda" coordinates that are propagated alongside the atomic coordinates, so
//! that protonation and tautomer states are sampled at a fixed solution pH.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`), residue
//!   classification, force-field parameter storage, and the per-family state parameter
//!   tables that describe every protonation state of Asp, Glu, His and Lys.
//!
//! - **[`engine`]: The Logic Core.** The stateful `ExtendedSystem`: the lambda / theta state
//!   vector, pH and discretization bias potentials, lock-free derivative accumulators used by
//!   parallel energy evaluators, occupancy histograms and restart persistence.
//!
//! - **[`workflows`]: The Public API.** High-level procedures built on the engine, such as the
//!   finite-difference consistency check of lambda gradients.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;
