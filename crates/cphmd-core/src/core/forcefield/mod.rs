//! # Force Field Module
//!
//! Parameter storage and the pairwise potential kernels used by reference evaluators.
//!
//! - [`params`] - The `ForceField` parameter store, loaded from TOML
//! - [`potentials`] - Lennard-Jones kernel and combining rule

pub mod params;
pub mod potentials;
