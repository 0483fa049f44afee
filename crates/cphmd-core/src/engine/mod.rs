//! # Engine Module
//!
//! The stateful core of constant-pH dynamics: the extended system of lambda particles
//! and the evaluators that couple it to a molecular energy function.
//!
//! ## Overview
//!
//! Every titratable residue owns a titration ESV (extended-system variable); acids and
//! histidine also own a tautomer ESV. The engine maps the theta coordinates driven by an
//! external integrator to lambdas, mirrors them onto atoms, collects dU/dλ from energy
//! evaluators, and turns the total into forces on theta.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - pH, temperature, coupling switches and calibration
//! - **Extended System** ([`extended`]) - Lambda state, bias potentials, derivative
//!   accumulators, occupancy histograms and restart files
//! - **Evaluator Seam** ([`potential`]) - The trait energy evaluators implement
//! - **Tasks** ([`tasks`]) - Concrete lambda-scaled energy evaluators
//! - **Error Handling** ([`error`]) - Engine-specific error types
//!
//! ## Evaluation Cycle
//!
//! 1. The integrator stores new theta values with `store_theta`.
//! 2. `pre_force` refreshes lambdas and per-atom mirrors.
//! 3. Evaluators reset their accumulator channel and report derivatives concurrently.
//! 4. `post_force` returns dU/dθ for the integrator.

pub mod config;
pub mod error;
pub mod extended;
pub mod potential;
pub mod tasks;
