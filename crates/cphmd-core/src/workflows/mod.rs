//! # Workflows Module
//!
//! High-level procedures built on the engine.
//!
//! - **Gradient Check** ([`gradient`]) - Compares the analytic lambda gradient of an
//!   evaluator plus the bias against finite differences of its energy.

pub mod gradient;
