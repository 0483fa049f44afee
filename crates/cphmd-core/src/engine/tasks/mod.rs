//! Energy evaluators that scale their terms by lambda and report lambda derivatives.
//!
//! Each task reads per-atom lambdas and prefactors from the extended system and feeds its
//! derivatives back through the thread-safe accumulators, so pair loops may run in
//! parallel.

pub mod vdw_energy;
