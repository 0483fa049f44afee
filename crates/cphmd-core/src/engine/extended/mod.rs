//! The extended system: lambda particles, their bias potentials and derivative bookkeeping.

pub mod bias;
pub mod derivatives;
pub mod histogram;
pub mod restart;
pub mod system;
pub mod theta;
