use super::error::EngineError;
use super::extended::system::ExtendedSystem;

/// An energy function coupled to the lambda coordinates.
///
/// `evaluate` returns the lambda-scaled energy at the current lambdas and reports its
/// lambda derivatives through the accumulator adders of `esv`. Implementations reset the
/// channels they write before accumulating.
pub trait LambdaPotential {
    fn evaluate(&self, esv: &ExtendedSystem) -> Result<f64, EngineError>;
}
