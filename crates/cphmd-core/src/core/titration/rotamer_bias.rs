use super::constants::{Titration, acidostat};
use crate::core::models::residue::ResidueType;
use std::collections::HashMap;

/// pH-dependent reference energies of fixed protonation states, for rotamer optimization.
///
/// Each deprotonated state carries the acidostat energy of its reaction minus the rotamer
/// free-energy difference; the reference protonated states (ASH, GLH, LYS, HIS) carry zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RotamerPhBias {
    bias: HashMap<ResidueType, f64>,
}

impl RotamerPhBias {
    pub fn new(temperature: f64, ph: f64) -> Self {
        let shifted = |titration: Titration| {
            acidostat(titration.pka(), temperature, ph) - titration.free_energy_diff()
        };
        let bias = HashMap::from([
            (ResidueType::AsparticAcidNeutral, 0.0),
            (ResidueType::AsparticAcid, shifted(Titration::AshToAsp)),
            (ResidueType::GlutamicAcidNeutral, 0.0),
            (ResidueType::GlutamicAcid, shifted(Titration::GlhToGlu)),
            (ResidueType::Lysine, 0.0),
            (ResidueType::LysineNeutral, shifted(Titration::LysToLyd)),
            (ResidueType::Histidine, 0.0),
            (ResidueType::HistidineDelta, shifted(Titration::HisToHid)),
            (ResidueType::HistidineEpsilon, shifted(Titration::HisToHie)),
        ]);
        Self { bias }
    }

    /// Bias of a single identity; residues outside the titratable families have none.
    pub fn bias(&self, residue_type: ResidueType) -> f64 {
        self.bias.get(&residue_type).copied().unwrap_or(0.0)
    }

    pub fn total(&self, residues: &[ResidueType]) -> f64 {
        residues.iter().map(|&r| self.bias(r)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::titration::constants::{LN10, R};

    #[test]
    fn protonated_reference_states_carry_no_bias() {
        let bias = RotamerPhBias::new(298.15, 7.0);
        for r in [
            ResidueType::AsparticAcidNeutral,
            ResidueType::GlutamicAcidNeutral,
            ResidueType::Lysine,
            ResidueType::Histidine,
        ] {
            assert_eq!(bias.bias(r), 0.0);
        }
    }

    #[test]
    fn deprotonated_states_carry_acidostat_minus_free_energy_difference() {
        let (temperature, ph) = (300.0, 7.4);
        let bias = RotamerPhBias::new(temperature, ph);
        let expected = LN10 * R * temperature * (4.0 - ph) + 66.87;
        assert!((bias.bias(ResidueType::AsparticAcid) - expected).abs() < 1e-9);
        let expected = LN10 * R * temperature * (6.6 - ph) - 37.44;
        assert!((bias.bias(ResidueType::HistidineEpsilon) - expected).abs() < 1e-9);
    }

    #[test]
    fn total_sums_over_residues_and_ignores_others() {
        let bias = RotamerPhBias::new(298.15, 7.4);
        let total = bias.total(&[
            ResidueType::AsparticAcid,
            ResidueType::Glycine,
            ResidueType::LysineNeutral,
        ]);
        let expected = bias.bias(ResidueType::AsparticAcid) + bias.bias(ResidueType::LysineNeutral);
        assert!((total - expected).abs() < 1e-12);
    }
}
