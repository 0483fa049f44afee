use crate::core::models::residue::ResidueType;

/// Gas constant in kcal/(mol·K); also used as Boltzmann's constant in molar units.
pub const R: f64 = 1.9872042586408316e-3;
/// Natural logarithm of 10.
pub const LN10: f64 = std::f64::consts::LN_10;
/// Converts kcal/mol to g·Å²/ps²/mol.
pub const KCAL_TO_GRAM_ANG2_PER_PS2: f64 = 418.4;
/// Temperature used to draw initial theta velocities.
pub const ROOM_TEMPERATURE: f64 = 298.15;

/// A protonation or tautomerization reaction with its calibration constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Titration {
    AshToAsp,
    GlhToGlu,
    LysToLyd,
    HisToHid,
    HisToHie,
    HidToHie,
}

impl Titration {
    pub const ALL: [Titration; 6] = [
        Titration::AshToAsp,
        Titration::GlhToGlu,
        Titration::LysToLyd,
        Titration::HisToHid,
        Titration::HisToHie,
        Titration::HidToHie,
    ];

    /// Reference pKa. `NaN` for the HID to HIE tautomerization, which exchanges no proton.
    pub fn pka(&self) -> f64 {
        match self {
            Self::AshToAsp => 4.00,
            Self::GlhToGlu => 4.40,
            Self::LysToLyd => 10.40,
            Self::HisToHid => 7.00,
            Self::HisToHie => 6.60,
            Self::HidToHie => f64::NAN,
        }
    }

    /// Free energy difference between the fixed-state rotamers, in kcal/mol.
    pub fn free_energy_diff(&self) -> f64 {
        match self {
            Self::AshToAsp => -66.87,
            Self::GlhToGlu => -81.50,
            Self::LysToLyd => 41.75,
            Self::HisToHid => 41.0,
            Self::HisToHie => 37.44,
            Self::HidToHie => 0.00,
        }
    }

    /// Model-compound reference energy, in kcal/mol.
    pub fn ref_energy(&self) -> f64 {
        match self {
            Self::AshToAsp => -71.9600,
            Self::GlhToGlu => -87.6300,
            Self::LysToLyd => 57.7100,
            Self::HisToHid => 42.4030,
            Self::HisToHie => 40.2215,
            Self::HidToHie => -3.40,
        }
    }

    /// Lambda position of the model-compound free energy minimum.
    pub fn lambda_intercept(&self) -> f64 {
        match self {
            Self::AshToAsp => 0.0,
            Self::GlhToGlu => 0.0,
            Self::LysToLyd => 0.10746,
            Self::HisToHid => 0.10048,
            Self::HisToHie => 0.11638,
            Self::HidToHie => 0.0,
        }
    }

    pub fn protonated_form(&self) -> ResidueType {
        match self {
            Self::AshToAsp => ResidueType::AsparticAcidNeutral,
            Self::GlhToGlu => ResidueType::GlutamicAcidNeutral,
            Self::LysToLyd => ResidueType::Lysine,
            Self::HisToHid | Self::HisToHie => ResidueType::Histidine,
            Self::HidToHie => ResidueType::HistidineDelta,
        }
    }

    pub fn deprotonated_form(&self) -> ResidueType {
        match self {
            Self::AshToAsp => ResidueType::AsparticAcid,
            Self::GlhToGlu => ResidueType::GlutamicAcid,
            Self::LysToLyd => ResidueType::LysineNeutral,
            Self::HisToHid => ResidueType::HistidineDelta,
            Self::HisToHie | Self::HidToHie => ResidueType::HistidineEpsilon,
        }
    }
}

/// Acidostat energy `ln(10)·R·T·(pKa − pH)` of a single reaction at the given conditions.
#[inline]
pub fn acidostat(pka: f64, temperature: f64, ph: f64) -> f64 {
    LN10 * R * temperature * (pka - ph)
}
