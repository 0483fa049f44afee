//! Analytic bias potentials acting on the lambda coordinates of one titrating residue.
//!
//! The total bias is `Ubias = Uph + Udiscr − Umod`:
//!
//! - the **discretizer** `−4·M·(λ − ½)²` pushes each lambda towards 0 or 1;
//! - the **acidostat** `ln10·R·T·(1 − λ)·(pKa − pH)` couples the residue to the solution
//!   pH, with the tautomer lambda mixing two pKa values for histidine;
//! - the **model** term removes the model-compound free energy profile of the residue.
//!
//! [`BiasTerms`] stores the model term and its derivatives already negated, so every
//! component sums directly into the total.

use crate::core::titration::constants::{LN10, R, Titration};
use crate::core::titration::families::TitratableFamily;
use crate::engine::config::ExtendedSystemConfig;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BiasTerms {
    pub discretizer: f64,
    pub ph: f64,
    /// Negated model-compound energy.
    pub model: f64,
    pub d_discretizer_d_titration: f64,
    pub d_ph_d_titration: f64,
    pub d_model_d_titration: f64,
    pub d_discretizer_d_tautomer: f64,
    pub d_ph_d_tautomer: f64,
    pub d_model_d_tautomer: f64,
}

impl BiasTerms {
    #[inline]
    pub fn energy(&self) -> f64 {
        self.discretizer + self.ph + self.model
    }

    #[inline]
    pub fn titration_derivative(&self) -> f64 {
        self.d_discretizer_d_titration + self.d_ph_d_titration + self.d_model_d_titration
    }

    #[inline]
    pub fn tautomer_derivative(&self) -> f64 {
        self.d_discretizer_d_tautomer + self.d_ph_d_tautomer + self.d_model_d_tautomer
    }

    /// Components in the order discretizer, pH, model, then the titration and tautomer
    /// derivatives in the same order.
    pub fn to_array(&self) -> [f64; 9] {
        [
            self.discretizer,
            self.ph,
            self.model,
            self.d_discretizer_d_titration,
            self.d_ph_d_titration,
            self.d_model_d_titration,
            self.d_discretizer_d_tautomer,
            self.d_ph_d_tautomer,
            self.d_model_d_tautomer,
        ]
    }
}

impl Add for BiasTerms {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for BiasTerms {
    fn add_assign(&mut self, rhs: Self) {
        self.discretizer += rhs.discretizer;
        self.ph += rhs.ph;
        self.model += rhs.model;
        self.d_discretizer_d_titration += rhs.d_discretizer_d_titration;
        self.d_ph_d_titration += rhs.d_ph_d_titration;
        self.d_model_d_titration += rhs.d_model_d_titration;
        self.d_discretizer_d_tautomer += rhs.d_discretizer_d_tautomer;
        self.d_ph_d_tautomer += rhs.d_ph_d_tautomer;
        self.d_model_d_tautomer += rhs.d_model_d_tautomer;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasComponent {
    Total,
    Discretizer,
    Acidostat,
    Model,
}

/// Conditions and calibration shared by every residue's bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiasParameters {
    pub ph: f64,
    pub temperature: f64,
    pub titration_magnitude: f64,
    pub tautomer_magnitude: f64,
    pub ash_ref_energy: f64,
    pub ash_lambda_intercept: f64,
    pub glh_ref_energy: f64,
    pub glh_lambda_intercept: f64,
}

impl From<&ExtendedSystemConfig> for BiasParameters {
    fn from(config: &ExtendedSystemConfig) -> Self {
        Self {
            ph: config.ph,
            temperature: config.temperature,
            titration_magnitude: config.titration_bias_magnitude,
            tautomer_magnitude: config.tautomer_bias_magnitude,
            ash_ref_energy: config.reference.ash_ref_energy,
            ash_lambda_intercept: config.reference.ash_lambda_intercept,
            glh_ref_energy: config.reference.glh_ref_energy,
            glh_lambda_intercept: config.reference.glh_lambda_intercept,
        }
    }
}

#[inline]
fn discretizer(magnitude: f64, lambda: f64) -> (f64, f64) {
    let d = lambda - 0.5;
    (-4.0 * magnitude * d * d, -8.0 * magnitude * d)
}

/// Bias terms of one residue of `family` at titration lambda `x` and tautomer lambda `t`.
///
/// `None` stands for a residue without a bias (or with the bias switched off) and yields
/// all-zero terms. `t` is ignored for lysine.
pub fn bias_terms(
    family: Option<TitratableFamily>,
    x: f64,
    t: f64,
    params: &BiasParameters,
) -> BiasTerms {
    let Some(family) = family else {
        return BiasTerms::default();
    };
    let kt_ln10 = LN10 * R * params.temperature;
    let (discr_x, d_discr_x) = discretizer(params.titration_magnitude, x);
    let one_minus_x = 1.0 - x;

    let (model, d_model_x, d_model_t);
    let mut terms = BiasTerms {
        discretizer: discr_x,
        d_discretizer_d_titration: d_discr_x,
        ..BiasTerms::default()
    };

    match family {
        TitratableFamily::Lysine => {
            let pka = Titration::LysToLyd.pka();
            terms.ph = kt_ln10 * one_minus_x * (pka - params.ph);
            terms.d_ph_d_titration = -kt_ln10 * (pka - params.ph);

            let reference = Titration::LysToLyd.ref_energy();
            let intercept = Titration::LysToLyd.lambda_intercept();
            let shifted = one_minus_x - intercept;
            model = reference * shifted * shifted;
            d_model_x = -2.0 * reference * shifted;
            d_model_t = 0.0;
        }
        TitratableFamily::Aspartate | TitratableFamily::Glutamate | TitratableFamily::Histidine => {
            let (discr_t, d_discr_t) = discretizer(params.tautomer_magnitude, t);
            terms.discretizer += discr_t;
            terms.d_discretizer_d_tautomer = d_discr_t;

            // pKa1 applies at t = 1, pKa2 at t = 0.
            let (pka1, pka2) = match family {
                TitratableFamily::Aspartate => {
                    let pka = Titration::AshToAsp.pka();
                    (pka, pka)
                }
                TitratableFamily::Glutamate => {
                    let pka = Titration::GlhToGlu.pka();
                    (pka, pka)
                }
                _ => (Titration::HisToHie.pka(), Titration::HisToHid.pka()),
            };
            let mixed = t * (pka1 - params.ph) + (1.0 - t) * (pka2 - params.ph);
            terms.ph = kt_ln10 * one_minus_x * mixed;
            terms.d_ph_d_titration = -kt_ln10 * mixed;
            terms.d_ph_d_tautomer =
                kt_ln10 * one_minus_x * ((pka1 - params.ph) - (pka2 - params.ph));

            if family == TitratableFamily::Histidine {
                let cross = |r: Titration| -2.0 * r.ref_energy() * r.lambda_intercept();
                let c4 = cross(Titration::HisToHid);
                let c3 = cross(Titration::HisToHie) - c4;
                let c2 = Titration::HisToHid.ref_energy();
                let c1 = cross(Titration::HidToHie) - c3;
                let c0 = Titration::HidToHie.ref_energy();
                let quadratic = c0 * t * t + c1 * t + c2;
                let linear = c3 * t + c4;
                model = one_minus_x * one_minus_x * quadratic + one_minus_x * linear;
                d_model_x = -2.0 * one_minus_x * quadratic - linear;
                d_model_t = 2.0 * c0 * t * one_minus_x * one_minus_x
                    + c1 * one_minus_x * one_minus_x
                    + c3 * one_minus_x;
            } else {
                let (reference, intercept) = if family == TitratableFamily::Aspartate {
                    (params.ash_ref_energy, params.ash_lambda_intercept)
                } else {
                    (params.glh_ref_energy, params.glh_lambda_intercept)
                };
                let shifted = one_minus_x - intercept;
                model = reference * shifted * shifted;
                d_model_x = -2.0 * reference * shifted;
                d_model_t = 0.0;
            }
        }
    }

    terms.model = -model;
    terms.d_model_d_titration = -d_model_x;
    terms.d_model_d_tautomer = -d_model_t;
    terms
}
