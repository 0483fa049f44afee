use crate::engine::error::EngineError;
use crate::engine::extended::system::ExtendedSystem;
use crate::engine::potential::LambdaPotential;
use tracing::{info, instrument, warn};

/// Analytic and numeric dU/dλ of one ESV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EsvGradient {
    pub esv: usize,
    pub lambda: f64,
    pub analytic: f64,
    pub numeric: f64,
}

impl EsvGradient {
    pub fn error(&self) -> f64 {
        (self.analytic - self.numeric).abs()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradientReport {
    pub gradients: Vec<EsvGradient>,
    /// Number of ESVs whose analytic and numeric gradients differ by more than the tolerance.
    pub failures: usize,
}

impl GradientReport {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}

/// Compares the analytic lambda gradient of `potential` plus the bias against finite
/// differences of their summed energy.
///
/// Differences are central, and one-sided where a step would leave [0, 1]. All lambdas
/// are restored afterwards and the potential is re-evaluated so that the accumulators
/// describe the restored state.
#[instrument(skip_all, name = "gradient_check_workflow")]
pub fn check_esv_gradient(
    esv: &mut ExtendedSystem,
    potential: &impl LambdaPotential,
    step: f64,
    tolerance: f64,
) -> Result<GradientReport, EngineError> {
    if !(step > 0.0 && step < 0.5) {
        return Err(EngineError::Evaluation(format!(
            "finite-difference step must lie in (0, 0.5), got {step}"
        )));
    }
    info!(esvs = esv.n_esvs(), step, tolerance, "Checking lambda gradients.");

    let original = esv.lambdas().to_vec();
    esv.init_vdw();
    esv.init_perm_elec();
    esv.init_ind_elec();
    potential.evaluate(esv)?;
    let analytic = esv.derivatives();

    let mut report = GradientReport::default();
    for (index, &lambda) in original.iter().enumerate() {
        let upper = (lambda + step).min(1.0);
        let lower = (lambda - step).max(0.0);

        esv.set_esv_lambda(index, upper)?;
        let energy_upper = potential.evaluate(esv)? + esv.bias_energy();
        esv.set_esv_lambda(index, lower)?;
        let energy_lower = potential.evaluate(esv)? + esv.bias_energy();
        esv.set_esv_lambda(index, lambda)?;

        let gradient = EsvGradient {
            esv: index,
            lambda,
            analytic: analytic[index],
            numeric: (energy_upper - energy_lower) / (upper - lower),
        };
        if gradient.error() > tolerance {
            warn!(
                esv = index,
                lambda,
                analytic = gradient.analytic,
                numeric = gradient.numeric,
                "Analytic lambda gradient disagrees with finite difference."
            );
            report.failures += 1;
        }
        report.gradients.push(gradient);
    }

    potential.evaluate(esv)?;
    info!(failures = report.failures, "Gradient check finished.");
    Ok(report)
}
