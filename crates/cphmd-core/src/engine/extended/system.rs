use super::bias::{BiasComponent, BiasParameters, BiasTerms, bias_terms};
use super::derivatives::{DerivativeChannel, EsvDerivatives};
use super::histogram::LambdaHistogram;
use super::restart::RestartState;
use super::theta::{ThetaState, dlambda_dtheta, lambda_from_theta, theta_from_lambda};
use crate::core::forcefield::params::ForceField;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::ResidueType;
use crate::core::models::system::MolecularSystem;
use crate::core::titration::constants::{KCAL_TO_GRAM_ANG2_PER_PS2, R, ROOM_TEMPERATURE};
use crate::core::titration::families::{TautomerDirection, TitratableFamily};
use crate::core::titration::tables::TitrationTables;
use crate::engine::config::ExtendedSystemConfig;
use crate::engine::error::EngineError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Scale factor applied to an atom's van der Waals interactions, with its lambda derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VdwPrefactor {
    pub scale: f64,
    pub d_titration: f64,
    pub d_tautomer: f64,
}

impl VdwPrefactor {
    pub const UNSCALED: Self = Self {
        scale: 1.0,
        d_titration: 0.0,
        d_tautomer: 0.0,
    };
}

/// Extended-system view of one atom. Atoms outside titrating residues keep the defaults.
#[derive(Debug, Clone, PartialEq)]
struct ExtendedAtom {
    titration_lambda: f64,
    tautomer_lambda: f64,
    is_titrating: bool,
    is_titrating_hydrogen: bool,
    is_tautomerizing: bool,
    titration_esv: Option<usize>,
    tautomer_esv: Option<usize>,
    tautomer_direction: TautomerDirection,
    residue_type: ResidueType,
    family: Option<TitratableFamily>,
}

impl Default for ExtendedAtom {
    fn default() -> Self {
        Self {
            titration_lambda: 1.0,
            tautomer_lambda: 0.0,
            is_titrating: false,
            is_titrating_hydrogen: false,
            is_tautomerizing: false,
            titration_esv: None,
            tautomer_esv: None,
            tautomer_direction: TautomerDirection::None,
            residue_type: ResidueType::Unknown,
            family: None,
        }
    }
}

/// A residue that owns a titration ESV.
#[derive(Debug, Clone, PartialEq)]
pub struct TitratingResidue {
    pub id: ResidueId,
    pub residue_type: ResidueType,
    pub family: TitratableFamily,
    /// Index of the titration ESV, equal to the residue's position in the titrating list.
    pub titration_esv: usize,
    /// Index of the tautomer ESV (already offset past all titration ESVs), if any.
    pub tautomer_esv: Option<usize>,
    /// Array indices of the residue's side-chain atoms.
    pub side_chain: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EsvKind {
    Titration,
    Tautomer,
}

/// The constant-pH extended system.
///
/// Holds one titration ESV per titrating residue and one tautomer ESV per tautomerizing
/// residue, laid out titration ESVs first. Each ESV is a fictitious particle with position
/// θ; its lambda is `sin²θ`. Lambdas are mirrored onto the side-chain atoms of their
/// residue so that force-field evaluators can read them by atom index.
///
/// Mutation goes through `&mut self` (`pre_force`, the lambda setters, `store_theta`),
/// while the derivative adders take `&self` and may be called from many threads during an
/// energy evaluation.
#[derive(Debug)]
pub struct ExtendedSystem {
    config: ExtendedSystemConfig,
    bias: BiasParameters,
    tables: TitrationTables,
    residues: Vec<TitratingResidue>,
    residue_lookup: HashMap<ResidueId, usize>,
    esv_owner: Vec<(usize, EsvKind)>,
    n_titration: usize,
    atoms: Vec<ExtendedAtom>,
    lambdas: Vec<f64>,
    theta: ThetaState,
    theta_mass: Vec<f64>,
    derivatives: EsvDerivatives,
    histogram: LambdaHistogram,
}

impl ExtendedSystem {
    /// Builds the extended system for every titratable residue of `system`.
    ///
    /// All lambdas start at the configured initial values; theta velocities are drawn from
    /// a Maxwell-Boltzmann distribution at room temperature and accelerations follow from
    /// the initial bias forces.
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid or the titration parameter tables cannot be
    /// built from `forcefield`.
    #[instrument(skip_all, name = "extended_system_init")]
    pub fn new(
        system: &MolecularSystem,
        forcefield: &ForceField,
        config: ExtendedSystemConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let tables = TitrationTables::build(forcefield, config.solute_radii)?;

        let mut residues: Vec<TitratingResidue> = system
            .residues_iter()
            .filter(|(_, residue)| residue.residue_type.is_titratable())
            .filter_map(|(id, residue)| {
                let family = TitratableFamily::of(residue.residue_type)?;
                Some(TitratingResidue {
                    id,
                    residue_type: residue.residue_type,
                    family,
                    titration_esv: 0,
                    tautomer_esv: None,
                    side_chain: system.side_chain_atoms(id),
                })
            })
            .collect();

        let n_titration = residues.len();
        let mut esv_owner: Vec<(usize, EsvKind)> =
            (0..n_titration).map(|i| (i, EsvKind::Titration)).collect();
        for (i, residue) in residues.iter_mut().enumerate() {
            residue.titration_esv = i;
            if residue.residue_type.is_tautomer() {
                residue.tautomer_esv = Some(esv_owner.len());
                esv_owner.push((i, EsvKind::Tautomer));
            }
        }
        let n_esvs = esv_owner.len();

        let mut atoms = vec![ExtendedAtom::default(); system.atom_count()];
        for (atom, source) in atoms.iter_mut().zip(system.atoms()) {
            if let Some(residue) = system.residue(source.residue_id) {
                atom.residue_type = residue.residue_type;
            }
        }
        for residue in &residues {
            for &index in &residue.side_chain {
                let Some(atom) = atoms.get_mut(index) else {
                    continue;
                };
                let name = system.atom(index).map_or("", |a| a.name.as_str());
                atom.is_titrating = true;
                atom.titration_esv = Some(residue.titration_esv);
                atom.is_titrating_hydrogen = residue.family.is_titrating_hydrogen(name);
                atom.family = Some(residue.family);
                if let Some(tautomer_esv) = residue.tautomer_esv {
                    atom.is_tautomerizing = true;
                    atom.tautomer_esv = Some(tautomer_esv);
                    atom.tautomer_direction = residue.family.tautomer_direction(name);
                }
            }
        }

        let residue_lookup = residues.iter().enumerate().map(|(i, r)| (r.id, i)).collect();

        let mut extended = Self {
            bias: BiasParameters::from(&config),
            theta_mass: vec![config.theta_mass; n_esvs],
            histogram: LambdaHistogram::new(n_titration),
            derivatives: EsvDerivatives::new(n_esvs),
            theta: ThetaState::zeros(n_esvs),
            lambdas: vec![0.0; n_esvs],
            config,
            tables,
            residues,
            residue_lookup,
            esv_owner,
            n_titration,
            atoms,
        };
        extended.initialize_theta();

        info!(
            titration_esvs = extended.n_titration,
            tautomer_esvs = extended.n_tautomer(),
            ph = extended.config.ph,
            "Extended system initialized"
        );
        Ok(extended)
    }

    /// Builds the extended system and then restores theta positions, velocities and
    /// accelerations from a restart file.
    pub fn from_restart(
        system: &MolecularSystem,
        forcefield: &ForceField,
        config: ExtendedSystemConfig,
        restart: &Path,
    ) -> Result<Self, EngineError> {
        let mut extended = Self::new(system, forcefield, config)?;
        let theta = RestartState::read(restart)?.into_theta(extended.n_esvs())?;
        extended.theta = theta;
        extended.update_lambdas();
        info!(path = %restart.display(), "Extended system restored from restart file");
        Ok(extended)
    }

    fn initialize_theta(&mut self) {
        for esv in 0..self.n_esvs() {
            let lambda = if esv < self.n_titration {
                self.config.initial_titration_lambda
            } else {
                self.config.initial_tautomer_lambda
            };
            self.write_esv_lambda(esv, lambda);
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let dudtheta = self.post_force();
        for esv in 0..self.n_esvs() {
            let mass = self.theta_mass[esv];
            let gaussian: f64 = StandardNormal.sample(&mut rng);
            self.theta.velocity[esv] = gaussian * (R * ROOM_TEMPERATURE / mass).sqrt();
            self.theta.acceleration[esv] = -KCAL_TO_GRAM_ANG2_PER_PS2 * dudtheta[esv] / mass;
        }
    }

    pub fn config(&self) -> &ExtendedSystemConfig {
        &self.config
    }

    pub fn tables(&self) -> &TitrationTables {
        &self.tables
    }

    pub fn n_esvs(&self) -> usize {
        self.esv_owner.len()
    }

    pub fn n_titration(&self) -> usize {
        self.n_titration
    }

    pub fn n_tautomer(&self) -> usize {
        self.esv_owner.len() - self.n_titration
    }

    pub fn titrating_residues(&self) -> &[TitratingResidue] {
        &self.residues
    }

    pub fn tautomerizing_residues(&self) -> impl Iterator<Item = &TitratingResidue> {
        self.residues.iter().filter(|r| r.tautomer_esv.is_some())
    }

    pub fn is_extended(&self, residue: ResidueId) -> bool {
        self.residue_lookup.contains_key(&residue)
    }

    pub fn ph(&self) -> f64 {
        self.bias.ph
    }

    pub fn set_ph(&mut self, ph: f64) {
        self.bias.ph = ph;
        self.config.ph = ph;
    }

    pub fn temperature(&self) -> f64 {
        self.bias.temperature
    }

    /// Updates the temperature the pH bias is evaluated at, normally from the thermostat.
    pub fn set_temperature(&mut self, temperature: f64) {
        self.bias.temperature = temperature;
        self.config.temperature = temperature;
    }

    pub fn lambdas(&self) -> &[f64] {
        &self.lambdas
    }

    pub fn theta(&self) -> &ThetaState {
        &self.theta
    }

    pub fn theta_masses(&self) -> &[f64] {
        &self.theta_mass
    }

    pub fn theta_friction(&self) -> f64 {
        self.config.theta_friction
    }

    /// Write path for the theta integrator. Call [`pre_force`](Self::pre_force) afterwards
    /// to refresh the lambdas.
    pub fn store_theta(&mut self, theta: ThetaState) -> Result<(), EngineError> {
        let expected = self.n_esvs();
        match theta.consistent_len() {
            Some(n) if n == expected => {
                self.theta = theta;
                Ok(())
            }
            _ => Err(EngineError::ThetaLength {
                expected,
                found: theta.len(),
            }),
        }
    }

    /// Refreshes every lambda from theta. Must run before each energy evaluation.
    pub fn pre_force(&mut self) {
        self.update_lambdas();
    }

    fn update_lambdas(&mut self) {
        for esv in 0..self.n_esvs() {
            let pinned = if esv < self.n_titration {
                self.config.fix_titration_state
            } else {
                self.config.fix_tautomer_state
            };
            if !pinned {
                self.lambdas[esv] = lambda_from_theta(self.theta.position[esv]);
            }
        }
        for atom in &mut self.atoms {
            if let Some(esv) = atom.titration_esv {
                atom.titration_lambda = self.lambdas[esv];
            }
            if let Some(esv) = atom.tautomer_esv {
                atom.tautomer_lambda = self.lambdas[esv];
            }
        }
        for (i, residue) in self.residues.iter().enumerate() {
            let titration = self.lambdas[residue.titration_esv];
            let tautomer = residue.tautomer_esv.map(|esv| self.lambdas[esv]);
            self.histogram.record(i, titration, tautomer);
        }
    }

    /// Sets an ESV's lambda (clamped to [0, 1]), its theta, and the lambdas of the owning
    /// residue's side-chain atoms.
    fn write_esv_lambda(&mut self, esv: usize, lambda: f64) {
        let lambda = lambda.clamp(0.0, 1.0);
        self.lambdas[esv] = lambda;
        self.theta.position[esv] = theta_from_lambda(lambda);
        let (residue, kind) = self.esv_owner[esv];
        for &index in &self.residues[residue].side_chain {
            if let Some(atom) = self.atoms.get_mut(index) {
                match kind {
                    EsvKind::Titration => atom.titration_lambda = lambda,
                    EsvKind::Tautomer => atom.tautomer_lambda = lambda,
                }
            }
        }
    }

    pub fn set_esv_lambda(&mut self, esv: usize, lambda: f64) -> Result<(), EngineError> {
        if esv >= self.n_esvs() {
            return Err(EngineError::EsvIndexOutOfRange {
                index: esv,
                count: self.n_esvs(),
            });
        }
        self.write_esv_lambda(esv, lambda);
        Ok(())
    }

    pub fn set_titration_lambda(&mut self, residue: ResidueId, lambda: f64) {
        match self.residue_lookup.get(&residue) {
            Some(&i) => {
                let esv = self.residues[i].titration_esv;
                self.write_esv_lambda(esv, lambda);
            }
            None => warn!(?residue, "Residue is not titrating; titration lambda left unchanged"),
        }
    }

    pub fn set_tautomer_lambda(&mut self, residue: ResidueId, lambda: f64) {
        let esv = self
            .residue_lookup
            .get(&residue)
            .and_then(|&i| self.residues[i].tautomer_esv);
        match esv {
            Some(esv) => self.write_esv_lambda(esv, lambda),
            None => warn!(?residue, "Residue has no tautomer; tautomer lambda left unchanged"),
        }
    }

    /// Titration lambda of a residue; 1.0 for residues that do not titrate.
    pub fn titration_lambda(&self, residue: ResidueId) -> f64 {
        self.residue_lookup
            .get(&residue)
            .map_or(1.0, |&i| self.lambdas[self.residues[i].titration_esv])
    }

    /// Tautomer lambda of a residue; 1.0 for residues without a tautomer.
    pub fn tautomer_lambda(&self, residue: ResidueId) -> f64 {
        self.residue_lookup
            .get(&residue)
            .and_then(|&i| self.residues[i].tautomer_esv)
            .map_or(1.0, |esv| self.lambdas[esv])
    }

    pub fn titration_lambda_of_atom(&self, atom: usize) -> f64 {
        self.atoms.get(atom).map_or(1.0, |a| a.titration_lambda)
    }

    pub fn tautomer_lambda_of_atom(&self, atom: usize) -> f64 {
        self.atoms.get(atom).map_or(0.0, |a| a.tautomer_lambda)
    }

    pub fn is_titrating(&self, atom: usize) -> bool {
        self.atoms.get(atom).is_some_and(|a| a.is_titrating)
    }

    pub fn is_titrating_hydrogen(&self, atom: usize) -> bool {
        self.atoms.get(atom).is_some_and(|a| a.is_titrating_hydrogen)
    }

    pub fn is_tautomerizing(&self, atom: usize) -> bool {
        self.atoms.get(atom).is_some_and(|a| a.is_tautomerizing)
    }

    pub fn titration_esv_of_atom(&self, atom: usize) -> Option<usize> {
        self.atoms.get(atom).and_then(|a| a.titration_esv)
    }

    /// Tautomer ESV of an atom, already offset past the titration ESVs.
    pub fn tautomer_esv_of_atom(&self, atom: usize) -> Option<usize> {
        self.atoms.get(atom).and_then(|a| a.tautomer_esv)
    }

    pub fn tautomer_direction(&self, atom: usize) -> TautomerDirection {
        self.atoms
            .get(atom)
            .map_or(TautomerDirection::None, |a| a.tautomer_direction)
    }

    pub fn residue_type_of_atom(&self, atom: usize) -> ResidueType {
        self.atoms
            .get(atom)
            .map_or(ResidueType::Unknown, |a| a.residue_type)
    }

    /// Bias terms of a residue. Non-titrating residues, and every residue while the bias
    /// coupling is off, yield all-zero terms.
    pub fn bias_terms(&self, residue: ResidueId) -> BiasTerms {
        self.residue_lookup
            .get(&residue)
            .map_or_else(BiasTerms::default, |&i| self.bias_terms_at(i))
    }

    fn bias_terms_at(&self, index: usize) -> BiasTerms {
        let residue = &self.residues[index];
        let family = self.config.coupling.bias.then_some(residue.family);
        let titration = self.lambdas[residue.titration_esv];
        let tautomer = residue.tautomer_esv.map_or(0.0, |esv| self.lambdas[esv]);
        bias_terms(family, titration, tautomer, &self.bias)
    }

    fn summed_bias(&self) -> BiasTerms {
        (0..self.residues.len())
            .map(|i| self.bias_terms_at(i))
            .fold(BiasTerms::default(), |acc, terms| acc + terms)
    }

    /// Total bias energy `Uph + Udiscr − Umod` over titrating residues.
    pub fn bias_energy(&self) -> f64 {
        self.summed_bias().energy()
    }

    pub fn bias_component(&self, component: BiasComponent) -> f64 {
        let sum = self.summed_bias();
        match component {
            BiasComponent::Total => sum.energy(),
            BiasComponent::Discretizer => sum.discretizer,
            BiasComponent::Acidostat => sum.ph,
            BiasComponent::Model => sum.model,
        }
    }

    pub fn bias_decomposition(&self) -> String {
        let sum = self.summed_bias();
        format!(
            "    {:<16} {:>16.8}\n    {:<16} {:>16.8}\n    {:<16} {:>16.8}\n",
            "Discretizer", sum.discretizer, "Acidostat", sum.ph, "Fmod", sum.model
        )
    }

    /// Van der Waals scale factor of an atom and its lambda derivatives.
    ///
    /// Only titrating hydrogens are scaled, and only while vdW coupling is enabled.
    pub fn vdw_prefactor(&self, atom: usize) -> VdwPrefactor {
        let Some(a) = self.atoms.get(atom) else {
            return VdwPrefactor::UNSCALED;
        };
        if !a.is_titrating_hydrogen || !self.config.coupling.vdw {
            return VdwPrefactor::UNSCALED;
        }
        let (x, t) = (a.titration_lambda, a.tautomer_lambda);
        let carboxylate = matches!(
            a.family,
            Some(TitratableFamily::Aspartate | TitratableFamily::Glutamate)
        );
        match (a.family, a.tautomer_direction) {
            (_, TautomerDirection::Positive) if carboxylate => VdwPrefactor {
                scale: x * t,
                d_titration: t,
                d_tautomer: x,
            },
            (_, TautomerDirection::Negative) if carboxylate => VdwPrefactor {
                scale: x * (1.0 - t),
                d_titration: 1.0 - t,
                d_tautomer: -x,
            },
            (Some(TitratableFamily::Histidine), TautomerDirection::Positive) => VdwPrefactor {
                scale: (1.0 - x) * t + x,
                d_titration: 1.0 - t,
                d_tautomer: 1.0 - x,
            },
            (Some(TitratableFamily::Histidine), TautomerDirection::Negative) => VdwPrefactor {
                scale: (1.0 - x) * (1.0 - t) + x,
                d_titration: t,
                d_tautomer: -(1.0 - x),
            },
            (Some(TitratableFamily::Lysine), _) => VdwPrefactor {
                scale: x,
                d_titration: 1.0,
                d_tautomer: 0.0,
            },
            _ => VdwPrefactor::UNSCALED,
        }
    }

    pub fn init_vdw(&self) {
        self.derivatives.reset(DerivativeChannel::Vdw);
    }

    pub fn init_perm_elec(&self) {
        self.derivatives.reset(DerivativeChannel::PermanentElectrostatics);
    }

    pub fn init_ind_elec(&self) {
        self.derivatives.reset(DerivativeChannel::InducedElectrostatics);
    }

    /// Accumulates the lambda derivative of one atom's share of a pair vdW energy.
    ///
    /// `vdw_energy` is the unscaled pair energy, `prefactor_i` the scaling of atom `atom_i`
    /// and `prefactor_j` the scale factor of its partner. Only titrating hydrogens
    /// contribute.
    pub fn add_vdw_deriv(
        &self,
        atom_i: usize,
        vdw_energy: f64,
        prefactor_i: &VdwPrefactor,
        prefactor_j: f64,
    ) {
        let Some(atom) = self.atoms.get(atom_i).filter(|a| a.is_titrating_hydrogen) else {
            return;
        };
        if let Some(esv) = atom.titration_esv {
            self.derivatives.add(
                DerivativeChannel::Vdw,
                esv,
                prefactor_i.d_titration * prefactor_j * vdw_energy,
            );
        }
        if let Some(esv) = atom.tautomer_esv {
            self.derivatives.add(
                DerivativeChannel::Vdw,
                esv,
                prefactor_i.d_tautomer * prefactor_j * vdw_energy,
            );
        }
    }

    fn add_elec_deriv(
        &self,
        channel: DerivativeChannel,
        atom: usize,
        titration: f64,
        tautomer: f64,
    ) {
        let Some(atom) = self.atoms.get(atom) else {
            return;
        };
        if let Some(esv) = atom.titration_esv {
            self.derivatives.add(channel, esv, titration);
        }
        if let Some(esv) = atom.tautomer_esv {
            self.derivatives.add(channel, esv, tautomer);
        }
    }

    pub fn add_perm_elec_deriv(&self, atom: usize, titration: f64, tautomer: f64) {
        self.add_elec_deriv(DerivativeChannel::PermanentElectrostatics, atom, titration, tautomer);
    }

    pub fn add_ind_elec_deriv(&self, atom: usize, titration: f64, tautomer: f64) {
        self.add_elec_deriv(DerivativeChannel::InducedElectrostatics, atom, titration, tautomer);
    }

    pub fn vdw_deriv(&self, esv: usize) -> f64 {
        self.derivatives.get(DerivativeChannel::Vdw, esv)
    }

    pub fn perm_elec_deriv(&self, esv: usize) -> f64 {
        self.derivatives.get(DerivativeChannel::PermanentElectrostatics, esv)
    }

    pub fn ind_elec_deriv(&self, esv: usize) -> f64 {
        self.derivatives.get(DerivativeChannel::InducedElectrostatics, esv)
    }

    /// dU/dλ of every ESV: bias plus the coupled channels of the derivative accumulators.
    pub fn derivatives(&self) -> Vec<f64> {
        let coupling = self.config.coupling;
        let mut du_dl = vec![0.0; self.n_esvs()];
        for (i, residue) in self.residues.iter().enumerate() {
            let mut esvs = vec![residue.titration_esv];
            esvs.extend(residue.tautomer_esv);

            if coupling.bias {
                let terms = self.bias_terms_at(i);
                du_dl[residue.titration_esv] += terms.titration_derivative();
                if let Some(esv) = residue.tautomer_esv {
                    du_dl[esv] += terms.tautomer_derivative();
                }
            }
            for esv in esvs {
                if coupling.vdw {
                    du_dl[esv] += self.vdw_deriv(esv);
                }
                if coupling.electrostatics {
                    du_dl[esv] += self.perm_elec_deriv(esv);
                    if coupling.polarization {
                        du_dl[esv] += self.ind_elec_deriv(esv);
                    }
                }
            }
        }
        du_dl
    }

    /// dU/dθ of every ESV, the gradient handed to the theta integrator.
    pub fn post_force(&self) -> Vec<f64> {
        self.derivatives()
            .into_iter()
            .zip(&self.theta.position)
            .map(|(du_dl, &theta)| du_dl * dlambda_dtheta(theta))
            .collect()
    }

    pub fn histogram(&self) -> &LambdaHistogram {
        &self.histogram
    }

    pub fn histogram_report(&self) -> String {
        self.histogram.report()
    }

    pub fn lambda_list(&self) -> String {
        let mut out = String::new();
        for (esv, lambda) in self.lambdas.iter().enumerate() {
            if esv == 0 {
                out.push_str("\n  Titration Lambdas: ");
            } else {
                out.push_str(", ");
            }
            if esv == self.n_titration {
                out.push_str("\n  Tautomer Lambdas: ");
            }
            out.push_str(&format!("{lambda:6.4}"));
        }
        out
    }

    /// Writes the theta state to a restart file and logs the occupancy histogram.
    pub fn write_restart(&self, path: &Path) -> Result<(), EngineError> {
        RestartState::from(&self.theta).write(path)?;
        info!(path = %path.display(), "Wrote extended system restart file");
        info!("Lambda occupancy:\n{}", self.histogram_report());
        debug!(lambdas = %self.lambda_list(), "Extended system lambdas");
        Ok(())
    }
}
