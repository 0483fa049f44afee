use crate::core::titration::constants::Titration;
use crate::core::titration::tables::SoluteRadiiSource;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Which energy terms are coupled to the lambda particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CouplingConfig {
    pub vdw: bool,
    pub electrostatics: bool,
    pub bias: bool,
    pub polarization: bool,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            vdw: true,
            electrostatics: true,
            bias: true,
            polarization: true,
        }
    }
}

/// Model-compound calibration used by the bias of the acids.
///
/// Only the ASH and GLH constants are overridable; histidine and lysine always use the
/// calibrated values.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReferenceOverrides {
    pub ash_ref_energy: f64,
    pub ash_lambda_intercept: f64,
    pub glh_ref_energy: f64,
    pub glh_lambda_intercept: f64,
}

impl Default for ReferenceOverrides {
    fn default() -> Self {
        Self {
            ash_ref_energy: Titration::AshToAsp.ref_energy(),
            ash_lambda_intercept: Titration::AshToAsp.lambda_intercept(),
            glh_ref_energy: Titration::GlhToGlu.ref_energy(),
            glh_lambda_intercept: Titration::GlhToGlu.lambda_intercept(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtendedSystemConfig {
    pub ph: f64,
    /// Thermostat temperature in Kelvin, used by the pH bias.
    pub temperature: f64,
    /// Fictitious mass of every theta particle (amu).
    pub theta_mass: f64,
    /// Langevin friction of the theta particles (1/ps), read by the integrator.
    pub theta_friction: f64,
    pub titration_bias_magnitude: f64,
    pub tautomer_bias_magnitude: f64,
    pub initial_titration_lambda: f64,
    pub initial_tautomer_lambda: f64,
    pub fix_titration_state: bool,
    pub fix_tautomer_state: bool,
    pub coupling: CouplingConfig,
    pub reference: ReferenceOverrides,
    pub solute_radii: SoluteRadiiSource,
    /// Seeds the theta velocity draw; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for ExtendedSystemConfig {
    fn default() -> Self {
        Self {
            ph: 7.4,
            temperature: 298.15,
            theta_mass: 5.0,
            theta_friction: 5.0,
            titration_bias_magnitude: 1.0,
            tautomer_bias_magnitude: 1.0,
            initial_titration_lambda: 0.5,
            initial_tautomer_lambda: 0.5,
            fix_titration_state: false,
            fix_tautomer_state: false,
            coupling: CouplingConfig::default(),
            reference: ReferenceOverrides::default(),
            solute_radii: SoluteRadiiSource::default(),
            seed: None,
        }
    }
}

impl ExtendedSystemConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let lambda_in_range = |name, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("lambda must lie in [0, 1], got {value}"),
                })
            }
        };
        lambda_in_range("initial_titration_lambda", self.initial_titration_lambda)?;
        lambda_in_range("initial_tautomer_lambda", self.initial_tautomer_lambda)?;

        let positive = |name, value: f64| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("must be positive, got {value}"),
                })
            }
        };
        positive("temperature", self.temperature)?;
        positive("theta_mass", self.theta_mass)?;

        if !self.ph.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "ph",
                reason: format!("must be finite, got {}", self.ph),
            });
        }
        if self.theta_friction < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "theta_friction",
                reason: format!("must not be negative, got {}", self.theta_friction),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct ExtendedSystemConfigBuilder {
    ph: Option<f64>,
    temperature: Option<f64>,
    theta_mass: Option<f64>,
    theta_friction: Option<f64>,
    titration_bias_magnitude: Option<f64>,
    tautomer_bias_magnitude: Option<f64>,
    initial_titration_lambda: Option<f64>,
    initial_tautomer_lambda: Option<f64>,
    fix_titration_state: Option<bool>,
    fix_tautomer_state: Option<bool>,
    coupling: Option<CouplingConfig>,
    reference: Option<ReferenceOverrides>,
    solute_radii: Option<SoluteRadiiSource>,
    seed: Option<u64>,
}

impl ExtendedSystemConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ph(mut self, ph: f64) -> Self {
        self.ph = Some(ph);
        self
    }
    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn theta_mass(mut self, mass: f64) -> Self {
        self.theta_mass = Some(mass);
        self
    }
    pub fn theta_friction(mut self, friction: f64) -> Self {
        self.theta_friction = Some(friction);
        self
    }
    pub fn titration_bias_magnitude(mut self, magnitude: f64) -> Self {
        self.titration_bias_magnitude = Some(magnitude);
        self
    }
    pub fn tautomer_bias_magnitude(mut self, magnitude: f64) -> Self {
        self.tautomer_bias_magnitude = Some(magnitude);
        self
    }
    pub fn initial_titration_lambda(mut self, lambda: f64) -> Self {
        self.initial_titration_lambda = Some(lambda);
        self
    }
    pub fn initial_tautomer_lambda(mut self, lambda: f64) -> Self {
        self.initial_tautomer_lambda = Some(lambda);
        self
    }
    pub fn fix_titration_state(mut self, fixed: bool) -> Self {
        self.fix_titration_state = Some(fixed);
        self
    }
    pub fn fix_tautomer_state(mut self, fixed: bool) -> Self {
        self.fix_tautomer_state = Some(fixed);
        self
    }
    pub fn coupling(mut self, coupling: CouplingConfig) -> Self {
        self.coupling = Some(coupling);
        self
    }
    pub fn reference(mut self, reference: ReferenceOverrides) -> Self {
        self.reference = Some(reference);
        self
    }
    pub fn solute_radii(mut self, source: SoluteRadiiSource) -> Self {
        self.solute_radii = Some(source);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration. The pH is required; everything else falls back to the
    /// defaults of [`ExtendedSystemConfig`].
    pub fn build(self) -> Result<ExtendedSystemConfig, ConfigError> {
        let defaults = ExtendedSystemConfig::default();
        let config = ExtendedSystemConfig {
            ph: self.ph.ok_or(ConfigError::MissingParameter("ph"))?,
            temperature: self.temperature.unwrap_or(defaults.temperature),
            theta_mass: self.theta_mass.unwrap_or(defaults.theta_mass),
            theta_friction: self.theta_friction.unwrap_or(defaults.theta_friction),
            titration_bias_magnitude: self
                .titration_bias_magnitude
                .unwrap_or(defaults.titration_bias_magnitude),
            tautomer_bias_magnitude: self
                .tautomer_bias_magnitude
                .unwrap_or(defaults.tautomer_bias_magnitude),
            initial_titration_lambda: self
                .initial_titration_lambda
                .unwrap_or(defaults.initial_titration_lambda),
            initial_tautomer_lambda: self
                .initial_tautomer_lambda
                .unwrap_or(defaults.initial_tautomer_lambda),
            fix_titration_state: self.fix_titration_state.unwrap_or(defaults.fix_titration_state),
            fix_tautomer_state: self.fix_tautomer_state.unwrap_or(defaults.fix_tautomer_state),
            coupling: self.coupling.unwrap_or(defaults.coupling),
            reference: self.reference.unwrap_or(defaults.reference),
            solute_radii: self.solute_radii.unwrap_or(defaults.solute_radii),
            seed: self.seed.or(defaults.seed),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_documented_values() {
        let config = ExtendedSystemConfig::default();
        assert_eq!(config.ph, 7.4);
        assert_eq!(config.temperature, 298.15);
        assert_eq!(config.theta_mass, 5.0);
        assert_eq!(config.theta_friction, 5.0);
        assert_eq!(config.titration_bias_magnitude, 1.0);
        assert_eq!(config.initial_titration_lambda, 0.5);
        assert!(config.coupling.vdw && config.coupling.bias);
        assert_eq!(config.reference.ash_ref_energy, -71.96);
        assert_eq!(config.reference.glh_lambda_intercept, 0.0);
    }

    #[test]
    fn builder_requires_ph() {
        let result = ExtendedSystemConfigBuilder::new().temperature(300.0).build();
        assert!(matches!(result, Err(ConfigError::MissingParameter("ph"))));
    }

    #[test]
    fn builder_applies_overrides_and_defaults() {
        let config = ExtendedSystemConfigBuilder::new()
            .ph(4.5)
            .theta_mass(10.0)
            .fix_tautomer_state(true)
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(config.ph, 4.5);
        assert_eq!(config.theta_mass, 10.0);
        assert!(config.fix_tautomer_state);
        assert!(!config.fix_titration_state);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.temperature, 298.15);
    }

    #[test]
    fn builder_rejects_out_of_range_initial_lambda() {
        let result = ExtendedSystemConfigBuilder::new()
            .ph(7.0)
            .initial_titration_lambda(1.5)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "initial_titration_lambda",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_non_positive_mass() {
        let result = ExtendedSystemConfigBuilder::new().ph(7.0).theta_mass(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "theta_mass", .. })
        ));
    }

    #[test]
    fn load_reads_partial_toml_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("esv.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"ph = 4.0
fix_titration_state = true
solute_radii = "vdw"

[coupling]
vdw = false

[reference]
ash_lambda_intercept = 0.05
"#
        )
        .unwrap();

        let config = ExtendedSystemConfig::load(&path).unwrap();
        assert_eq!(config.ph, 4.0);
        assert!(config.fix_titration_state);
        assert_eq!(config.solute_radii, SoluteRadiiSource::Vdw);
        assert!(!config.coupling.vdw);
        assert!(config.coupling.electrostatics);
        assert_eq!(config.reference.ash_lambda_intercept, 0.05);
        assert_eq!(config.reference.ash_ref_energy, -71.96);
    }

    #[test]
    fn load_reports_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "ph = \"acidic\"").unwrap();
        assert!(matches!(ExtendedSystemConfig::load(&path), Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = ExtendedSystemConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
