use super::config::ConfigError;
use super::extended::restart::RestartError;
use crate::core::titration::tables::TitrationTableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Titration parameter tables could not be built: {source}")]
    Parameterization {
        #[from]
        source: TitrationTableError,
    },

    #[error("Restart file error: {source}")]
    Restart {
        #[from]
        source: RestartError,
    },

    #[error("Theta state has {found} entries, expected {expected}")]
    ThetaLength { expected: usize, found: usize },

    #[error("Extended variable index {index} is out of range ({count} variables)")]
    EsvIndexOutOfRange { index: usize, count: usize },

    #[error("Energy evaluation failed: {0}")]
    Evaluation(String),
}
