use super::theta::ThetaState;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestartError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Restart parsing error for '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Restart serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Restart file holds {found} extended variables, the system has {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThetaRecord {
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

/// On-disk theta state. Records are ordered titration ESVs first, then tautomer ESVs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RestartState {
    #[serde(default)]
    pub esv: Vec<ThetaRecord>,
}

impl From<&ThetaState> for RestartState {
    fn from(theta: &ThetaState) -> Self {
        let esv = theta
            .position
            .iter()
            .zip(&theta.velocity)
            .zip(&theta.acceleration)
            .map(|((&position, &velocity), &acceleration)| ThetaRecord {
                position,
                velocity,
                acceleration,
            })
            .collect();
        Self { esv }
    }
}

impl RestartState {
    pub fn into_theta(self, expected: usize) -> Result<ThetaState, RestartError> {
        if self.esv.len() != expected {
            return Err(RestartError::LengthMismatch {
                expected,
                found: self.esv.len(),
            });
        }
        let mut theta = ThetaState::zeros(expected);
        for (i, record) in self.esv.into_iter().enumerate() {
            theta.position[i] = record.position;
            theta.velocity[i] = record.velocity;
            theta.acceleration[i] = record.acceleration;
        }
        Ok(theta)
    }

    pub fn read(path: &Path) -> Result<Self, RestartError> {
        let content = std::fs::read_to_string(path).map_err(|e| RestartError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| RestartError::Parse {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), RestartError> {
        let content = toml::to_string(self)?;
        std::fs::write(path, content).map_err(|e| RestartError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_theta() -> ThetaState {
        ThetaState {
            position: vec![0.1, 0.7, 1.2],
            velocity: vec![-0.5, 0.25, 0.0],
            acceleration: vec![3.0, -1.5, 0.125],
        }
    }

    #[test]
    fn written_restart_reads_back_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("system.esv");
        RestartState::from(&sample_theta()).write(&path).unwrap();

        let theta = RestartState::read(&path).unwrap().into_theta(3).unwrap();
        assert_eq!(theta, sample_theta());
    }

    #[test]
    fn length_mismatch_is_fatal() {
        let state = RestartState::from(&sample_theta());
        let err = state.into_theta(2).unwrap_err();
        assert!(matches!(err, RestartError::LengthMismatch { expected: 2, found: 3 }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.esv");
        std::fs::write(&path, "[[esv]]\nposition = \"zero\"\n").unwrap();
        assert!(matches!(RestartState::read(&path), Err(RestartError::Parse { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = RestartState::read(&dir.path().join("nothing.esv"));
        assert!(matches!(result, Err(RestartError::Io { .. })));
    }
}
