/// Maps a theta coordinate to its lambda, `sin²θ`.
#[inline]
pub fn lambda_from_theta(theta: f64) -> f64 {
    let s = theta.sin();
    s * s
}

/// Inverse of [`lambda_from_theta`] on `[0, π/2]`.
#[inline]
pub fn theta_from_lambda(lambda: f64) -> f64 {
    lambda.sqrt().asin()
}

/// Chain-rule factor `dλ/dθ = sin 2θ`.
#[inline]
pub fn dlambda_dtheta(theta: f64) -> f64 {
    (2.0 * theta).sin()
}

/// Phase-space state of the theta particles, titration ESVs first, then tautomer ESVs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThetaState {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub acceleration: Vec<f64>,
}

impl ThetaState {
    pub fn zeros(n: usize) -> Self {
        Self {
            position: vec![0.0; n],
            velocity: vec![0.0; n],
            acceleration: vec![0.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Common length of the three arrays, or `None` when they disagree.
    pub(crate) fn consistent_len(&self) -> Option<usize> {
        let n = self.position.len();
        (self.velocity.len() == n && self.acceleration.len() == n).then_some(n)
    }
}
