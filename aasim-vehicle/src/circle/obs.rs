//! Observation of [`CircleEnv`](super::CircleEnv).
use aasim_core::Obs;
use ndarray::Array1;

/// Tracking error of a vehicle relative to the target circle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CircleObs {
    /// Signed radial distance from the circle, positive outside.
    pub dx: f64,

    /// Heading error against the tangent of the circle, in `[-pi, pi)`.
    pub theta: f64,

    /// Radial velocity.
    pub ddx: f64,

    /// Angular velocity error.
    pub dtheta: f64,
}

impl CircleObs {
    /// Number of elements.
    pub const DIM: usize = 4;

    /// Returns `[dx, theta, ddx, dtheta]`.
    pub fn as_array(&self) -> [f64; 4] {
        [self.dx, self.theta, self.ddx, self.dtheta]
    }
}

impl Obs for CircleObs {
    fn len(&self) -> usize {
        Self::DIM
    }
}

impl From<CircleObs> for Vec<f32> {
    fn from(obs: CircleObs) -> Self {
        obs.as_array().iter().map(|&v| v as f32).collect()
    }
}

impl From<CircleObs> for Array1<f32> {
    fn from(obs: CircleObs) -> Self {
        Array1::from(Vec::<f32>::from(obs))
    }
}
