//! Renderers attached to a vehicle simulation.
use crate::VehicleState;

/// Receives the states of a simulation for display.
pub trait Renderer {
    /// Clears everything drawn in the previous episode.
    fn reset(&mut self);

    /// Draws a state.
    fn render(&mut self, state: &VehicleState);
}

/// Keeps the poses `(x, y, yaw)` of the current episode in memory.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryRecorder {
    poses: Vec<(f64, f64, f64)>,
    n_resets: usize,
}

impl TrajectoryRecorder {
    /// Poses rendered since the last reset.
    pub fn poses(&self) -> &[(f64, f64, f64)] {
        &self.poses
    }

    /// Number of times the renderer has been reset.
    pub fn n_resets(&self) -> usize {
        self.n_resets
    }
}

impl Renderer for TrajectoryRecorder {
    fn reset(&mut self) {
        self.poses.clear();
        self.n_resets += 1;
    }

    fn render(&mut self, state: &VehicleState) {
        self.poses.push((state.x, state.y, state.yaw));
    }
}
