//! Collision checks.
use crate::VehicleState;
use serde::{Deserialize, Serialize};

/// Decides whether a vehicle state is in collision.
pub trait CollisionCheck {
    /// Returns `true` if `state` collides with something.
    fn check_collision(&self, state: &VehicleState) -> bool;
}

impl<F> CollisionCheck for F
where
    F: Fn(&VehicleState) -> bool,
{
    fn check_collision(&self, state: &VehicleState) -> bool {
        self(state)
    }
}

/// An empty world without obstacles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoCollision;

impl CollisionCheck for NoCollision {
    fn check_collision(&self, _state: &VehicleState) -> bool {
        false
    }
}

/// A rectangular arena centered at the origin; leaving it is a collision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    /// Half of the extent along the x axis [m].
    pub half_width: f64,

    /// Half of the extent along the y axis [m].
    pub half_height: f64,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            half_width: 3.0,
            half_height: 3.0,
        }
    }
}

impl ArenaBounds {
    /// Constructs an arena.
    pub fn new(half_width: f64, half_height: f64) -> Self {
        Self {
            half_width,
            half_height,
        }
    }
}

impl CollisionCheck for ArenaBounds {
    fn check_collision(&self, state: &VehicleState) -> bool {
        // NaN positions are reported as collisions.
        !(state.x.abs() <= self.half_width && state.y.abs() <= self.half_height)
    }
}
