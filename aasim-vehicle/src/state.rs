//! Absolute state of a vehicle.
use serde::{Deserialize, Serialize};

/// World-frame state `[x, y, yaw, x_dot, y_dot, yaw_dot]` of a vehicle.
///
/// Position in meters, heading in radians, and their time derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VehicleState {
    /// Position along the x axis.
    pub x: f64,

    /// Position along the y axis.
    pub y: f64,

    /// Heading, not wrapped.
    pub yaw: f64,

    /// Velocity along the x axis.
    pub x_dot: f64,

    /// Velocity along the y axis.
    pub y_dot: f64,

    /// Yaw rate.
    pub yaw_dot: f64,
}

impl VehicleState {
    /// Planar speed `sqrt(x_dot^2 + y_dot^2)`.
    pub fn speed(&self) -> f64 {
        (self.x_dot * self.x_dot + self.y_dot * self.y_dot).sqrt()
    }

    /// Euclidean distance of the position from the origin.
    pub fn distance_from_origin(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl From<[f64; 6]> for VehicleState {
    fn from(v: [f64; 6]) -> Self {
        Self {
            x: v[0],
            y: v[1],
            yaw: v[2],
            x_dot: v[3],
            y_dot: v[4],
            yaw_dot: v[5],
        }
    }
}

impl From<VehicleState> for [f64; 6] {
    fn from(s: VehicleState) -> Self {
        [s.x, s.y, s.yaw, s.x_dot, s.y_dot, s.yaw_dot]
    }
}
