//! Vehicle dynamics.
use crate::VehicleState;
use aasim_core::{error::AasimError, Act};
use serde::{Deserialize, Serialize};

/// Dynamics model advancing a [`VehicleState`] by one timestep.
pub trait StateTransition {
    /// Control input consumed by the model.
    type Act: Act;

    /// Returns the state after applying `act` to `state` for `dt` seconds.
    fn state_transition(&self, state: &VehicleState, act: &Self::Act, dt: f64) -> VehicleState;

    /// Checks the parameters of the model before it is used in a simulation.
    fn validate(&self) -> Result<(), AasimError> {
        Ok(())
    }
}

/// Commanded speed and steering angle of an RC car.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CarAct {
    /// Commanded speed [m/s].
    pub velocity: f64,

    /// Front wheel steering angle [rad], positive to the left.
    pub steering: f64,
}

impl CarAct {
    /// Constructs an action.
    pub fn new(velocity: f64, steering: f64) -> Self {
        Self { velocity, steering }
    }
}

impl Act for CarAct {}

impl From<[f64; 2]> for CarAct {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

/// Kinematic bicycle model of an RC car.
///
/// The commanded speed is reached instantly; wheel slip is ignored.
/// Velocities in the returned state are expressed in the world frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBicycle {
    /// Distance from the center of mass to the front axle [m].
    pub l_f: f64,

    /// Distance from the center of mass to the rear axle [m].
    pub l_r: f64,

    /// Steering limit [rad].
    pub max_steer: f64,

    /// Speed limit [m/s].
    pub max_speed: f64,
}

impl Default for KinematicBicycle {
    fn default() -> Self {
        Self {
            l_f: 0.1,
            l_r: 0.1,
            max_steer: 0.44,
            max_speed: 5.0,
        }
    }
}

impl KinematicBicycle {
    /// Sets the axle distances from the center of mass.
    pub fn axles(mut self, l_f: f64, l_r: f64) -> Self {
        self.l_f = l_f;
        self.l_r = l_r;
        self
    }

    /// Sets the steering limit.
    pub fn max_steer(mut self, v: f64) -> Self {
        self.max_steer = v;
        self
    }

    /// Sets the speed limit.
    pub fn max_speed(mut self, v: f64) -> Self {
        self.max_speed = v;
        self
    }

    /// Slip angle of the center of mass for a steering angle.
    fn slip_angle(&self, steering: f64) -> f64 {
        (self.l_r * steering.tan() / (self.l_f + self.l_r)).atan()
    }
}

impl StateTransition for KinematicBicycle {
    type Act = CarAct;

    fn state_transition(&self, state: &VehicleState, act: &CarAct, dt: f64) -> VehicleState {
        let v = act.velocity.clamp(-self.max_speed, self.max_speed);
        let delta = act.steering.clamp(-self.max_steer, self.max_steer);
        let beta = self.slip_angle(delta);

        let x_dot = v * (state.yaw + beta).cos();
        let y_dot = v * (state.yaw + beta).sin();
        let yaw_dot = v * beta.sin() / self.l_r;

        VehicleState {
            x: state.x + x_dot * dt,
            y: state.y + y_dot * dt,
            yaw: state.yaw + yaw_dot * dt,
            x_dot,
            y_dot,
            yaw_dot,
        }
    }

    /// Rejects non-positive rear axle distances and negative limits.
    fn validate(&self) -> Result<(), AasimError> {
        if !(self.l_r > 0.0 && self.l_f >= 0.0) {
            return Err(AasimError::InvalidConfig(format!(
                "axle distances must satisfy l_r > 0 and l_f >= 0, got l_f={}, l_r={}",
                self.l_f, self.l_r
            )));
        }
        if !(self.max_steer >= 0.0 && self.max_speed >= 0.0) {
            return Err(AasimError::InvalidConfig(
                "steering and speed limits must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}
