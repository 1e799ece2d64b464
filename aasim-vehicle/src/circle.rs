//! Environment for an RC car following a circle of given radius.
mod base;
mod config;
mod obs;
pub use base::{
    normalize_angle, CircleEnv, CircleInfo, KinematicCircleEnv, COLLISION_REWARD,
    VELOCITY_PENALTY,
};
pub use config::{CircleEnvConfig, DomainRandomization};
pub use obs::CircleObs;
