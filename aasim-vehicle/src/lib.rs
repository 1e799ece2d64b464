#![warn(missing_docs)]
//! RC car tracking environments.
//!
//! A [`VehicleContext`] bundles the collaborators of a vehicle simulation:
//! a dynamics model implementing [`StateTransition`], a [`CollisionCheck`],
//! an optional [`Renderer`], the integration timestep and the target velocity.
//! [`CircleEnv`] uses the context to simulate an RC car following a circle of
//! a given radius, and emits observations relative to the circle.
//!
//! ```rust
//! use aasim_core::Env;
//! use aasim_vehicle::{CarAct, CircleEnvConfig, KinematicCircleEnv};
//!
//! let config = CircleEnvConfig::new(1.0, 2.0);
//! let mut env = KinematicCircleEnv::build(&config, 42).unwrap();
//! let obs = env.reset().unwrap();
//! let (step, _record) = env.step(&CarAct::new(2.0, 0.2));
//! assert!(!step.is_done());
//! # let _ = obs;
//! ```
mod circle;
mod collision;
mod context;
mod model;
mod renderer;
mod state;
mod wrapper;

pub use circle::{
    normalize_angle, CircleEnv, CircleEnvConfig, CircleInfo, CircleObs, DomainRandomization,
    KinematicCircleEnv, COLLISION_REWARD, VELOCITY_PENALTY,
};
pub use collision::{ArenaBounds, CollisionCheck, NoCollision};
pub use context::VehicleContext;
pub use model::{CarAct, KinematicBicycle, StateTransition};
pub use renderer::{Renderer, TrajectoryRecorder};
pub use state::VehicleState;
pub use wrapper::{TimeLimit, TimeLimitConfig};
