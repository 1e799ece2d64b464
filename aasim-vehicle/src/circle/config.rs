//! Configuration of [`CircleEnv`](super::CircleEnv).
use crate::{KinematicBicycle, NoCollision};
use aasim_core::error::AasimError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Total widths of the uniform perturbations of the initial state.
///
/// Each variable is drawn from an interval of the given width centered at its
/// nominal value, except `y_dot`, which is drawn from `(-width, 0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRandomization {
    /// Width of the interval of `x` [m].
    pub position_margin: f64,

    /// Width of the interval of the heading [deg].
    pub angle_margin_deg: f64,

    /// Width of the velocity intervals as a multiple of the target velocity.
    pub velocity_scale: f64,

    /// Width of the interval of the yaw rate [rad/s].
    pub yaw_dot_margin: f64,
}

impl Default for DomainRandomization {
    fn default() -> Self {
        Self {
            position_margin: 0.5,
            angle_margin_deg: 60.0,
            velocity_scale: 1.5,
            yaw_dot_margin: 2.0,
        }
    }
}

impl DomainRandomization {
    /// No perturbation: every episode starts from the nominal state.
    pub fn none() -> Self {
        Self {
            position_margin: 0.0,
            angle_margin_deg: 0.0,
            velocity_scale: 0.0,
            yaw_dot_margin: 0.0,
        }
    }
}

/// Configuration of [`CircleEnv`](super::CircleEnv).
///
/// The radius and the target velocity have no defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleEnvConfig<M = KinematicBicycle, C = NoCollision> {
    /// Radius of the circle to follow [m].
    pub radius: f64,

    /// Target speed [m/s].
    pub target_velocity: f64,

    /// Integration timestep [s].
    pub dt: f64,

    /// Dynamics model.
    pub model: M,

    /// Collision check.
    pub collision: C,

    /// Perturbation of the initial state.
    pub randomization: DomainRandomization,
}

impl<M: Default, C: Default> CircleEnvConfig<M, C> {
    /// Constructs a configuration with default model, collision check and timestep.
    pub fn new(radius: f64, target_velocity: f64) -> Self {
        Self {
            radius,
            target_velocity,
            dt: 0.1,
            model: M::default(),
            collision: C::default(),
            randomization: DomainRandomization::default(),
        }
    }
}

impl<M, C> CircleEnvConfig<M, C> {
    /// Sets the integration timestep.
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Sets the dynamics model.
    pub fn model(mut self, model: M) -> Self {
        self.model = model;
        self
    }

    /// Sets the collision check.
    pub fn collision(mut self, collision: C) -> Self {
        self.collision = collision;
        self
    }

    /// Sets the perturbation of the initial state.
    pub fn randomization(mut self, randomization: DomainRandomization) -> Self {
        self.randomization = randomization;
        self
    }

    /// Checks the ranges of the scalar parameters.
    pub fn validate(&self) -> Result<(), AasimError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(AasimError::InvalidConfig(format!(
                "radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(AasimError::InvalidConfig(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        if !self.target_velocity.is_finite() {
            return Err(AasimError::InvalidConfig(format!(
                "target_velocity must be finite, got {}",
                self.target_velocity
            )));
        }
        Ok(())
    }
}

impl<M, C> CircleEnvConfig<M, C>
where
    M: Serialize + for<'de> Deserialize<'de>,
    C: Serialize + for<'de> Deserialize<'de>,
{
    /// Constructs [`CircleEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`CircleEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArenaBounds;
    use tempdir::TempDir;

    #[test]
    fn test_serde_circle_env_config() -> Result<()> {
        let config = CircleEnvConfig::<KinematicBicycle, ArenaBounds>::new(1.5, 2.0)
            .dt(0.05)
            .model(KinematicBicycle::default().max_steer(0.3))
            .collision(ArenaBounds::new(4.0, 4.0));

        let dir = TempDir::new("circle_env_config")?;
        let path = dir.path().join("circle_env_config.yaml");

        config.save(&path)?;
        let config_ = CircleEnvConfig::<KinematicBicycle, ArenaBounds>::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }

    #[test]
    fn test_validate() {
        let config: CircleEnvConfig = CircleEnvConfig::new(1.0, 2.0);
        assert!(config.validate().is_ok());
        assert!(config.clone().dt(0.0).validate().is_err());

        let config: CircleEnvConfig = CircleEnvConfig::new(0.0, 2.0);
        assert!(config.validate().is_err());
        let config: CircleEnvConfig = CircleEnvConfig::new(f64::NAN, 2.0);
        assert!(config.validate().is_err());
        let config: CircleEnvConfig = CircleEnvConfig::new(1.0, f64::INFINITY);
        assert!(config.validate().is_err());
    }
}
