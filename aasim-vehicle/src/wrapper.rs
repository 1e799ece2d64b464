//! Wrappers of environments.
use aasim_core::{record::Record, Env, Step};
use anyhow::Result;
use log::trace;
use serde::{Deserialize, Serialize};

/// Configuration of [`TimeLimit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLimitConfig<C> {
    /// Configuration of the wrapped environment.
    pub env_config: C,

    /// The maximum number of steps in an episode.
    pub max_steps: usize,
}

impl<C> TimeLimitConfig<C> {
    /// Constructs a configuration.
    pub fn new(env_config: C, max_steps: usize) -> Self {
        Self {
            env_config,
            max_steps,
        }
    }
}

/// Truncates episodes of the wrapped environment after a fixed number of steps.
pub struct TimeLimit<E> {
    env: E,
    max_steps: usize,
    n_steps: usize,
}

impl<E: Env> TimeLimit<E> {
    /// Wraps an environment.
    pub fn new(env: E, max_steps: usize) -> Self {
        Self {
            env,
            max_steps,
            n_steps: 0,
        }
    }

    /// The wrapped environment.
    pub fn inner(&self) -> &E {
        &self.env
    }

    /// The wrapped environment.
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Number of steps in the current episode.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }
}

impl<E: Env> Env for TimeLimit<E> {
    type Config = TimeLimitConfig<E::Config>;
    type Obs = E::Obs;
    type Act = E::Act;
    type Info = E::Info;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self::new(
            E::build(&config.env_config, seed)?,
            config.max_steps,
        ))
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (step, record) = self.env.step(a);
        self.n_steps += 1;

        let is_truncated = step.is_truncated || self.n_steps >= self.max_steps;
        if is_truncated && !step.is_terminated {
            trace!("Episode truncated after {} steps", self.n_steps);
        }

        let step = Step::new(
            step.obs,
            step.act,
            step.reward,
            step.is_terminated,
            is_truncated,
            step.info,
        );
        (step, record)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.n_steps = 0;
        self.env.reset()
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.n_steps = 0;
        self.env.reset_with_index(ix)
    }
}
