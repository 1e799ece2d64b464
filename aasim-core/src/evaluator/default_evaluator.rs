//! Default implementation of the [`Evaluator`] trait.
//!
//! This module provides a simple evaluator that runs a fixed number of episodes
//! and calculates the average return across all episodes.
use super::Evaluator;
use crate::{
    error::AasimError,
    record::{Record, RecordValue},
    Env, Policy,
};
use anyhow::Result;
use log::info;

/// Runs a fixed number of episodes and reports the average return.
///
/// Episodes run until the environment reports [`Step::is_done`](crate::Step::is_done),
/// so environments without a natural end should be wrapped with a step limit.
///
/// ```ignore
/// let mut evaluator = DefaultEvaluator::<Env>::new(&config, 42, 10)?;
/// let record = evaluator.evaluate(&mut policy)?;
/// println!("Average return: {}", record.get_scalar("Episode return")?);
/// ```
pub struct DefaultEvaluator<E: Env> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let mut r_total = 0f64;
        let mut n_steps = 0usize;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;

            loop {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act);
                r_total += step.reward;
                n_steps += 1;
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }
        }

        let r_mean = r_total / self.n_episodes as f64;
        info!(
            "Evaluated {} episodes ({} steps), average return = {}",
            self.n_episodes, n_steps, r_mean
        );

        let mut record = Record::from_scalar("Episode return", r_mean);
        record.insert(
            "Episode length",
            RecordValue::Scalar(n_steps as f64 / self.n_episodes as f64),
        );
        Ok(record)
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`].
    ///
    /// * `config` - Configuration for the environment
    /// * `seed` - Random seed for environment initialization
    /// * `n_episodes` - Number of episodes to run during evaluation, at least 1
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        if n_episodes == 0 {
            return Err(AasimError::InvalidConfig(
                "n_episodes must be at least 1".to_string(),
            )
            .into());
        }
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }
}
