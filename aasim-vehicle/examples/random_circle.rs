//! Rolls out a random policy on the circle-tracking environment.
use aasim_core::{
    evaluator::{DefaultEvaluator, Evaluator},
    Env, Policy,
};
use aasim_vehicle::{
    ArenaBounds, CarAct, CircleEnv, CircleEnvConfig, CircleObs, KinematicBicycle, TimeLimit,
    TimeLimitConfig,
};
use anyhow::Result;
use clap::Parser;
use log::info;
use rand::{rngs::SmallRng, Rng, SeedableRng};

type TrackEnv = TimeLimit<CircleEnv<KinematicBicycle, ArenaBounds>>;

/// Random rollouts on the circle-tracking environment.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Radius of the circle [m].
    #[arg(long, default_value_t = 1.0)]
    radius: f64,

    /// Target velocity [m/s].
    #[arg(long, default_value_t = 2.0)]
    target_velocity: f64,

    /// Maximum number of steps in an episode.
    #[arg(long, default_value_t = 100)]
    max_steps: usize,

    /// Number of evaluation episodes.
    #[arg(long, default_value_t = 5)]
    n_episodes: usize,

    /// Random seed of the policy.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Saves the environment configuration to this YAML file.
    #[arg(long)]
    save_config: Option<String>,
}

struct RandomPolicy {
    rng: SmallRng,
    max_speed: f64,
    max_steer: f64,
}

impl Policy<TrackEnv> for RandomPolicy {
    fn sample(&mut self, _obs: &CircleObs) -> CarAct {
        CarAct::new(
            self.rng.gen_range(0.0..=self.max_speed),
            self.rng.gen_range(-self.max_steer..=self.max_steer),
        )
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let model = KinematicBicycle::default();
    let env_config =
        CircleEnvConfig::<KinematicBicycle, ArenaBounds>::new(args.radius, args.target_velocity)
            .model(model.clone())
            .collision(ArenaBounds::new(3.0 * args.radius, 3.0 * args.radius));
    if let Some(path) = &args.save_config {
        env_config.save(path)?;
        info!("Saved the configuration in {}", path);
    }
    let config = TimeLimitConfig::new(env_config, args.max_steps);

    let mut policy = RandomPolicy {
        rng: SmallRng::seed_from_u64(args.seed),
        max_speed: 2.0 * args.target_velocity,
        max_steer: model.max_steer,
    };

    // A single episode, logging the tracking errors.
    let mut env = TrackEnv::build(&config, args.seed as i64)?;
    let mut obs = env.reset()?;
    loop {
        let (step, record) = env.step(&policy.sample(&obs));
        info!(
            "step {:3}: reward = {:8.3}, dist = {:7.3}, vel = {:7.3}",
            env.n_steps(),
            step.reward,
            record.get_scalar("dist")?,
            record.get_scalar("vel")?
        );
        if step.is_done() {
            break;
        }
        obs = step.obs;
    }

    let mut evaluator =
        DefaultEvaluator::<TrackEnv>::new(&config, args.seed as i64, args.n_episodes)?;
    let record = evaluator.evaluate(&mut policy)?;
    info!("Average return: {}", record.get_scalar("Episode return")?);

    Ok(())
}
