use aasim_core::{
    evaluator::{DefaultEvaluator, Evaluator},
    Env, Obs, Policy,
};
use aasim_vehicle::{
    ArenaBounds, CarAct, CircleEnv, CircleEnvConfig, DomainRandomization, KinematicBicycle,
    KinematicCircleEnv, StateTransition, TimeLimit, TimeLimitConfig, TrajectoryRecorder,
    VehicleContext, VehicleState, COLLISION_REWARD, VELOCITY_PENALTY,
};
use anyhow::Result;
use rand::{rngs::SmallRng, SeedableRng};

const EPS: f64 = 1e-12;

fn config(radius: f64, target_velocity: f64) -> CircleEnvConfig {
    CircleEnvConfig::new(radius, target_velocity)
}

#[test]
fn test_reset_observation_matches_state() -> Result<()> {
    let mut env = KinematicCircleEnv::build(&config(1.0, 2.0), 42)?;
    let obs = env.reset()?;
    let s = *env.state();

    assert_eq!(obs.len(), 4);
    assert_eq!(obs.as_array().len(), 4);
    assert!((obs.dx - ((s.x * s.x + s.y * s.y).sqrt() - 1.0)).abs() < EPS);
    assert!(env.action().is_none());
    Ok(())
}

#[test]
fn test_initial_state_margins() -> Result<()> {
    let (radius, v) = (1.5, 2.0);
    let mut env = KinematicCircleEnv::build(&config(radius, v), 7)?;

    for _ in 0..2000 {
        let s = env.initial_state();
        assert!(s.x >= -radius - 0.25 && s.x <= -radius + 0.25, "x = {}", s.x);
        assert_eq!(s.y, 0.0);
        assert!(
            s.yaw >= 240f64.to_radians() - EPS && s.yaw <= 300f64.to_radians() + EPS,
            "yaw = {}",
            s.yaw
        );
        assert!(s.x_dot.abs() <= 0.75 * v, "x_dot = {}", s.x_dot);
        assert!(s.y_dot <= 0.0 && s.y_dot >= -1.5 * v, "y_dot = {}", s.y_dot);
        assert!(s.yaw_dot.abs() <= 1.0, "yaw_dot = {}", s.yaw_dot);
    }
    Ok(())
}

#[test]
fn test_initial_state_without_randomization() -> Result<()> {
    let config = config(2.0, 1.0).randomization(DomainRandomization::none());
    let mut env = KinematicCircleEnv::build(&config, 0)?;
    let obs = env.reset()?;
    let s = *env.state();

    assert_eq!(s.x, -2.0);
    assert!((s.yaw - 270f64.to_radians()).abs() < EPS);
    assert_eq!(s.speed(), 0.0);
    assert!(obs.dx.abs() < EPS);
    assert!(obs.theta.abs() < 1e-9);
    Ok(())
}

#[test]
fn test_seeded_episodes_are_reproducible() -> Result<()> {
    let mut e1 = KinematicCircleEnv::build(&config(1.0, 2.0), 3)?;
    let mut e2 = KinematicCircleEnv::build(&config(1.0, 2.0), 3)?;
    let mut e3 = KinematicCircleEnv::build(&config(1.0, 2.0), 4)?;

    e1.reset()?;
    e2.reset()?;
    e3.reset()?;
    assert_eq!(e1.state(), e2.state());
    assert_ne!(e1.state(), e3.state());

    let o1 = e1.reset_with_index(11)?;
    let o3 = e3.reset_with_index(11)?;
    assert_eq!(o1, o3);
    assert_eq!(e1.state(), e3.state());
    Ok(())
}

#[test]
fn test_step_reward_without_collision() -> Result<()> {
    let (radius, v) = (1.0, 2.0);
    let mut env = KinematicCircleEnv::build(&config(radius, v), 1)?;
    env.reset()?;

    for k in 0..20 {
        let act = CarAct::new(1.5, 0.05 * (k % 5) as f64);
        let (step, record) = env.step(&act);
        let s = *env.state();

        let velocity = (s.x_dot * s.x_dot + s.y_dot * s.y_dot).sqrt();
        let vel_diff = velocity - v;
        let distance = radius - (s.x * s.x + s.y * s.y).sqrt();
        let expected = -distance.abs() - VELOCITY_PENALTY * vel_diff * vel_diff;

        assert!(!step.is_done());
        assert!(!step.is_terminated && !step.is_truncated);
        assert_eq!(step.reward, expected);
        assert_eq!(step.info.dist, distance);
        assert_eq!(step.info.vel, vel_diff);
        assert_eq!(step.act, act);
        assert_eq!(record.get_scalar("reward")?, expected);
        assert_eq!(record.get_scalar("dist")?, distance);
        assert_eq!(record.get_scalar("vel")?, vel_diff);
        assert!((step.obs.dx + distance).abs() < EPS);
        assert!((-std::f64::consts::PI..std::f64::consts::PI).contains(&step.obs.theta));
    }
    Ok(())
}

#[test]
fn test_collision_keeps_state() -> Result<()> {
    let model = KinematicBicycle::default();
    let ctx = VehicleContext::<_, _, TrajectoryRecorder>::new(
        model.clone(),
        |_: &VehicleState| true,
        0.1,
        2.0,
    );
    let mut env = CircleEnv::new(ctx, 1.0, SmallRng::seed_from_u64(0));
    env.reset_episode();
    let before = *env.state();

    let act = CarAct::new(2.0, 0.1);
    let (obs, reward, done, info) = env.transition(&act);

    assert_eq!(reward, COLLISION_REWARD);
    assert!(done);
    assert_eq!(info.dist, f64::INFINITY);
    assert_eq!(info.vel, f64::INFINITY);
    assert_eq!(*env.state(), before);

    // The observation describes the rejected state.
    let rejected = model.state_transition(&before, &act, 0.1);
    assert_eq!(obs, env.state_to_relative(&rejected));
    Ok(())
}

#[test]
fn test_arena_collision_terminates_episode() -> Result<()> {
    let config = CircleEnvConfig::<KinematicBicycle, ArenaBounds>::new(1.0, 2.0)
        .collision(ArenaBounds::new(1.5, 1.5))
        .randomization(DomainRandomization::none());
    let mut env = CircleEnv::<KinematicBicycle, ArenaBounds>::build(&config, 0)?;
    env.reset()?;

    // Drive straight along -y until leaving the arena.
    let mut n_steps = 0;
    let step = loop {
        let (step, _) = env.step(&CarAct::new(2.0, 0.0));
        n_steps += 1;
        if step.is_done() || n_steps > 100 {
            break step;
        }
    };

    assert!(step.is_terminated);
    assert_eq!(step.reward, COLLISION_REWARD);
    assert!(env.state().y.abs() <= 1.5);
    assert!(n_steps <= 8);
    Ok(())
}

#[test]
fn test_reset_resets_renderer() -> Result<()> {
    let mut env = KinematicCircleEnv::build(&config(1.0, 2.0), 0)?;
    env.context_mut().renderer = Some(TrajectoryRecorder::default());

    env.reset()?;
    for _ in 0..3 {
        env.step(&CarAct::new(1.0, 0.0));
        env.render();
    }
    let renderer = env.context().renderer.as_ref().unwrap();
    assert_eq!(renderer.poses().len(), 3);
    assert_eq!(renderer.n_resets(), 1);

    env.reset()?;
    let renderer = env.context().renderer.as_ref().unwrap();
    assert!(renderer.poses().is_empty());
    assert_eq!(renderer.n_resets(), 2);
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(KinematicCircleEnv::build(&config(-1.0, 2.0), 0).is_err());
    assert!(KinematicCircleEnv::build(&config(1.0, 2.0).dt(-0.1), 0).is_err());
}

#[test]
fn test_invalid_model_is_rejected() {
    let negative_speed = config(1.0, 2.0).model(KinematicBicycle::default().max_speed(-1.0));
    assert!(KinematicCircleEnv::build(&negative_speed, 0).is_err());

    let negative_steer = config(1.0, 2.0).model(KinematicBicycle::default().max_steer(-0.1));
    assert!(KinematicCircleEnv::build(&negative_steer, 0).is_err());

    let no_rear_axle = config(1.0, 2.0).model(KinematicBicycle::default().axles(0.1, 0.0));
    assert!(KinematicCircleEnv::build(&no_rear_axle, 0).is_err());
}

#[test]
fn test_time_limit() -> Result<()> {
    let config = TimeLimitConfig::new(config(1.0, 2.0), 5);
    let mut env = TimeLimit::<KinematicCircleEnv>::build(&config, 0)?;
    env.reset()?;

    for _ in 0..4 {
        let (step, _) = env.step_with_reset(&CarAct::new(2.0, 0.2))?;
        assert!(!step.is_done());
    }
    let (step, _) = env.step_with_reset(&CarAct::new(2.0, 0.2))?;
    assert!(step.is_truncated);
    assert!(!step.is_terminated);
    assert!(step.init_obs.is_some());
    assert_eq!(env.n_steps(), 0);
    assert!(env.inner().action().is_none());
    Ok(())
}

struct ConstantPolicy(CarAct);

impl Policy<TimeLimit<KinematicCircleEnv>> for ConstantPolicy {
    fn sample(&mut self, _obs: &aasim_vehicle::CircleObs) -> CarAct {
        self.0
    }
}

#[test]
fn test_evaluate_constant_policy() -> Result<()> {
    let config = TimeLimitConfig::new(config(1.0, 2.0), 10);
    let mut evaluator = DefaultEvaluator::<TimeLimit<KinematicCircleEnv>>::new(&config, 0, 3)?;
    let record = evaluator.evaluate(&mut ConstantPolicy(CarAct::new(2.0, 0.3)))?;

    let ret = record.get_scalar("Episode return")?;
    assert!(ret.is_finite() && ret <= 0.0);
    assert_eq!(record.get_scalar("Episode length")?, 10.0);
    Ok(())
}
