//! RC car following a circular arc, observed in relative coordinates.
use super::{CircleEnvConfig, CircleObs, DomainRandomization};
use crate::{
    CollisionCheck, KinematicBicycle, NoCollision, Renderer, StateTransition, TrajectoryRecorder,
    VehicleContext, VehicleState,
};
use aasim_core::{
    record::{Record, RecordValue},
    BoxSpace, Env, Info, Step,
};
use anyhow::Result;
use log::{debug, info, trace, warn};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::f64::consts::PI;

/// Reward of a transition ending in a collision.
pub const COLLISION_REWARD: f64 = -100.0;

/// Weight of the squared velocity error in the reward.
pub const VELOCITY_PENALTY: f64 = 0.25;

// Below this distance from the origin the radial direction is undefined.
const ORIGIN_EPS: f64 = 1e-9;

/// Normalizes an angle to `[-pi, pi)`.
pub fn normalize_angle(angle: f64) -> f64 {
    // Angles already in range are returned as is, so normalization is idempotent.
    if (-PI..PI).contains(&angle) {
        return angle;
    }
    let angle = angle.rem_euclid(2.0 * PI);
    if angle >= PI {
        angle - 2.0 * PI
    } else {
        angle
    }
}

/// Diagnostics of a step of [`CircleEnv`].
///
/// Both values are infinite for a transition ending in a collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleInfo {
    /// Signed radial error `radius - |(x, y)|`.
    pub dist: f64,

    /// Speed minus the target velocity.
    pub vel: f64,
}

impl Info for CircleInfo {}

/// An RC car following a circle of fixed radius centered at the origin.
///
/// The absolute state of the vehicle is advanced by the dynamics model of the
/// [`VehicleContext`], and reported as a [`CircleObs`] relative to the circle.
/// Episodes terminate only on collision; wrap the environment with
/// [`TimeLimit`](crate::TimeLimit) to bound their length.
pub struct CircleEnv<M, C, R = TrajectoryRecorder, G = SmallRng>
where
    M: StateTransition,
{
    ctx: VehicleContext<M, C, R>,
    radius: f64,
    randomization: DomainRandomization,
    state: VehicleState,
    action: Option<M::Act>,
    rng: G,
}

/// [`CircleEnv`] on an empty plane with kinematic bicycle dynamics.
pub type KinematicCircleEnv = CircleEnv<KinematicBicycle, NoCollision>;

impl<M, C, R, G> CircleEnv<M, C, R, G>
where
    M: StateTransition,
    C: CollisionCheck,
    R: Renderer,
    G: Rng,
{
    /// Constructs an environment following a circle of `radius`.
    ///
    /// The initial state is sampled from `rng` on the first call of
    /// [`CircleEnv::reset_episode`]; until then the vehicle rests at the origin.
    pub fn new(ctx: VehicleContext<M, C, R>, radius: f64, rng: G) -> Self {
        Self {
            ctx,
            radius,
            randomization: DomainRandomization::default(),
            state: VehicleState::default(),
            action: None,
            rng,
        }
    }

    /// Sets the perturbation of the initial state.
    pub fn with_randomization(mut self, randomization: DomainRandomization) -> Self {
        self.randomization = randomization;
        self
    }

    /// Radius of the circle.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Target velocity.
    pub fn target_velocity(&self) -> f64 {
        self.ctx.target_velocity
    }

    /// The simulation context.
    pub fn context(&self) -> &VehicleContext<M, C, R> {
        &self.ctx
    }

    /// The simulation context, e.g. to attach or inspect a renderer.
    pub fn context_mut(&mut self) -> &mut VehicleContext<M, C, R> {
        &mut self.ctx
    }

    /// Current absolute state.
    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    /// Overwrites the absolute state.
    pub fn set_state(&mut self, state: VehicleState) {
        self.state = state;
    }

    /// The last applied action, `None` right after a reset.
    pub fn action(&self) -> Option<&M::Act> {
        self.action.as_ref()
    }

    /// Unbounded box of the 4 elements of [`CircleObs`].
    pub fn observation_space(&self) -> BoxSpace {
        BoxSpace::unbounded(&[CircleObs::DIM])
    }

    /// Samples a domain randomized initial state near `(-radius, 0)`, heading
    /// roughly along `-y`.
    pub fn initial_state(&mut self) -> VehicleState {
        let dr = &self.randomization;
        let angle_margin = dr.angle_margin_deg.to_radians();
        let velocity_margin = dr.velocity_scale * self.ctx.target_velocity;
        let rng = &mut self.rng;

        let x = dr.position_margin * rng.gen::<f64>() - dr.position_margin / 2.0 - self.radius;
        let yaw = angle_margin * rng.gen::<f64>() - angle_margin / 2.0 + 270f64.to_radians();
        let x_dot = velocity_margin * rng.gen::<f64>() - velocity_margin / 2.0;
        let y_dot = -velocity_margin * rng.gen::<f64>();
        let yaw_dot = dr.yaw_dot_margin * rng.gen::<f64>() - dr.yaw_dot_margin / 2.0;

        VehicleState {
            x,
            y: 0.0,
            yaw,
            x_dot,
            y_dot,
            yaw_dot,
        }
    }

    /// Converts an absolute state into the tracking error relative to the circle.
    ///
    /// At the origin the radial direction is undefined; the radial velocity is
    /// then reported as zero and the angular velocity error as `-yaw_dot`.
    pub fn state_to_relative(&self, state: &VehicleState) -> CircleObs {
        let VehicleState {
            x,
            y,
            yaw,
            x_dot,
            y_dot,
            yaw_dot,
        } = *state;
        let rho = state.distance_from_origin();

        let dx = rho - self.radius;
        let theta = normalize_angle((-x).atan2(y) + PI - yaw);

        let (ddx, dtheta) = if rho < ORIGIN_EPS {
            warn!("Vehicle at the origin, radial velocity is undefined");
            (0.0, -yaw_dot)
        } else {
            let rho2 = x * x + y * y;
            (
                (x * x_dot + y * y_dot) / rho,
                (x * x_dot - y * y_dot) / rho2 - yaw_dot,
            )
        };

        CircleObs {
            dx,
            theta,
            ddx,
            dtheta,
        }
    }

    /// Reward of reaching `state` without collision.
    ///
    /// Penalizes the radial distance from the circle and the squared deviation
    /// from the target speed.
    pub fn tracking_reward(&self, state: &VehicleState) -> (f64, CircleInfo) {
        let dist = self.radius - state.distance_from_origin();
        let vel = state.speed() - self.ctx.target_velocity;
        let reward = -dist.abs() - VELOCITY_PENALTY * vel * vel;
        (reward, CircleInfo { dist, vel })
    }

    /// Starts a new episode and returns its initial observation.
    pub fn reset_episode(&mut self) -> CircleObs {
        trace!("CircleEnv::reset()");
        self.action = None;
        self.state = self.initial_state();
        self.ctx.reset_renderer();
        self.state_to_relative(&self.state)
    }

    /// Applies `act` for one timestep.
    ///
    /// A transition into collision is rejected: the state is kept, the episode
    /// terminates with [`COLLISION_REWARD`], and the observation describes the
    /// rejected state.
    pub fn transition(&mut self, act: &M::Act) -> (CircleObs, f64, bool, CircleInfo) {
        trace!("CircleEnv::step()");
        self.action = Some(act.clone());
        let nextstate = self.ctx.transition(&self.state, act);

        let (reward, done, info) = if self.ctx.check_collision(&nextstate) {
            debug!("Collision at ({}, {})", nextstate.x, nextstate.y);
            let info = CircleInfo {
                dist: f64::INFINITY,
                vel: f64::INFINITY,
            };
            (COLLISION_REWARD, true, info)
        } else {
            self.state = nextstate;
            let (reward, info) = self.tracking_reward(&nextstate);
            (reward, false, info)
        };

        (self.state_to_relative(&nextstate), reward, done, info)
    }

    /// Passes the current state to the renderer, if any.
    pub fn render(&mut self) {
        let state = self.state;
        self.ctx.render(&state);
    }
}

impl<M, C, R, G> Env for CircleEnv<M, C, R, G>
where
    M: StateTransition + Clone,
    C: CollisionCheck + Clone,
    R: Renderer,
    G: Rng + SeedableRng,
{
    type Config = CircleEnvConfig<M, C>;
    type Obs = CircleObs;
    type Act = M::Act;
    type Info = CircleInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        config.validate()?;
        config.model.validate()?;
        info!(
            "Build CircleEnv with radius = {}, target velocity = {}, dt = {}",
            config.radius, config.target_velocity, config.dt
        );
        let ctx = VehicleContext::new(
            config.model.clone(),
            config.collision.clone(),
            config.dt,
            config.target_velocity,
        );
        let rng = G::seed_from_u64(seed as u64);
        Ok(Self::new(ctx, config.radius, rng).with_randomization(config.randomization.clone()))
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let (obs, reward, done, info) = self.transition(a);
        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(reward)),
            ("dist", RecordValue::Scalar(info.dist)),
            ("vel", RecordValue::Scalar(info.vel)),
        ]);
        let step = Step::new(obs, a.clone(), reward, done, false, info);
        (step, record)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        Ok(self.reset_episode())
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        self.rng = G::seed_from_u64(ix as u64);
        self.reset()
    }
}
