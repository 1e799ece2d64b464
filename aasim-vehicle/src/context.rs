//! Simulation context shared by vehicle environments.
use crate::{CollisionCheck, Renderer, StateTransition, VehicleState};

/// Collaborators of a vehicle simulation.
///
/// Environments own a context and call into it through static dispatch.
#[derive(Debug, Clone)]
pub struct VehicleContext<M, C, R> {
    /// Dynamics model.
    pub model: M,

    /// Collision check applied to every candidate state.
    pub collision: C,

    /// Optional renderer.
    pub renderer: Option<R>,

    /// Integration timestep [s].
    pub dt: f64,

    /// Speed the vehicle is rewarded for tracking [m/s].
    pub target_velocity: f64,
}

impl<M, C, R> VehicleContext<M, C, R>
where
    M: StateTransition,
    C: CollisionCheck,
    R: Renderer,
{
    /// Constructs a context without a renderer.
    pub fn new(model: M, collision: C, dt: f64, target_velocity: f64) -> Self {
        Self {
            model,
            collision,
            renderer: None,
            dt,
            target_velocity,
        }
    }

    /// Attaches a renderer.
    pub fn with_renderer(mut self, renderer: R) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Advances `state` by one timestep under `act`.
    pub fn transition(&self, state: &VehicleState, act: &M::Act) -> VehicleState {
        self.model.state_transition(state, act, self.dt)
    }

    /// Returns `true` if `state` is in collision.
    pub fn check_collision(&self, state: &VehicleState) -> bool {
        self.collision.check_collision(state)
    }

    /// Resets the renderer, if any.
    pub fn reset_renderer(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.reset();
        }
    }

    /// Passes `state` to the renderer, if any.
    pub fn render(&mut self, state: &VehicleState) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.render(state);
        }
    }
}
