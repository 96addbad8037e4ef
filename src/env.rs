//! Environments the agent can be trained against.

use ndarray::{array, Array1};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::f32::consts::PI;

use crate::error::{DdpgError, Result};

/// Outcome of one environment step.
#[derive(Clone, Debug)]
pub struct StepResult {
    pub next_state: Array1<f32>,
    pub reward: f32,
    pub done: bool,
    pub info: HashMap<String, f32>,
}

/// A continuous-control environment with fixed-size real state and action vectors.
pub trait Environment {
    fn observation_size(&self) -> usize;

    fn action_size(&self) -> usize;

    /// Start a new episode and return its first state.
    fn reset(&mut self) -> Array1<f32>;

    fn step(&mut self, action: &Array1<f32>) -> Result<StepResult>;
}

/// Inverted pendulum swing-up.
///
/// State is `[cos(theta), sin(theta), theta_dot]`, the single action is a
/// torque. Out-of-range torques are clamped here, not by the agent.
pub struct Pendulum {
    theta: f32,
    theta_dot: f32,

    pub max_speed: f32,
    pub max_torque: f32,
    pub dt: f32,
    pub gravity: f32,
    pub mass: f32,
    pub length: f32,

    steps: usize,
    pub max_steps: usize,
    rng: StdRng,
}

impl Default for Pendulum {
    fn default() -> Self {
        Self::new()
    }
}

impl Pendulum {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A pendulum whose initial states are reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Pendulum {
            theta: 0.0,
            theta_dot: 0.0,
            max_speed: 8.0,
            max_torque: 2.0,
            dt: 0.05,
            gravity: 10.0,
            mass: 1.0,
            length: 1.0,
            steps: 0,
            max_steps: 200,
            rng,
        }
    }

    fn state(&self) -> Array1<f32> {
        array![self.theta.cos(), self.theta.sin(), self.theta_dot]
    }
}

impl Environment for Pendulum {
    fn observation_size(&self) -> usize {
        3
    }

    fn action_size(&self) -> usize {
        1
    }

    fn reset(&mut self) -> Array1<f32> {
        self.theta = self.rng.gen_range(-PI..PI);
        self.theta_dot = self.rng.gen_range(-1.0..1.0);
        self.steps = 0;
        self.state()
    }

    fn step(&mut self, action: &Array1<f32>) -> Result<StepResult> {
        if action.len() != 1 {
            return Err(DdpgError::dimension_mismatch("1".to_string(), action.len().to_string()));
        }
        let torque = action[0].clamp(-self.max_torque, self.max_torque);

        let cost = angle_normalize(self.theta).powi(2)
            + 0.1 * self.theta_dot.powi(2)
            + 0.001 * torque.powi(2);

        let theta_dot = self.theta_dot
            + (-3.0 * self.gravity / (2.0 * self.length) * (self.theta + PI).sin()
                + 3.0 / (self.mass * self.length.powi(2)) * torque)
                * self.dt;
        self.theta_dot = theta_dot.clamp(-self.max_speed, self.max_speed);
        self.theta += self.theta_dot * self.dt;
        self.steps += 1;

        let mut info = HashMap::new();
        info.insert("torque".to_string(), torque);

        Ok(StepResult {
            next_state: self.state(),
            reward: -cost,
            done: self.steps >= self.max_steps,
            info,
        })
    }
}

/// Wrap an angle into `[-pi, pi)`.
fn angle_normalize(angle: f32) -> f32 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}
