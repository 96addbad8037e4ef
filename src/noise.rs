//! Exploration noise for the deterministic policy.
//!
//! The actor's output is perturbed with i.i.d. zero-mean Gaussian noise whose
//! standard deviation follows a [`NoiseSchedule`]: it starts at the initial
//! factor and is halved once per completed interval of environment steps.

use ndarray::Array1;
use rand::Rng;
use rand_distr::Normal;

use crate::error::{DdpgError, Result};

/// Per-dimension Gaussian noise `N(0, std)`.
#[derive(Clone, Copy, Debug)]
pub struct GaussianNoise {
    std: f32,
}

impl GaussianNoise {
    pub fn new(std: f32) -> Self {
        GaussianNoise { std }
    }

    pub fn std(&self) -> f32 {
        self.std
    }

    pub fn sample<R: Rng + ?Sized>(&self, dim: usize, rng: &mut R) -> Result<Array1<f32>> {
        let normal = Normal::new(0.0, self.std)
            .map_err(|e| DdpgError::NumericalError(e.to_string()))?;
        Ok(Array1::from_shape_fn(dim, |_| rng.sample(normal)))
    }
}

/// Halving decay schedule for the exploration noise scale.
///
/// The first `interval` steps use `initial`, the next `interval` steps use
/// half of it, and so on. There is no floor.
#[derive(Clone, Debug)]
pub struct NoiseSchedule {
    factor: f32,
    interval: usize,
    steps: usize,
}

impl NoiseSchedule {
    pub fn new(initial: f32, interval: usize) -> Self {
        NoiseSchedule {
            factor: initial,
            interval: interval.max(1),
            steps: 0,
        }
    }

    /// Current noise scale.
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Environment steps seen so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Advance to the next environment step; call before drawing that step's noise.
    ///
    /// After `n` calls the factor is `initial * 0.5^((n - 1) / interval)`.
    /// Returns `true` when this call halved the factor.
    pub fn step(&mut self) -> bool {
        let halve = self.steps > 0 && self.steps % self.interval == 0;
        if halve {
            self.factor *= 0.5;
            log::debug!("noise factor halved to {} after {} steps", self.factor, self.steps);
        }
        self.steps += 1;
        halve
    }

    /// Noise at the current scale.
    pub fn noise(&self) -> GaussianNoise {
        GaussianNoise::new(self.factor)
    }

    pub fn sample<R: Rng + ?Sized>(&self, dim: usize, rng: &mut R) -> Result<Array1<f32>> {
        self.noise().sample(dim, rng)
    }
}
