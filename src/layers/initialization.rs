use ndarray::{Array1, Array2};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;

/// Weight initialization strategies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightInit {
    /// Uniform in `[-1/sqrt(fan_in), 1/sqrt(fan_in)]` for weights and biases
    FanInUniform,

    /// Uniform distribution with custom range, zero biases
    Uniform { min: f32, max: f32 },

    /// All zeros
    Zeros,
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::FanInUniform
    }
}

impl WeightInit {
    /// Initialize weights for a layer of shape `(fan_in, fan_out)`
    pub fn initialize_weights<R: Rng + ?Sized>(&self, shape: (usize, usize), rng: &mut R) -> Array2<f32> {
        match self {
            WeightInit::FanInUniform => {
                let bound = fan_in_bound(shape.0);
                Array2::random_using(shape, Uniform::new_inclusive(-bound, bound), rng)
            }
            WeightInit::Uniform { min, max } => Array2::random_using(shape, Uniform::new(*min, *max), rng),
            WeightInit::Zeros => Array2::zeros(shape),
        }
    }

    /// Initialize biases for a layer
    pub fn initialize_biases<R: Rng + ?Sized>(&self, fan_in: usize, size: usize, rng: &mut R) -> Array1<f32> {
        match self {
            WeightInit::FanInUniform => {
                let bound = fan_in_bound(fan_in);
                Array1::random_using(size, Uniform::new_inclusive(-bound, bound), rng)
            }
            WeightInit::Uniform { .. } | WeightInit::Zeros => Array1::zeros(size),
        }
    }
}

fn fan_in_bound(fan_in: usize) -> f32 {
    1.0 / (fan_in.max(1) as f32).sqrt()
}
