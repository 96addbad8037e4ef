use ndarray::{Array2, ArrayView2};

/// Trait defining the interface for loss functions
pub trait Loss: Send + Sync {
    /// Mean loss over a batch of predictions and targets
    fn compute_batch(&self, predictions: ArrayView2<f32>, targets: ArrayView2<f32>) -> f32;

    /// Gradient of `compute_batch` with respect to the predictions
    fn gradient_batch(&self, predictions: ArrayView2<f32>, targets: ArrayView2<f32>) -> Array2<f32>;
}

/// Mean Squared Error loss
#[derive(Clone, Copy, Debug)]
pub struct MSE;

impl Loss for MSE {
    fn compute_batch(&self, predictions: ArrayView2<f32>, targets: ArrayView2<f32>) -> f32 {
        let diff = &predictions - &targets;
        (&diff * &diff).sum() / predictions.len().max(1) as f32
    }

    fn gradient_batch(&self, predictions: ArrayView2<f32>, targets: ArrayView2<f32>) -> Array2<f32> {
        (&predictions - &targets) * (2.0 / predictions.len().max(1) as f32)
    }
}

/// Huber loss; `delta = 1.0` is the smooth-L1 loss.
#[derive(Clone, Copy, Debug)]
pub struct HuberLoss {
    pub delta: f32,
}

impl HuberLoss {
    pub fn new(delta: f32) -> Self {
        HuberLoss { delta }
    }

    pub fn smooth_l1() -> Self {
        Self::new(1.0)
    }
}

impl Loss for HuberLoss {
    fn compute_batch(&self, predictions: ArrayView2<f32>, targets: ArrayView2<f32>) -> f32 {
        let diff = &predictions - &targets;
        let delta = self.delta;
        diff.mapv(|x| {
            let abs_x = x.abs();
            if abs_x < delta {
                0.5 * x * x / delta
            } else {
                abs_x - 0.5 * delta
            }
        }).sum() / predictions.len().max(1) as f32
    }

    fn gradient_batch(&self, predictions: ArrayView2<f32>, targets: ArrayView2<f32>) -> Array2<f32> {
        let diff = &predictions - &targets;
        let delta = self.delta;
        let n = predictions.len().max(1) as f32;
        diff.mapv(|x| (if x.abs() < delta { x / delta } else { x.signum() }) / n)
    }
}
