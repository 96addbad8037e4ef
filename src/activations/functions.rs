use ndarray::{Array1, Array2, ArrayView2};
use serde::{Serialize, Deserialize};

/// Activation applied element-wise after a dense layer's affine transform.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum Activation {
    #[default]
    Relu,
    Linear,
}

impl Activation {
    /// Apply the activation function to a single vector in-place.
    pub fn apply(&self, input: &mut Array1<f32>) {
        match self {
            Activation::Relu => input.mapv_inplace(|v| v.max(0.0)),
            Activation::Linear => {}
        }
    }

    /// Apply the activation function to a batch (one row per sample) in-place.
    pub fn apply_batch(&self, inputs: &mut Array2<f32>) {
        match self {
            Activation::Relu => inputs.mapv_inplace(|v| v.max(0.0)),
            Activation::Linear => {}
        }
    }

    /// Derivative with respect to the pre-activation values of a batch.
    pub fn derivative_batch(&self, pre_activation: ArrayView2<f32>) -> Array2<f32> {
        match self {
            Activation::Relu => pre_activation.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 }),
            Activation::Linear => Array2::ones(pre_activation.dim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, arr2};

    #[test]
    fn test_relu_clamps_negatives() {
        let mut data = array![1.0, -0.5, 0.0, 2.0];
        Activation::Relu.apply(&mut data);
        assert_eq!(data, array![1.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_linear_is_identity() {
        let mut data = arr2(&[[1.0, -3.0], [0.25, -0.5]]);
        let before = data.clone();
        Activation::Linear.apply_batch(&mut data);
        assert_eq!(data, before);
        assert_eq!(Activation::Linear.derivative_batch(before.view()), Array2::<f32>::ones((2, 2)));
    }

    #[test]
    fn test_relu_derivative() {
        let pre = arr2(&[[1.5, -2.0], [0.0, 3.0]]);
        let deriv = Activation::Relu.derivative_batch(pre.view());
        assert_eq!(deriv, arr2(&[[1.0, 0.0], [0.0, 1.0]]));
    }
}
