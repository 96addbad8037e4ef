use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activations::Activation;
use crate::error::{DdpgError, Result};
use crate::layers::{DenseLayer, LayerGradients, WeightInit};
use crate::optimizer::{Optimizer, OptimizerWrapper};

/// A feed-forward network of dense layers together with the optimizer that trains it.
///
/// Inference (`forward`, `predict_batch`) is a pure function of the current
/// parameters. Training goes through `forward_batch`, which caches the
/// intermediate values `backward_batch` needs, followed by `apply_gradients`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NeuralNetwork {
    pub layers: Vec<DenseLayer>,
    pub optimizer: OptimizerWrapper,
}

impl NeuralNetwork {
    /// Create a new network from layer sizes and one activation per layer.
    pub fn new(layer_sizes: &[usize], activations: &[Activation], optimizer: OptimizerWrapper) -> Result<Self> {
        if layer_sizes.len() < 2 || layer_sizes.len() - 1 != activations.len() {
            return Err(DdpgError::invalid_parameter(
                "layer_sizes".to_string(),
                format!(
                    "{} sizes need exactly one fewer activations, got {}",
                    layer_sizes.len(),
                    activations.len()
                ),
            ));
        }

        let layers = layer_sizes
            .windows(2)
            .zip(activations.iter())
            .map(|(window, &activation)| DenseLayer::new(window[0], window[1], activation))
            .collect::<Vec<_>>();

        Ok(NeuralNetwork { layers, optimizer })
    }

    /// ReLU hidden layers and an identity output, trained with Adam.
    pub fn mlp(input_size: usize, hidden_sizes: &[usize], output_size: usize) -> Self {
        Self::mlp_using(input_size, hidden_sizes, output_size, &mut rand::thread_rng())
    }

    /// Like [`NeuralNetwork::mlp`], drawing initial parameters from `rng`.
    pub fn mlp_using<R: Rng + ?Sized>(
        input_size: usize,
        hidden_sizes: &[usize],
        output_size: usize,
        rng: &mut R,
    ) -> Self {
        let mut sizes = vec![input_size];
        sizes.extend_from_slice(hidden_sizes);
        sizes.push(output_size);

        let activations = vec![Activation::Relu; hidden_sizes.len()]
            .into_iter()
            .chain(std::iter::once(Activation::Linear))
            .collect::<Vec<_>>();

        let layers = sizes
            .windows(2)
            .zip(activations.iter())
            .map(|(window, &activation)| {
                DenseLayer::with_init_using(window[0], window[1], activation, WeightInit::default(), rng)
            })
            .collect::<Vec<_>>();
        let optimizer = OptimizerWrapper::adam(&layers);

        NeuralNetwork { layers, optimizer }
    }

    pub fn with_layers(mut self, layers: Vec<DenseLayer>) -> Self {
        self.layers = layers;
        self
    }

    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, DenseLayer::input_size)
    }

    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, DenseLayer::output_size)
    }

    /// Forward pass for a single input vector.
    pub fn forward(&self, input: ArrayView1<f32>) -> Array1<f32> {
        let output = self.predict_batch(input.insert_axis(Axis(0)));
        output.index_axis_move(Axis(0), 0)
    }

    /// Forward pass for a batch, leaving the backprop cache untouched.
    pub fn predict_batch(&self, inputs: ArrayView2<f32>) -> Array2<f32> {
        let mut current = inputs.to_owned();
        for layer in &self.layers {
            current = layer.predict_batch(current.view());
        }
        current
    }

    /// Forward pass for a batch that records what `backward_batch` needs.
    pub fn forward_batch(&mut self, inputs: ArrayView2<f32>) -> Array2<f32> {
        let mut current = inputs.to_owned();
        for layer in &mut self.layers {
            current = layer.forward_batch(current.view());
        }
        current
    }

    /// Backpropagate `output_errors` (dL/d output) from the last `forward_batch`.
    ///
    /// Returns per-layer gradients in layer order and dL/d input.
    pub fn backward_batch(&self, output_errors: ArrayView2<f32>) -> Result<(Vec<LayerGradients>, Array2<f32>)> {
        let mut gradients = Vec::with_capacity(self.layers.len());
        let mut current_error = output_errors.to_owned();

        for layer in self.layers.iter().rev() {
            let (input_error, layer_gradients) = layer.backward_batch(current_error.view())?;
            gradients.push(layer_gradients);
            current_error = input_error;
        }

        gradients.reverse();
        Ok((gradients, current_error))
    }

    /// Take one optimizer step with the given per-layer gradients.
    pub fn apply_gradients(&mut self, gradients: &[LayerGradients], learning_rate: f32) -> Result<()> {
        if gradients.len() != self.layers.len() {
            return Err(DdpgError::dimension_mismatch(
                format!("{} layer gradients", self.layers.len()),
                format!("{}", gradients.len()),
            ));
        }

        self.optimizer.advance();
        for (index, (layer, grads)) in self.layers.iter_mut().zip(gradients).enumerate() {
            self.optimizer.update_weights(index, &mut layer.weights, &grads.weights, learning_rate);
            self.optimizer.update_biases(index, &mut layer.biases, &grads.biases, learning_rate);
        }
        Ok(())
    }

    /// Overwrite every weight and bias with `source`'s (hard update).
    ///
    /// The optimizer state of `self` is left alone.
    pub fn copy_parameters_from(&mut self, source: &NeuralNetwork) -> Result<()> {
        if self.layers.len() != source.layers.len() {
            return Err(DdpgError::dimension_mismatch(
                format!("{} layers", self.layers.len()),
                format!("{} layers", source.layers.len()),
            ));
        }
        for (target, layer) in self.layers.iter().zip(&source.layers) {
            if target.weights.dim() != layer.weights.dim() {
                return Err(DdpgError::dimension_mismatch(
                    format!("{:?}", target.weights.dim()),
                    format!("{:?}", layer.weights.dim()),
                ));
            }
        }

        for (target, layer) in self.layers.iter_mut().zip(&source.layers) {
            target.weights.assign(&layer.weights);
            target.biases.assign(&layer.biases);
        }
        Ok(())
    }
}
