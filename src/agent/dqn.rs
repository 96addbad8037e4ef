use ndarray::{Array1, ArrayView1};

use crate::error::{DdpgError, Result};
use crate::network::NeuralNetwork;

/// Hidden width of the Q-network.
pub const DQN_HIDDEN_SIZE: usize = 128;

/// Deep Q-Network value function: one action-value per discrete action.
///
/// Only the function approximator is provided; there is no DQN training loop.
///
/// ```rust
/// use ddpg::agent::QNetwork;
/// use ndarray::array;
///
/// let q = QNetwork::new(4, 2);
/// let values = q.q_values(array![0.1, -0.2, 0.3, -0.1].view()).unwrap();
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct QNetwork {
    pub network: NeuralNetwork,
}

impl QNetwork {
    /// `state -> 128 -> 128 -> actions`, ReLU hidden layers, identity output.
    pub fn new(state_size: usize, action_size: usize) -> Self {
        QNetwork {
            network: NeuralNetwork::mlp(state_size, &[DQN_HIDDEN_SIZE, DQN_HIDDEN_SIZE], action_size),
        }
    }

    pub fn action_size(&self) -> usize {
        self.network.output_size()
    }

    pub fn q_values(&self, state: ArrayView1<f32>) -> Result<Array1<f32>> {
        if state.len() != self.network.input_size() {
            return Err(DdpgError::dimension_mismatch(
                self.network.input_size().to_string(),
                state.len().to_string(),
            ));
        }
        Ok(self.network.forward(state))
    }

    /// Index of the highest action-value.
    pub fn greedy_action(&self, state: ArrayView1<f32>) -> Result<usize> {
        let values = self.q_values(state)?;
        values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(index, _)| index)
            .ok_or_else(|| DdpgError::NumericalError("network has no outputs".to_string()))
    }
}
