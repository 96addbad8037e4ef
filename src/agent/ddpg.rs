use ndarray::{concatenate, s, Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::batch::Batch;
use crate::config::DdpgConfig;
use crate::error::{DdpgError, Result};
use crate::layers::LayerGradients;
use crate::loss::{HuberLoss, Loss};
use crate::network::NeuralNetwork;

/// Deep Deterministic Policy Gradient agent.
///
/// Holds the online actor and critic, their target copies, and the training
/// step counter that drives hard target updates. Target networks are only
/// ever written by [`DdpgAgent::sync_targets`].
///
/// # Example
///
/// ```rust
/// use ddpg::agent::DdpgAgent;
/// use ddpg::config::DdpgConfig;
/// use ndarray::array;
///
/// let agent = DdpgAgent::new(3, 1, &DdpgConfig::default());
/// let action = agent.act(array![1.0, 0.0, 0.0].view()).unwrap();
/// assert_eq!(action.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct DdpgAgent {
    /// Deterministic policy, state -> action
    pub actor: NeuralNetwork,
    pub actor_target: NeuralNetwork,
    /// Action-value estimate, (state, action) -> scalar
    pub critic: NeuralNetwork,
    pub critic_target: NeuralNetwork,
    pub discount: f32,
    pub actor_learning_rate: f32,
    pub critic_learning_rate: f32,
    critic_loss: HuberLoss,
    /// Training steps between hard target updates
    target_update: usize,
    state_size: usize,
    action_size: usize,
    train_steps: usize,
}

/// Losses from one training step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateStats {
    pub critic_loss: f32,
    pub actor_loss: f32,
    /// Whether this step ended with a hard target update
    pub synced: bool,
}

impl DdpgAgent {
    /// Build an agent whose initial weights are drawn from `config.seed`,
    /// or from entropy when no seed is set.
    pub fn new(state_size: usize, action_size: usize, config: &DdpgConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(state_size, action_size, config, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(
        state_size: usize,
        action_size: usize,
        config: &DdpgConfig,
        rng: &mut R,
    ) -> Self {
        let hidden = [config.hidden_size, config.hidden_size];
        let actor = NeuralNetwork::mlp_using(state_size, &hidden, action_size, rng);
        let critic = NeuralNetwork::mlp_using(state_size + action_size, &hidden, 1, rng);

        DdpgAgent {
            actor_target: actor.clone(),
            critic_target: critic.clone(),
            actor,
            critic,
            discount: config.discount,
            target_update: config.target_update.max(1),
            actor_learning_rate: config.actor_learning_rate,
            critic_learning_rate: config.critic_learning_rate,
            critic_loss: HuberLoss::new(config.huber_delta),
            state_size,
            action_size,
            train_steps: 0,
        }
    }

    pub fn state_size(&self) -> usize {
        self.state_size
    }

    pub fn action_size(&self) -> usize {
        self.action_size
    }

    pub fn target_update(&self) -> usize {
        self.target_update
    }

    /// Training steps taken so far.
    pub fn train_steps(&self) -> usize {
        self.train_steps
    }

    /// The policy's action for `state`, without exploration noise.
    pub fn act(&self, state: ArrayView1<f32>) -> Result<Array1<f32>> {
        if state.len() != self.state_size {
            return Err(DdpgError::dimension_mismatch(
                self.state_size.to_string(),
                state.len().to_string(),
            ));
        }
        Ok(self.actor.forward(state))
    }

    /// Critic estimate for a single state-action pair.
    pub fn q_value(&self, state: ArrayView1<f32>, action: ArrayView1<f32>) -> Result<f32> {
        let input = join_columns(state.insert_axis(Axis(0)), action.insert_axis(Axis(0)))?;
        Ok(self.critic.predict_batch(input.view())[[0, 0]])
    }

    /// Bootstrapped critic targets `r + (1 - done) * discount * Q'(s', mu'(s'))`.
    ///
    /// Computed from the target networks only; the result is a constant as
    /// far as the update is concerned. Terminal rows yield exactly `r`.
    pub fn compute_targets(&self, batch: &Batch) -> Result<Array1<f32>> {
        self.check_batch(batch)?;

        let next_actions = self.actor_target.predict_batch(batch.next_states.view());
        let next_inputs = join_columns(batch.next_states.view(), next_actions.view())?;
        let next_q = self.critic_target.predict_batch(next_inputs.view());

        let discount = self.discount;
        let mut targets = Array1::<f32>::zeros(batch.len());
        Zip::from(&mut targets)
            .and(&batch.rewards)
            .and(&batch.dones)
            .and(next_q.column(0))
            .for_each(|target, &reward, &done, &q| {
                *target = if done > 0.5 { reward } else { reward + discount * q };
            });
        Ok(targets)
    }

    /// One DDPG training step on `batch`: critic regression towards the
    /// bootstrapped targets, then policy ascent on the freshly updated
    /// critic, then a hard target update every `target_update` steps.
    pub fn update(&mut self, batch: &Batch) -> Result<UpdateStats> {
        let targets = self.compute_targets(batch)?;
        let critic_loss = self.update_critic(batch, targets.view())?;
        let actor_loss = self.update_actor(batch.states.view())?;

        self.train_steps += 1;
        let synced = self.train_steps % self.target_update == 0;
        if synced {
            self.sync_targets()?;
            log::debug!("hard target update at training step {}", self.train_steps);
        }

        Ok(UpdateStats { critic_loss, actor_loss, synced })
    }

    /// Copy online parameters into the target networks.
    pub fn sync_targets(&mut self) -> Result<()> {
        self.actor_target.copy_parameters_from(&self.actor)?;
        self.critic_target.copy_parameters_from(&self.critic)
    }

    fn update_critic(&mut self, batch: &Batch, targets: ArrayView1<f32>) -> Result<f32> {
        // Stored actions are plain data, so nothing flows back into the actor.
        let inputs = join_columns(batch.states.view(), batch.actions.view())?;
        let predictions = self.critic.forward_batch(inputs.view());
        let targets = targets.insert_axis(Axis(1));

        let loss = self.critic_loss.compute_batch(predictions.view(), targets);
        let output_errors = self.critic_loss.gradient_batch(predictions.view(), targets);
        let (gradients, _) = self.critic.backward_batch(output_errors.view())?;
        self.critic.apply_gradients(&gradients, self.critic_learning_rate)?;

        Ok(loss)
    }

    fn update_actor(&mut self, states: ArrayView2<f32>) -> Result<f32> {
        let (loss, gradients) = self.actor_gradients(states)?;
        self.actor.apply_gradients(&gradients, self.actor_learning_rate)?;
        Ok(loss)
    }

    /// Actor loss `-mean Q(s, mu(s))` and its gradients, taken through the
    /// critic as it currently stands.
    fn actor_gradients(&mut self, states: ArrayView2<f32>) -> Result<(f32, Vec<LayerGradients>)> {
        let batch_size = states.nrows();
        let actions = self.actor.forward_batch(states);
        let inputs = join_columns(states, actions.view())?;
        let q_values = self.critic.forward_batch(inputs.view());
        let loss = -q_values.sum() / batch_size as f32;

        // d(-mean Q)/dQ, pushed through the critic to its action inputs.
        // The critic's own gradients from this pass are dropped.
        let output_errors = Array2::from_elem((batch_size, 1), -1.0 / batch_size as f32);
        let (_, input_errors) = self.critic.backward_batch(output_errors.view())?;
        let action_errors = input_errors.slice(s![.., self.state_size..]);

        let (gradients, _) = self.actor.backward_batch(action_errors)?;
        Ok((loss, gradients))
    }

    fn check_batch(&self, batch: &Batch) -> Result<()> {
        if batch.is_empty() {
            return Err(DdpgError::EmptyBuffer("empty batch".to_string()));
        }
        let dims = [
            ("states", batch.states.ncols(), self.state_size),
            ("actions", batch.actions.ncols(), self.action_size),
            ("next_states", batch.next_states.ncols(), self.state_size),
        ];
        for (name, actual, expected) in dims {
            if actual != expected {
                return Err(DdpgError::dimension_mismatch(
                    format!("{} {} wide", name, expected),
                    format!("{} {} wide", name, actual),
                ));
            }
        }
        Ok(())
    }
}

/// Concatenate two batches side by side (critic input `[state | action]`).
fn join_columns(left: ArrayView2<f32>, right: ArrayView2<f32>) -> Result<Array2<f32>> {
    concatenate(Axis(1), &[left.view(), right.view()]).map_err(|_| {
        DdpgError::dimension_mismatch(
            format!("{} rows", left.nrows()),
            format!("{} rows", right.nrows()),
        )
    })
}
