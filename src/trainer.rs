//! The environment interaction loop.
//!
//! Every step: act with noise, step the environment, store the transition,
//! and, once the buffer holds a full batch, run one training step. Episode
//! boundaries reset the environment and emit one log line each.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

use crate::agent::DdpgAgent;
use crate::batch::Batch;
use crate::config::DdpgConfig;
use crate::env::Environment;
use crate::error::{DdpgError, Result};
use crate::metrics::MetricsTracker;
use crate::noise::NoiseSchedule;
use crate::replay_buffer::{ReplayBuffer, Transition};

const METRICS_HISTORY: usize = 1000;

/// A completed episode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpisodeRecord {
    /// 1-based interaction step on which the episode ended
    pub step: usize,
    /// Negative cumulative reward of the episode
    pub loss: f32,
    pub length: usize,
}

impl fmt::Display for EpisodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step:{} | Loss: {}", self.step, self.loss)
    }
}

/// Summary of a finished `run`.
#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub steps: usize,
    pub updates: usize,
    pub episodes: Vec<EpisodeRecord>,
    pub metrics: MetricsTracker,
}

/// Drives a [`DdpgAgent`] against an environment on a single thread.
pub struct Trainer<E: Environment> {
    env: E,
    agent: DdpgAgent,
    buffer: ReplayBuffer,
    noise: NoiseSchedule,
    metrics: MetricsTracker,
    config: DdpgConfig,
    rng: StdRng,
}

impl<E: Environment> Trainer<E> {
    pub fn new(env: E, config: DdpgConfig) -> Result<Self> {
        config.validate()?;
        if env.observation_size() == 0 || env.action_size() == 0 {
            return Err(DdpgError::invalid_parameter(
                "environment".to_string(),
                format!(
                    "observation size {} and action size {} must be positive",
                    env.observation_size(),
                    env.action_size()
                ),
            ));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // One stream seeds the networks and then drives sampling and noise.
        let agent = DdpgAgent::with_rng(env.observation_size(), env.action_size(), &config, &mut rng);

        Ok(Trainer {
            agent,
            buffer: ReplayBuffer::new(config.buffer_capacity)?,
            noise: NoiseSchedule::new(config.initial_noise, config.noise_decay_interval),
            metrics: MetricsTracker::new(METRICS_HISTORY),
            env,
            config,
            rng,
        })
    }

    pub fn agent(&self) -> &DdpgAgent {
        &self.agent
    }

    pub fn buffer(&self) -> &ReplayBuffer {
        &self.buffer
    }

    pub fn noise(&self) -> &NoiseSchedule {
        &self.noise
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn into_agent(self) -> DdpgAgent {
        self.agent
    }

    /// Run `config.num_steps` interaction steps.
    pub fn run(&mut self) -> Result<TrainingReport> {
        let num_steps = self.config.num_steps;
        let batch_size = self.config.batch_size;
        log::debug!(
            "training for {} steps (batch {}, buffer {}, discount {})",
            num_steps, batch_size, self.config.buffer_capacity, self.config.discount
        );

        let mut state = self.env.reset();
        let mut episode_reward = 0.0;
        let mut episode_length = 0;
        let mut episodes = Vec::new();
        let mut updates = 0;

        for timestep in 0..num_steps {
            self.noise.step();
            let mut action = self.agent.act(state.view())?;
            action += &self.noise.sample(action.len(), &mut self.rng)?;

            let result = self.env.step(&action)?;
            self.buffer.append(Transition {
                state,
                action,
                reward: result.reward,
                next_state: result.next_state.clone(),
                done: result.done,
            });
            episode_reward += result.reward;
            episode_length += 1;

            if result.done {
                let record = EpisodeRecord {
                    step: timestep + 1,
                    loss: -episode_reward,
                    length: episode_length,
                };
                log::info!("{}", record);
                self.metrics.record_episode(episode_reward, episode_length);
                episodes.push(record);

                episode_reward = 0.0;
                episode_length = 0;
                state = self.env.reset();
            } else {
                state = result.next_state;
            }

            if self.buffer.len() >= batch_size {
                let sampled = self.buffer.sample(batch_size, &mut self.rng)?;
                let batch = Batch::from_transitions(&sampled)?;
                let stats = self.agent.update(&batch)?;
                self.metrics.record_update(&stats);
                updates += 1;
            }
        }

        log::debug!(
            "finished {} steps: {} episodes, {} training steps",
            num_steps,
            episodes.len(),
            updates
        );

        Ok(TrainingReport {
            steps: num_steps,
            updates,
            episodes,
            metrics: self.metrics.clone(),
        })
    }
}
