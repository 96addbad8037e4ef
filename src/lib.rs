//! # ddpg - Deep Deterministic Policy Gradient on ndarray
//!
//! A small, single-threaded DDPG learner for continuous control, with the
//! feed-forward networks, reverse-mode gradients and optimizers it needs
//! written directly against `ndarray`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ddpg::config::DdpgConfig;
//! use ddpg::env::Pendulum;
//! use ddpg::trainer::Trainer;
//!
//! let config = DdpgConfig { num_steps: 5_000, ..DdpgConfig::default() };
//! let mut trainer = Trainer::new(Pendulum::new(), config).unwrap();
//! let report = trainer.run().unwrap();
//! println!("{} episodes", report.episodes.len());
//! ```
//!
//! ## Module Organization
//!
//! - [`activations`] - ReLU and identity activations
//! - [`agent`] - The DDPG agent and a DQN value network
//! - [`batch`] - Turning sampled transitions into aligned arrays
//! - [`config`] - Hyperparameters and their defaults
//! - [`env`] - Environment trait and the Pendulum task
//! - [`error`] - Error types and result handling
//! - [`layers`] - Dense layers and weight initialization
//! - [`logging`] - File logger setup
//! - [`loss`] - Huber and squared-error losses
//! - [`metrics`] - Training metrics and tracking
//! - [`network`] - Feed-forward network with backpropagation
//! - [`noise`] - Exploration noise and its decay schedule
//! - [`optimizer`] - SGD and Adam
//! - [`replay_buffer`] - Ring-buffer experience replay
//! - [`trainer`] - The environment interaction loop

pub mod activations;
pub mod agent;
pub mod batch;
pub mod config;
pub mod env;
pub mod error;
pub mod layers;
pub mod logging;
pub mod loss;
pub mod metrics;
pub mod network;
pub mod noise;
pub mod optimizer;
pub mod replay_buffer;
pub mod trainer;

#[cfg(test)]
mod tests;
