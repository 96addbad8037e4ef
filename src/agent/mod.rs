//! Agents built on the feed-forward networks in [`crate::network`].
//!
//! - [`DdpgAgent`]: actor-critic learner for continuous actions
//! - [`QNetwork`]: discrete-action value function

pub mod ddpg;
pub mod dqn;

pub use ddpg::{DdpgAgent, UpdateStats};
pub use dqn::QNetwork;
