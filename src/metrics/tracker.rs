use std::collections::VecDeque;
use serde::{Serialize, Deserialize};

use crate::agent::UpdateStats;

/// Bounded histories of training signals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingMetrics {
    /// Critic (Huber) loss per training step
    pub critic_losses: VecDeque<f32>,

    /// Actor loss (negative mean Q) per training step
    pub actor_losses: VecDeque<f32>,

    /// Undiscounted return per completed episode
    pub episode_returns: VecDeque<f32>,

    /// Steps per completed episode
    pub episode_lengths: VecDeque<usize>,
}

/// Tracks metrics during training
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    metrics: TrainingMetrics,
    history_size: usize,
    episode_count: usize,
    update_count: usize,
}

impl MetricsTracker {
    pub fn new(history_size: usize) -> Self {
        MetricsTracker {
            metrics: TrainingMetrics::default(),
            history_size: history_size.max(1),
            episode_count: 0,
            update_count: 0,
        }
    }

    pub fn record_update(&mut self, stats: &UpdateStats) {
        push_bounded(&mut self.metrics.critic_losses, stats.critic_loss, self.history_size);
        push_bounded(&mut self.metrics.actor_losses, stats.actor_loss, self.history_size);
        self.update_count += 1;
    }

    pub fn record_episode(&mut self, episode_return: f32, length: usize) {
        push_bounded(&mut self.metrics.episode_returns, episode_return, self.history_size);
        push_bounded(&mut self.metrics.episode_lengths, length, self.history_size);
        self.episode_count += 1;
    }

    /// Episodes recorded since creation, including ones evicted from history.
    pub fn episode_count(&self) -> usize {
        self.episode_count
    }

    pub fn update_count(&self) -> usize {
        self.update_count
    }

    /// Mean return over the last `n` retained episodes.
    pub fn mean_recent_return(&self, n: usize) -> Option<f32> {
        let returns = &self.metrics.episode_returns;
        let take = n.min(returns.len());
        if take == 0 {
            return None;
        }
        Some(returns.iter().rev().take(take).sum::<f32>() / take as f32)
    }

    /// Most recent `(critic_loss, actor_loss)`.
    pub fn latest_losses(&self) -> Option<(f32, f32)> {
        Some((*self.metrics.critic_losses.back()?, *self.metrics.actor_losses.back()?))
    }

    pub fn metrics(&self) -> &TrainingMetrics {
        &self.metrics
    }
}

fn push_bounded<T>(history: &mut VecDeque<T>, value: T, limit: usize) {
    if history.len() >= limit {
        history.pop_front();
    }
    history.push_back(value);
}
