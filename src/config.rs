use serde::{Serialize, Deserialize};
use std::fs;
use std::path::Path;

use crate::error::{DdpgError, Result};

/// Width of both hidden layers of the actor and the critic.
pub const HIDDEN_SIZE: usize = 50;
pub const NUM_STEPS: usize = 100_000;
pub const INITIAL_NOISE: f32 = 1.0;
pub const NOISE_DECAY_INTERVAL: usize = 1000;
pub const BUFFER_SIZE: usize = 1_000_000;
pub const BATCH_SIZE: usize = 64;
pub const DISCOUNT: f32 = 0.995;
/// Training steps between hard target updates.
pub const TARGET_UPDATE: usize = 100;
/// Polyak coefficient for soft target updates. Not applied: targets are
/// always hard-copied every [`TARGET_UPDATE`] training steps.
pub const SOFT_UPDATE_FACTOR: f32 = 0.01;
pub const LEARNING_RATE: f32 = 1e-3;
pub const LOG_PATH: &str = "log";

/// Hyperparameters for a DDPG training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DdpgConfig {
    pub hidden_size: usize,
    pub buffer_capacity: usize,
    pub batch_size: usize,
    pub discount: f32,
    pub target_update: usize,
    pub num_steps: usize,
    pub initial_noise: f32,
    pub noise_decay_interval: usize,
    pub actor_learning_rate: f32,
    pub critic_learning_rate: f32,
    /// Transition point of the critic's Huber loss
    pub huber_delta: f32,
    /// Seed for sampling and exploration; entropy-seeded when absent
    pub seed: Option<u64>,
    pub log_path: String,
}

impl Default for DdpgConfig {
    fn default() -> Self {
        DdpgConfig {
            hidden_size: HIDDEN_SIZE,
            buffer_capacity: BUFFER_SIZE,
            batch_size: BATCH_SIZE,
            discount: DISCOUNT,
            target_update: TARGET_UPDATE,
            num_steps: NUM_STEPS,
            initial_noise: INITIAL_NOISE,
            noise_decay_interval: NOISE_DECAY_INTERVAL,
            actor_learning_rate: LEARNING_RATE,
            critic_learning_rate: LEARNING_RATE,
            huber_delta: 1.0,
            seed: None,
            log_path: LOG_PATH.to_string(),
        }
    }
}

impl DdpgConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("hidden_size", self.hidden_size),
            ("buffer_capacity", self.buffer_capacity),
            ("batch_size", self.batch_size),
            ("target_update", self.target_update),
            ("noise_decay_interval", self.noise_decay_interval),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(DdpgError::invalid_parameter(name, "must be greater than 0"));
            }
        }

        if self.batch_size > self.buffer_capacity {
            return Err(DdpgError::invalid_parameter(
                "batch_size".to_string(),
                format!("{} exceeds buffer capacity {}", self.batch_size, self.buffer_capacity),
            ));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(DdpgError::invalid_parameter("discount", "must be within [0, 1]"));
        }

        let rates = [
            ("actor_learning_rate", self.actor_learning_rate),
            ("critic_learning_rate", self.critic_learning_rate),
            ("initial_noise", self.initial_noise),
            ("huber_delta", self.huber_delta),
        ];
        for (name, value) in rates {
            if !(value.is_finite() && value > 0.0) {
                return Err(DdpgError::invalid_parameter(name, "must be a positive finite number"));
            }
        }

        Ok(())
    }

    /// Load a config from JSON. Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: DdpgConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_constants() {
        let config = DdpgConfig::default();
        assert_eq!(config.hidden_size, 50);
        assert_eq!(config.buffer_capacity, 1_000_000);
        assert_eq!(config.batch_size, 64);
        assert_eq!(config.discount, 0.995);
        assert_eq!(config.target_update, 100);
        assert_eq!(config.num_steps, 100_000);
        assert_eq!(config.initial_noise, 1.0);
        assert_eq!(config.noise_decay_interval, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = DdpgConfig { batch_size: 0, ..DdpgConfig::default() };
        assert!(matches!(config.validate(), Err(DdpgError::InvalidParameter { .. })));

        let config = DdpgConfig { buffer_capacity: 10, batch_size: 11, ..DdpgConfig::default() };
        assert!(config.validate().is_err());

        let config = DdpgConfig { discount: 1.5, ..DdpgConfig::default() };
        assert!(config.validate().is_err());

        let config = DdpgConfig { critic_learning_rate: f32::NAN, ..DdpgConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "batch_size": 4, "buffer_capacity": 10, "seed": 7 }}"#).unwrap();

        let config = DdpgConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.batch_size, 4);
        assert_eq!(config.buffer_capacity, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.discount, DISCOUNT);
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let json = DdpgConfig::default().to_json_string().unwrap();
        let parsed: DdpgConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DdpgConfig::default());
    }
}
