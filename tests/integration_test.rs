use ddpg::{
    config::DdpgConfig,
    env::{Environment, Pendulum, StepResult},
    error::Result,
    trainer::Trainer,
};
use ndarray::{array, Array1};
use std::collections::HashMap;

/// One-dimensional toy task: the action is added to the state, the reward
/// is `-state^2`, and episodes last a fixed number of steps.
struct Toy {
    state: f32,
    steps: usize,
    episode_length: usize,
    resets: usize,
}

impl Toy {
    fn new(episode_length: usize) -> Self {
        Toy { state: 0.0, steps: 0, episode_length, resets: 0 }
    }
}

impl Environment for Toy {
    fn observation_size(&self) -> usize {
        1
    }

    fn action_size(&self) -> usize {
        1
    }

    fn reset(&mut self) -> Array1<f32> {
        self.resets += 1;
        self.steps = 0;
        self.state = 1.0;
        array![self.state]
    }

    fn step(&mut self, action: &Array1<f32>) -> Result<StepResult> {
        let reward = -self.state * self.state;
        self.state += action[0];
        self.steps += 1;
        Ok(StepResult {
            next_state: array![self.state],
            reward,
            done: self.steps >= self.episode_length,
            info: HashMap::new(),
        })
    }
}

fn toy_config() -> DdpgConfig {
    DdpgConfig {
        buffer_capacity: 10,
        batch_size: 4,
        num_steps: 50,
        hidden_size: 8,
        seed: Some(17),
        ..DdpgConfig::default()
    }
}

#[test]
fn test_toy_run_completes_with_one_record_per_reset() {
    let mut trainer = Trainer::new(Toy::new(12), toy_config()).unwrap();
    let report = trainer.run().unwrap();

    // The first reset starts training; every later one follows an episode end.
    let episode_resets = trainer.env().resets - 1;
    assert_eq!(episode_resets, 4);
    assert_eq!(report.episodes.len(), episode_resets);
    assert_eq!(report.metrics.episode_count(), episode_resets);

    let steps: Vec<usize> = report.episodes.iter().map(|e| e.step).collect();
    assert_eq!(steps, vec![12, 24, 36, 48]);
    assert!(report.episodes.iter().all(|e| e.length == 12 && e.loss >= 0.0));

    assert_eq!(report.steps, 50);
    assert_eq!(trainer.buffer().len(), 10);
    // Training starts once four transitions are stored.
    assert_eq!(report.updates, 47);
    assert_eq!(trainer.agent().train_steps(), 47);
}

#[test]
fn test_episode_record_line_format() {
    let mut trainer = Trainer::new(Toy::new(5), toy_config()).unwrap();
    let report = trainer.run().unwrap();
    let first = report.episodes[0];
    assert_eq!(first.to_string(), format!("step:5 | Loss: {}", first.loss));
}

#[test]
fn test_noise_schedule_advances_with_steps() {
    let config = DdpgConfig { noise_decay_interval: 20, ..toy_config() };
    let mut trainer = Trainer::new(Toy::new(10), config).unwrap();
    trainer.run().unwrap();
    assert_eq!(trainer.noise().steps(), 50);
    assert_eq!(trainer.noise().factor(), 0.25);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = DdpgConfig { batch_size: 20, ..toy_config() };
    assert!(Trainer::new(Toy::new(5), config).is_err());
}

#[test]
fn test_short_pendulum_run() {
    let config = DdpgConfig {
        buffer_capacity: 1000,
        batch_size: 16,
        num_steps: 450,
        seed: Some(5),
        ..DdpgConfig::default()
    };
    let mut trainer = Trainer::new(Pendulum::new(), config).unwrap();
    let report = trainer.run().unwrap();

    let steps: Vec<usize> = report.episodes.iter().map(|e| e.step).collect();
    assert_eq!(steps, vec![200, 400]);
    assert!(report.episodes.iter().all(|e| e.loss.is_finite() && e.loss >= 0.0));
    assert!(report.metrics.latest_losses().is_some());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = || {
        let mut trainer = Trainer::new(Toy::new(9), toy_config()).unwrap();
        trainer.run().unwrap()
    };
    let first = run();
    let second = run();

    assert_eq!(first.episodes.len(), 5);
    assert_eq!(first.episodes, second.episodes);
    assert_eq!(first.metrics.latest_losses(), second.metrics.latest_losses());
}
