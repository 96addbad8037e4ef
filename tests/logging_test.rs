use ddpg::{
    config::DdpgConfig,
    env::{Environment, StepResult},
    error::Result,
    logging::init_file_logger,
    trainer::Trainer,
};
use ndarray::{array, Array1};
use std::collections::HashMap;
use std::fs;

struct Drift {
    state: f32,
    steps: usize,
}

impl Environment for Drift {
    fn observation_size(&self) -> usize {
        1
    }

    fn action_size(&self) -> usize {
        1
    }

    fn reset(&mut self) -> Array1<f32> {
        self.state = 0.5;
        self.steps = 0;
        array![self.state]
    }

    fn step(&mut self, action: &Array1<f32>) -> Result<StepResult> {
        let reward = -self.state * self.state;
        self.state = (self.state + action[0]).clamp(-2.0, 2.0);
        self.steps += 1;
        Ok(StepResult {
            next_state: array![self.state],
            reward,
            done: self.steps % 7 == 0,
            info: HashMap::new(),
        })
    }
}

// Installs the global logger, so it lives alone in this binary.
#[test]
fn test_one_log_line_per_episode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log");
    init_file_logger(&path).unwrap();

    let config = DdpgConfig {
        buffer_capacity: 10,
        batch_size: 4,
        num_steps: 50,
        hidden_size: 8,
        seed: Some(3),
        ..DdpgConfig::default()
    };
    let mut trainer = Trainer::new(Drift { state: 0.0, steps: 0 }, config).unwrap();
    let report = trainer.run().unwrap();
    log::logger().flush();

    let contents = fs::read_to_string(&path).unwrap();
    let episode_lines: Vec<&str> = contents.lines().filter(|l| l.contains(" | Loss: ")).collect();

    assert_eq!(report.episodes.len(), 7);
    assert_eq!(episode_lines.len(), report.episodes.len());
    assert!(episode_lines[0].starts_with("INFO:ddpg::trainer:step:7 | Loss: "));

    // A second logger cannot be installed.
    assert!(init_file_logger(dir.path().join("other")).is_err());
}
