use ndarray::Array1;
use rand::Rng;

use crate::error::{DdpgError, Result};

/// One environment interaction: `(state, action, reward, next_state, done)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: Array1<f32>,
    pub action: Array1<f32>,
    pub reward: f32,
    pub next_state: Array1<f32>,
    pub done: bool,
}

/// Fixed-capacity experience store with ring overwrite.
///
/// Until full, transitions are appended. Afterwards each append overwrites
/// the slot under the write cursor, which always points at the oldest entry.
#[derive(Clone, Debug)]
pub struct ReplayBuffer {
    buffer: Vec<Transition>,
    capacity: usize,
    cursor: usize,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DdpgError::invalid_parameter("capacity", "must be greater than 0"));
        }
        Ok(ReplayBuffer {
            // Default capacity is a million entries; allocate lazily.
            buffer: Vec::with_capacity(capacity.min(4096)),
            capacity,
            cursor: 0,
        })
    }

    pub fn append(&mut self, transition: Transition) {
        if self.buffer.len() < self.capacity {
            self.buffer.push(transition);
        } else {
            self.buffer[self.cursor] = transition;
            self.cursor = (self.cursor + 1) % self.capacity;
        }
    }

    /// Draw `batch_size` transitions uniformly at random, with replacement.
    pub fn sample<R: Rng + ?Sized>(&self, batch_size: usize, rng: &mut R) -> Result<Vec<&Transition>> {
        if self.buffer.is_empty() {
            return Err(DdpgError::EmptyBuffer("cannot sample from an empty replay buffer".to_string()));
        }
        Ok((0..batch_size)
            .map(|_| &self.buffer[rng.gen_range(0..self.buffer.len())])
            .collect())
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored transitions from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        let (newer, older) = self.buffer.split_at(self.cursor);
        older.iter().chain(newer.iter())
    }
}
