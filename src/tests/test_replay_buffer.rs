use ndarray::array;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::DdpgError;
use crate::replay_buffer::{ReplayBuffer, Transition};

fn transition(i: usize) -> Transition {
    Transition {
        state: array![i as f32],
        action: array![-(i as f32)],
        reward: i as f32,
        next_state: array![(i + 1) as f32],
        done: i % 7 == 6,
    }
}

#[test]
fn test_append_grows_until_capacity() {
    let mut buffer = ReplayBuffer::new(3).unwrap();
    assert!(buffer.is_empty());

    buffer.append(transition(0));
    buffer.append(transition(1));
    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.capacity(), 3);
}

#[test]
fn test_ring_overwrites_oldest() {
    let capacity = 4;
    let k = 3;
    let mut buffer = ReplayBuffer::new(capacity).unwrap();
    for i in 0..capacity + k {
        buffer.append(transition(i));
    }

    assert_eq!(buffer.len(), capacity);
    // The (k+1)-th inserted transition is index k.
    assert_eq!(buffer.iter().next(), Some(&transition(k)));

    let rewards: Vec<f32> = buffer.iter().map(|t| t.reward).collect();
    assert_eq!(rewards, vec![3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_ring_wraps_more_than_once() {
    let mut buffer = ReplayBuffer::new(3).unwrap();
    for i in 0..10 {
        buffer.append(transition(i));
    }
    let rewards: Vec<f32> = buffer.iter().map(|t| t.reward).collect();
    assert_eq!(rewards, vec![7.0, 8.0, 9.0]);
}

#[test]
fn test_sample_returns_exactly_n_with_replacement() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut buffer = ReplayBuffer::new(10).unwrap();
    buffer.append(transition(0));
    buffer.append(transition(1));

    // More than stored: duplicates are expected.
    let sample = buffer.sample(8, &mut rng).unwrap();
    assert_eq!(sample.len(), 8);
    for t in sample {
        assert!(t.reward == 0.0 || t.reward == 1.0);
    }
}

#[test]
fn test_sample_zero_is_empty() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut buffer = ReplayBuffer::new(10).unwrap();
    buffer.append(transition(0));
    assert!(buffer.sample(0, &mut rng).unwrap().is_empty());
}

#[test]
fn test_sample_from_empty_buffer_fails() {
    let mut rng = StdRng::seed_from_u64(0);
    let buffer = ReplayBuffer::new(10).unwrap();
    assert!(matches!(buffer.sample(1, &mut rng), Err(DdpgError::EmptyBuffer(_))));
    assert!(matches!(buffer.sample(0, &mut rng), Err(DdpgError::EmptyBuffer(_))));
}

#[test]
fn test_sample_only_draws_stored_transitions() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut buffer = ReplayBuffer::new(5).unwrap();
    for i in 0..12 {
        buffer.append(transition(i));
    }
    for t in buffer.sample(100, &mut rng).unwrap() {
        assert!((7.0..=11.0).contains(&t.reward));
    }
}

#[test]
fn test_zero_capacity_is_rejected() {
    assert!(matches!(ReplayBuffer::new(0), Err(DdpgError::InvalidParameter { .. })));
}
