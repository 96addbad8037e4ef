use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{DdpgError, Result};
use crate::replay_buffer::Transition;

/// Sampled transitions laid out as aligned arrays; row `i` of every field
/// comes from the same transition.
#[derive(Clone, Debug)]
pub struct Batch {
    pub states: Array2<f32>,
    pub actions: Array2<f32>,
    pub rewards: Array1<f32>,
    pub next_states: Array2<f32>,
    /// 1.0 for terminal transitions, 0.0 otherwise
    pub dones: Array1<f32>,
}

impl Batch {
    pub fn from_transitions(transitions: &[&Transition]) -> Result<Self> {
        if transitions.is_empty() {
            return Err(DdpgError::EmptyBuffer("cannot format an empty batch".to_string()));
        }

        Ok(Batch {
            states: stack_rows(transitions.iter().map(|t| t.state.view()))?,
            actions: stack_rows(transitions.iter().map(|t| t.action.view()))?,
            rewards: transitions.iter().map(|t| t.reward).collect(),
            next_states: stack_rows(transitions.iter().map(|t| t.next_state.view()))?,
            dones: transitions.iter().map(|t| if t.done { 1.0 } else { 0.0 }).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

/// Stack equal-length vectors into the rows of a matrix.
fn stack_rows<'a>(rows: impl ExactSizeIterator<Item = ArrayView1<'a, f32>>) -> Result<Array2<f32>> {
    let n = rows.len();
    let mut result: Option<Array2<f32>> = None;

    for (i, row) in rows.enumerate() {
        let matrix = result.get_or_insert_with(|| Array2::zeros((n, row.len())));
        if row.len() != matrix.ncols() {
            return Err(DdpgError::dimension_mismatch(
                format!("rows of length {}", matrix.ncols()),
                format!("row {} of length {}", i, row.len()),
            ));
        }
        matrix.row_mut(i).assign(&row);
    }

    Ok(result.unwrap_or_else(|| Array2::zeros((0, 0))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn transition(i: f32, done: bool) -> Transition {
        Transition {
            state: array![i, i + 0.5],
            action: array![-i],
            reward: 10.0 * i,
            next_state: array![i + 1.0, i + 1.5],
            done,
        }
    }

    #[test]
    fn test_rows_stay_aligned() {
        let a = transition(1.0, false);
        let b = transition(2.0, true);
        let batch = Batch::from_transitions(&[&b, &a, &b]).unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.states.row(0), array![2.0, 2.5]);
        assert_eq!(batch.states.row(1), array![1.0, 1.5]);
        assert_eq!(batch.actions.column(0), array![-2.0, -1.0, -2.0]);
        assert_eq!(batch.rewards, array![20.0, 10.0, 20.0]);
        assert_eq!(batch.next_states.row(1), array![2.0, 2.5]);
        assert_eq!(batch.dones, array![1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        assert!(matches!(Batch::from_transitions(&[]), Err(DdpgError::EmptyBuffer(_))));
    }

    #[test]
    fn test_ragged_states_are_rejected() {
        let a = transition(1.0, false);
        let mut b = transition(2.0, false);
        b.state = array![1.0];
        assert!(matches!(
            Batch::from_transitions(&[&a, &b]),
            Err(DdpgError::DimensionMismatch { .. })
        ));
    }
}
