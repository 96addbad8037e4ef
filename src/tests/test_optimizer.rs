use ndarray::{arr1, arr2};

use crate::activations::Activation;
use crate::layers::DenseLayer;
use crate::optimizer::{Adam, Optimizer, OptimizerWrapper, SGD};

#[test]
fn test_sgd_update() {
    let mut sgd = SGD::new();
    let mut weights = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
    let gradients = arr2(&[[0.1, 0.2], [0.3, 0.4]]);
    sgd.update_weights(0, &mut weights, &gradients, 0.1);

    assert!((weights[[0, 0]] - 0.99).abs() < 1e-6);
    assert!((weights[[1, 1]] - 3.96).abs() < 1e-6);
}

#[test]
fn test_adam_first_step_is_learning_rate_sized() {
    let layers = vec![DenseLayer::new(2, 2, Activation::Linear)];
    let mut adam = Adam::default(&layers);
    let mut biases = arr1(&[0.0, 0.0]);

    adam.advance();
    adam.update_biases(0, &mut biases, &arr1(&[0.5, -3.0]), 0.001);

    // Bias-corrected first step is lr * sign(g).
    assert!((biases[0] + 0.001).abs() < 1e-6);
    assert!((biases[1] - 0.001).abs() < 1e-6);
}

#[test]
fn test_adam_keeps_state_per_layer() {
    let layers = vec![
        DenseLayer::new(2, 3, Activation::Relu),
        DenseLayer::new(3, 1, Activation::Linear),
    ];
    let mut optimizer = OptimizerWrapper::adam(&layers);
    let mut first = arr2(&[[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
    let mut second = arr2(&[[0.0], [0.0], [0.0]]);

    optimizer.advance();
    optimizer.update_weights(0, &mut first, &arr2(&[[1.0, 1.0, 1.0], [1.0, 1.0, 1.0]]), 0.01);
    optimizer.update_weights(1, &mut second, &arr2(&[[-1.0], [-1.0], [-1.0]]), 0.01);

    assert!(first.iter().all(|&w| (w + 0.01).abs() < 1e-5));
    assert!(second.iter().all(|&w| (w - 0.01).abs() < 1e-5));
}
