//! # Activation Functions Module
//!
//! Both networks in the agent use the same scheme: rectified-linear hidden
//! layers and an identity output layer.
//!
//! - **ReLU**: `max(0, x)`
//! - **Linear**: identity, used on outputs so actions and values are unbounded
//!
//! ```rust
//! use ddpg::activations::Activation;
//! use ndarray::array;
//!
//! let mut data = array![1.0, -0.5, 0.0, 2.0];
//! Activation::Relu.apply(&mut data);
//! assert_eq!(data, array![1.0, 0.0, 0.0, 2.0]);
//! ```

pub mod functions;

pub use functions::Activation;
