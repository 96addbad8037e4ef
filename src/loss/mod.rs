pub mod functions;

pub use functions::{HuberLoss, Loss, MSE};
