//! Shared utilities for the network
//!
//! This module provides random number generation, the activation function
//! capability and the loss function capability.

pub mod activations;
pub mod loss;
pub mod rng;

pub use activations::{sigmoid, sigmoid_derivative, Activation, ActivationFunction};
pub use loss::{Loss, LossFunction};
pub use rng::rng_from_seed;
