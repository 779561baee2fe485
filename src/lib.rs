//! Feedforward Neural Network Library
//!
//! A small fully connected network trained by backpropagation and plain
//! gradient descent, used to learn a binary decision boundary over 2-D points.
//!
//! # Modules
//!
//! - `layers`: the dense layer (weights, bias, activation tag)
//! - `network`: construction, forward pass, backward pass and training step
//! - `utils`: activation and loss capabilities, RNG construction
//! - `dataset`: sample/label batches and synthetic generators
//! - `collector`: click-driven point labelling buffers
//! - `visualization`: decision grid and checkpoint observers
//! - `trainer`: the driver loop
//! - `config`: training configuration loaded from JSON
//! - `error`: error types

pub mod collector;
pub mod config;
pub mod dataset;
pub mod error;
pub mod layers;
pub mod network;
pub mod trainer;
pub mod utils;
pub mod visualization;

pub use error::{ConfigError, DatasetError, NetworkError, TrainError};
pub use network::{build_network, Network, StepMode, Trace};
