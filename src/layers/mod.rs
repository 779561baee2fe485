//! Layer abstractions for neural networks
//!
//! The network is a strict chain of fully connected layers; each layer owns
//! its weights, bias and activation tag.

pub mod dense;

pub use dense::DenseLayer;
