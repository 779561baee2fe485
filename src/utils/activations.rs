//! Activation functions for neural networks
//!
//! Every activation is exposed through the [`ActivationFunction`] capability:
//! `evaluate` maps a pre-activation value to an output, and `derivative` maps
//! that *output* back to the local slope. The forward and backward passes only
//! ever call through this trait, so a new variant never touches the training
//! algorithm.
//!
//! Supplied variants:
//! - Sigmoid: `f(x) = 1 / (1 + exp(-x))`, `f'(a) = a * (1 - a)`
//! - ReLU: `f(x) = max(0, x)`, `f'(a) = 1 if a > 0 else 0`
//! - Tanh: `f(x) = tanh(x)`, `f'(a) = 1 - a^2`
//! - Identity: `f(x) = x`, `f'(a) = 1`

use ndarray::Array2;
use serde::Deserialize;

/// Sigmoid activation function.
///
/// Returns the sigmoid of the input: 1 / (1 + exp(-x))
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative assuming a = sigmoid(z).
///
/// Returns the derivative: a * (1 - a)
pub fn sigmoid_derivative(a: f64) -> f64 {
    a * (1.0 - a)
}

/// Two-function capability implemented by every activation.
pub trait ActivationFunction {
    /// Maps a pre-activation value to the activation output.
    fn evaluate(&self, x: f64) -> f64;

    /// Local derivative expressed as a function of the activation *output*.
    fn derivative(&self, output: f64) -> f64;

    /// Applies `evaluate` elementwise, returning a new matrix.
    fn apply(&self, z: &Array2<f64>) -> Array2<f64> {
        z.mapv(|x| self.evaluate(x))
    }

    /// Applies `derivative` elementwise to a matrix of outputs.
    fn apply_derivative(&self, a: &Array2<f64>) -> Array2<f64> {
        a.mapv(|v| self.derivative(v))
    }
}

/// Activation variants selectable at network-construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Logistic sigmoid. Derivative from output: `a * (1 - a)`.
    #[default]
    Sigmoid,
    /// Rectified linear unit. Derivative from output: `1` where `a > 0`, else `0`.
    Relu,
    /// Hyperbolic tangent. Derivative from output: `1 - a^2`.
    Tanh,
    /// No-op activation. Derivative from output: `1`.
    Identity,
}

impl Activation {
    /// Lowercase name used in configuration files and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Relu => "relu",
            Activation::Tanh => "tanh",
            Activation::Identity => "identity",
        }
    }
}

impl ActivationFunction for Activation {
    fn evaluate(&self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid(x),
            Activation::Relu => x.max(0.0),
            Activation::Tanh => x.tanh(),
            Activation::Identity => x,
        }
    }

    fn derivative(&self, output: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid_derivative(output),
            Activation::Relu => {
                if output > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Tanh => 1.0 - output * output,
            Activation::Identity => 1.0,
        }
    }
}
