//! Dense (fully connected) layer implementation
//!
//! This module provides a DenseLayer that performs the transformation:
//! output = activation(input × weights + bias)

use ndarray::{Array2, Axis};
use rand::Rng;

use crate::error::NetworkError;
use crate::utils::{Activation, ActivationFunction};

/// Dense (fully connected) layer with weights, bias and an activation.
///
/// Performs `a = f(xW + b)` where x is the input (batch_size × input_size),
/// W is the weight matrix (input_size × output_size), b is the bias row
/// (1 × output_size) broadcast over the batch, and f is the activation.
///
/// # Example
///
/// ```
/// use rust_feedforward_nn::layers::DenseLayer;
/// use rust_feedforward_nn::utils::{rng_from_seed, Activation};
///
/// let mut rng = rng_from_seed(Some(42));
/// let layer = DenseLayer::new(2, 4, Activation::Sigmoid, &mut rng);
/// assert_eq!(layer.input_size(), 2);
/// assert_eq!(layer.output_size(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    weights: Array2<f64>,
    bias: Array2<f64>,
    activation: Activation,
}

impl DenseLayer {
    /// Create a new DenseLayer with uniform random parameters.
    ///
    /// Weights and bias are drawn independently from `Uniform(-1, 1)`.
    /// The bias is random too, so no two units start identical.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        output_size: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let weights = Array2::from_shape_fn((input_size, output_size), |_| rng.gen_range(-1.0f64..1.0));
        let bias = Array2::from_shape_fn((1, output_size), |_| rng.gen_range(-1.0f64..1.0));

        Self {
            weights,
            bias,
            activation,
        }
    }

    /// Create a layer from explicit parameters.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless `bias` is `[1, weights.ncols()]`, and
    /// `InvalidTopology` if either dimension of `weights` is zero.
    pub fn from_parameters(
        weights: Array2<f64>,
        bias: Array2<f64>,
        activation: Activation,
    ) -> Result<Self, NetworkError> {
        let (rows, cols) = weights.dim();
        if rows == 0 || cols == 0 {
            return Err(NetworkError::InvalidTopology {
                topology: vec![rows, cols],
                reason: "layer widths must be positive".to_string(),
            });
        }
        if bias.dim() != (1, cols) {
            return Err(NetworkError::ShapeMismatch {
                context: "layer bias",
                expected: (1, cols),
                actual: bias.dim(),
            });
        }

        Ok(Self {
            weights,
            bias,
            activation,
        })
    }

    /// Get the input size of the layer.
    pub fn input_size(&self) -> usize {
        self.weights.nrows()
    }

    /// Get the output size of the layer.
    pub fn output_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Get the number of trainable parameters.
    ///
    /// Returns input_size × output_size (weights) + output_size (bias).
    pub fn parameter_count(&self) -> usize {
        self.weights.len() + self.bias.len()
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn bias(&self) -> &Array2<f64> {
        &self.bias
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Weighted sum followed by the activation.
    ///
    /// Returns `(z, a)`: the pre-activation and post-activation matrices,
    /// both `batch_size × output_size`. The caller guarantees
    /// `input.ncols() == self.input_size()`.
    pub fn forward(&self, input: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
        let z = input.dot(&self.weights) + &self.bias;
        let a = self.activation.apply(&z);
        (z, a)
    }

    /// Compute the gradient-descent step for this layer without applying it.
    ///
    /// `input` is the matrix that was fed into the layer and `delta` is the
    /// layer's error signal. The bias moves by the batch mean of `delta`; the
    /// weights move by the batch sum `input^T · delta`. Both are scaled by
    /// `learning_rate`.
    pub fn descend(
        &self,
        input: &Array2<f64>,
        delta: &Array2<f64>,
        learning_rate: f64,
    ) -> (Array2<f64>, Array2<f64>) {
        let bias_step = delta
            .mean_axis(Axis(0))
            .map(|m| m.insert_axis(Axis(0)))
            .unwrap_or_else(|| Array2::zeros(self.bias.dim()));
        let bias = &self.bias - &(bias_step * learning_rate);
        let weights = &self.weights - &(input.t().dot(delta) * learning_rate);
        (weights, bias)
    }

    /// Replace the parameters; shapes are unchanged for the layer's lifetime.
    pub(crate) fn set_parameters(&mut self, weights: Array2<f64>, bias: Array2<f64>) {
        debug_assert_eq!(weights.dim(), self.weights.dim());
        debug_assert_eq!(bias.dim(), self.bias.dim());
        self.weights = weights;
        self.bias = bias;
    }
}
