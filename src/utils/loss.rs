//! Loss functions for training.
//!
//! A loss is a pair: a scalar `value` used for reporting and an elementwise
//! `gradient` fed into the output layer's delta. The mean-squared-error
//! gradient is `pred - target` without any batch-size division; the batch
//! normalization happens later, in the parameter update.

use ndarray::Array2;
use serde::Deserialize;

/// Two-function capability implemented by every loss.
pub trait LossFunction {
    /// Scalar loss over the whole batch.
    fn value(&self, predictions: &Array2<f64>, targets: &Array2<f64>) -> f64;

    /// Elementwise gradient with respect to the predictions.
    fn gradient(&self, predictions: &Array2<f64>, targets: &Array2<f64>) -> Array2<f64>;
}

/// Supported loss functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum Loss {
    /// Mean Squared Error loss.
    #[default]
    #[serde(rename = "mse")]
    MeanSquaredError,
}

impl LossFunction for Loss {
    fn value(&self, predictions: &Array2<f64>, targets: &Array2<f64>) -> f64 {
        match self {
            Loss::MeanSquaredError => {
                let diff = predictions - targets;
                diff.mapv(|d| d * d).mean().unwrap_or(0.0)
            }
        }
    }

    fn gradient(&self, predictions: &Array2<f64>, targets: &Array2<f64>) -> Array2<f64> {
        match self {
            Loss::MeanSquaredError => predictions - targets,
        }
    }
}
