//! Configuration structures for training
//!
//! This module provides the training configuration read by the driver:
//! network topology, activation and loss selection, learning rate,
//! reporting cadence and the synthetic dataset to train on.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::utils::{Activation, Loss};

/// Which synthetic generator the driver uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Two Gaussian blobs, linearly separable for small noise.
    Blobs,
    /// Two concentric circles.
    #[default]
    Circles,
}

/// Settings for the synthetic dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub kind: DatasetKind,
    /// Number of points generated.
    pub samples: usize,
    /// Standard deviation of the Gaussian noise.
    pub noise: f64,
    /// Inner/outer radius ratio, circles only.
    pub factor: f64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            kind: DatasetKind::Circles,
            samples: 500,
            noise: 0.05,
            factor: 0.45,
        }
    }
}

/// Configuration for a training run.
///
/// Every field is optional in the JSON file; missing fields take the
/// defaults below.
///
/// # Example
///
/// ```json
/// {
///   "topology": [2, 4, 8, 1],
///   "activation": "sigmoid",
///   "loss": "mse",
///   "learning_rate": 0.05,
///   "epoch_count": 2500,
///   "report_interval": 10,
///   "seed": 42,
///   "dataset": { "kind": "blobs", "samples": 500, "noise": 0.4 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Layer widths, input first.
    pub topology: Vec<usize>,
    /// Activation used by every layer: "sigmoid", "relu", "tanh" or "identity"
    pub activation: Activation,
    /// Loss function: "mse"
    pub loss: Loss,
    pub learning_rate: f64,
    /// Number of training steps.
    pub epoch_count: usize,
    /// Steps between checkpoints.
    pub report_interval: usize,
    /// Points per side of the decision grid.
    pub grid_resolution: usize,
    /// Seed for parameter initialization and dataset generation.
    pub seed: Option<u64>,
    pub dataset: DatasetConfig,
    /// Optional CSV file receiving `step,loss` lines.
    pub loss_history_path: Option<PathBuf>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            topology: vec![2, 4, 8, 1],
            activation: Activation::Sigmoid,
            loss: Loss::MeanSquaredError,
            learning_rate: 0.05,
            epoch_count: 2500,
            report_interval: 10,
            grid_resolution: 50,
            seed: None,
            dataset: DatasetConfig::default(),
            loss_history_path: None,
        }
    }
}

/// Loads a training configuration from a JSON file.
///
/// # Examples
///
/// ```no_run
/// use rust_feedforward_nn::config::load_config;
///
/// let cfg = load_config("config/blob_classifier.json").unwrap();
/// assert_eq!(cfg.topology, vec![2, 4, 8, 1]);
/// ```
pub fn load_config(path: &str) -> Result<TrainingConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses and validates a JSON configuration string.
pub fn parse_config(contents: &str) -> Result<TrainingConfig, ConfigError> {
    let config: TrainingConfig = serde_json::from_str(contents)?;
    validate_config(&config)?;
    Ok(config)
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

/// Checks value ranges that the type system cannot express.
pub fn validate_config(config: &TrainingConfig) -> Result<(), ConfigError> {
    if config.topology.len() < 2 {
        return Err(invalid("topology must list at least two layer widths"));
    }
    if config.topology.contains(&0) {
        return Err(invalid("topology widths must be positive"));
    }
    if !(config.learning_rate.is_finite() && config.learning_rate > 0.0) {
        return Err(invalid("learning_rate must be positive"));
    }
    if config.epoch_count == 0 {
        return Err(invalid("epoch_count must be positive"));
    }
    if config.report_interval == 0 {
        return Err(invalid("report_interval must be positive"));
    }
    if config.grid_resolution == 0 {
        return Err(invalid("grid_resolution must be positive"));
    }

    let dataset = &config.dataset;
    if dataset.samples == 0 {
        return Err(invalid("dataset.samples must be positive"));
    }
    if !(dataset.noise.is_finite() && dataset.noise >= 0.0) {
        return Err(invalid("dataset.noise must be non-negative"));
    }
    if dataset.kind == DatasetKind::Circles && !(dataset.factor > 0.0 && dataset.factor < 1.0) {
        return Err(invalid("dataset.factor must lie in (0, 1)"));
    }

    Ok(())
}
