//! Error types for network construction, training and configuration.

use thiserror::Error;

/// Errors raised while building or training a network.
///
/// None of these are retried internally. A step that returns an error has
/// not modified any layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// The layer-width sequence is too short or contains a zero width.
    #[error("Invalid topology {topology:?}: {reason}")]
    InvalidTopology { topology: Vec<usize>, reason: String },

    /// A matrix does not have the shape the network expects.
    #[error("Shape mismatch in {context}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        context: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// NaN or infinity showed up in a prediction or a parameter update.
    #[error("Non-finite value in {location}")]
    NonFiniteValue { location: String },
}

/// Errors raised while generating or assembling a dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("A dataset needs at least one sample")]
    Empty,

    #[error("Noise must be a finite, non-negative standard deviation, got {0}")]
    InvalidNoise(f64),

    #[error("Circle factor must lie in (0, 1), got {0}")]
    InvalidFactor(f64),

    #[error("Samples have {samples} rows but labels have {labels}")]
    RowCountMismatch { samples: usize, labels: usize },

    #[error("Labels must be a single column, got {0} columns")]
    LabelWidth(usize),
}

/// Errors raised while loading a training configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that end a training run.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Checkpoint observer failed: {0}")]
    Observer(#[from] std::io::Error),
}
