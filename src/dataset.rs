//! Sample/label batches and synthetic 2-D generators.
//!
//! A [`Dataset`] is the contract between a data source and the trainer:
//! samples are `[n, p]`, labels are `[n, 1]` with values in `{0, 1}`.

use std::f64::consts::PI;

use ndarray::{Array2, Zip};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::DatasetError;

/// Samples with one binary label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Array2<f64>,
    labels: Array2<f64>,
}

impl Dataset {
    /// Pair a sample matrix with a single-column label matrix.
    pub fn new(samples: Array2<f64>, labels: Array2<f64>) -> Result<Self, DatasetError> {
        if samples.nrows() == 0 {
            return Err(DatasetError::Empty);
        }
        if labels.ncols() != 1 {
            return Err(DatasetError::LabelWidth(labels.ncols()));
        }
        if samples.nrows() != labels.nrows() {
            return Err(DatasetError::RowCountMismatch {
                samples: samples.nrows(),
                labels: labels.nrows(),
            });
        }
        Ok(Self { samples, labels })
    }

    pub fn samples(&self) -> &Array2<f64> {
        &self.samples
    }

    pub fn labels(&self) -> &Array2<f64> {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.samples.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.nrows() == 0
    }

    /// Number of features per sample.
    pub fn feature_count(&self) -> usize {
        self.samples.ncols()
    }

    /// `(class 0 count, class 1 count)`.
    pub fn class_counts(&self) -> (usize, usize) {
        let positives = self.labels.iter().filter(|&&label| label > 0.5).count();
        (self.len() - positives, positives)
    }
}

fn noise_distribution(noise: f64) -> Result<Normal<f64>, DatasetError> {
    if !noise.is_finite() || noise < 0.0 {
        return Err(DatasetError::InvalidNoise(noise));
    }
    Normal::new(0.0, noise).map_err(|_| DatasetError::InvalidNoise(noise))
}

/// Two Gaussian blobs centred on `(-1, -1)` (class 0) and `(1, 1)` (class 1).
///
/// The first `n / 2` rows are class 0, the rest class 1. `noise` is the
/// standard deviation of each coordinate.
pub fn gaussian_blobs<R: Rng + ?Sized>(
    n_samples: usize,
    noise: f64,
    rng: &mut R,
) -> Result<Dataset, DatasetError> {
    if n_samples == 0 {
        return Err(DatasetError::Empty);
    }
    let normal = noise_distribution(noise)?;
    let n_first = n_samples / 2;

    let mut samples = Array2::zeros((n_samples, 2));
    let mut labels = Array2::zeros((n_samples, 1));
    for (row, mut sample) in samples.rows_mut().into_iter().enumerate() {
        let (center, label) = if row < n_first { (-1.0, 0.0) } else { (1.0, 1.0) };
        sample[0] = center + normal.sample(rng);
        sample[1] = center + normal.sample(rng);
        labels[[row, 0]] = label;
    }
    Dataset::new(samples, labels)
}

/// A large circle (class 0) around a smaller one scaled by `factor` (class 1).
///
/// Points are evenly spaced in angle; the inner circle gets the extra point
/// when `n_samples` is odd. Gaussian noise with standard deviation `noise`
/// is added to every coordinate.
pub fn concentric_circles<R: Rng + ?Sized>(
    n_samples: usize,
    factor: f64,
    noise: f64,
    rng: &mut R,
) -> Result<Dataset, DatasetError> {
    if n_samples == 0 {
        return Err(DatasetError::Empty);
    }
    if !(factor > 0.0 && factor < 1.0) {
        return Err(DatasetError::InvalidFactor(factor));
    }
    let normal = noise_distribution(noise)?;
    let n_outer = n_samples / 2;
    let n_inner = n_samples - n_outer;

    let mut samples = Array2::zeros((n_samples, 2));
    let mut labels = Array2::zeros((n_samples, 1));
    for row in 0..n_samples {
        let (index, count, radius, label) = if row < n_outer {
            (row, n_outer, 1.0, 0.0)
        } else {
            (row - n_outer, n_inner, factor, 1.0)
        };
        let angle = 2.0 * PI * index as f64 / count as f64;
        samples[[row, 0]] = radius * angle.cos() + normal.sample(rng);
        samples[[row, 1]] = radius * angle.sin() + normal.sample(rng);
        labels[[row, 0]] = label;
    }
    Dataset::new(samples, labels)
}

/// Fraction of rows where `prediction > 0.5` agrees with the label.
pub fn accuracy(predictions: &Array2<f64>, labels: &Array2<f64>) -> f64 {
    if predictions.is_empty() || predictions.dim() != labels.dim() {
        return 0.0;
    }
    let mut correct = 0usize;
    Zip::from(predictions).and(labels).for_each(|&p, &y| {
        if (p > 0.5) == (y > 0.5) {
            correct += 1;
        }
    });
    correct as f64 / predictions.len() as f64
}
