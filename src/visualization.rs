//! Checkpoint hooks for decision-boundary and loss-curve consumers.
//!
//! Rendering is external. This module evaluates the network over a regular
//! grid (inference only) and hands read-only [`Checkpoint`] views to a
//! [`TrainingObserver`].

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ndarray::{Array1, Array2};

use crate::error::NetworkError;
use crate::network::Network;

/// Default half-width of the square evaluated by [`DecisionGrid`].
pub const GRID_EXTENT: f64 = 1.5;

/// Network output sampled on a `resolution × resolution` grid.
///
/// `values[[i, j]]` is the prediction at `(xs[i], ys[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionGrid {
    pub xs: Array1<f64>,
    pub ys: Array1<f64>,
    pub values: Array2<f64>,
}

impl DecisionGrid {
    /// Evaluate over `[-GRID_EXTENT, GRID_EXTENT]` on both axes.
    pub fn evaluate(network: &Network, resolution: usize) -> Result<Self, NetworkError> {
        Self::evaluate_range(network, resolution, (-GRID_EXTENT, GRID_EXTENT))
    }

    /// Evaluate over `range` on both axes, endpoints included.
    ///
    /// The network must take 2 inputs; only the first output column is kept.
    pub fn evaluate_range(
        network: &Network,
        resolution: usize,
        range: (f64, f64),
    ) -> Result<Self, NetworkError> {
        let xs = Array1::linspace(range.0, range.1, resolution);
        let ys = xs.clone();

        let points = Array2::from_shape_fn((resolution * resolution, 2), |(row, col)| {
            if col == 0 {
                xs[row / resolution]
            } else {
                ys[row % resolution]
            }
        });
        let predictions = network.predict(&points)?;
        let values =
            Array2::from_shape_fn((resolution, resolution), |(i, j)| predictions[[i * resolution + j, 0]]);

        Ok(Self { xs, ys, values })
    }
}

/// Read-only view handed to observers at each reporting step.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint<'a> {
    pub step: usize,
    pub epoch_count: usize,
    pub predictions: &'a Array2<f64>,
    pub samples: &'a Array2<f64>,
    pub labels: &'a Array2<f64>,
    pub loss_history: &'a [f64],
    pub grid: &'a DecisionGrid,
}

impl Checkpoint<'_> {
    /// Loss recorded at this checkpoint.
    pub fn loss(&self) -> Option<f64> {
        self.loss_history.last().copied()
    }
}

/// Consumer notified at every checkpoint of the driver loop.
pub trait TrainingObserver {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint<'_>) -> io::Result<()>;
}

impl TrainingObserver for Vec<Box<dyn TrainingObserver>> {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint<'_>) -> io::Result<()> {
        for observer in self.iter_mut() {
            observer.on_checkpoint(checkpoint)?;
        }
        Ok(())
    }
}

/// Logs the checkpoint loss at info level.
#[derive(Debug, Default)]
pub struct LogObserver;

impl TrainingObserver for LogObserver {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint<'_>) -> io::Result<()> {
        if let Some(loss) = checkpoint.loss() {
            log::info!(
                "Step {}/{}: loss = {:.6}",
                checkpoint.step,
                checkpoint.epoch_count,
                loss
            );
        }
        Ok(())
    }
}

/// Writes `step,loss` lines for plotting the loss curve.
pub struct LossHistoryWriter<W: Write> {
    out: W,
}

impl LossHistoryWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and write the CSV header.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> LossHistoryWriter<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "step,loss")?;
        Ok(Self { out })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TrainingObserver for LossHistoryWriter<W> {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint<'_>) -> io::Result<()> {
        if let Some(loss) = checkpoint.loss() {
            writeln!(self.out, "{},{:.6}", checkpoint.step, loss)?;
            self.out.flush()?;
        }
        Ok(())
    }
}
