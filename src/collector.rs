//! Interactive point labelling.
//!
//! [`PointCollector`] owns the buffers that a click-driven labeller fills.
//! Windowing and event dispatch live outside this crate: a front end
//! forwards double clicks to [`PointCollector::on_double_click`] (or calls
//! [`PointCollector::record`] directly) and later takes a
//! [`PointCollector::snapshot`] to train on.

use ndarray::Array2;

use crate::dataset::Dataset;
use crate::error::DatasetError;

/// Mouse buttons a front end may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Labels the point as class 0.
    Primary,
    /// Labels the point as class 1.
    Secondary,
    Middle,
}

/// Accumulates labelled 2-D points.
#[derive(Debug, Clone, Default)]
pub struct PointCollector {
    points: Vec<[f64; 2]>,
    labels: Vec<u8>,
}

fn round5(value: f64) -> f64 {
    (value * 1e5).round() / 1e5
}

impl PointCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point; coordinates are rounded to 5 decimal places.
    /// Any non-zero `class_label` is stored as class 1.
    pub fn record(&mut self, x: f64, y: f64, class_label: u8) {
        self.points.push([round5(x), round5(y)]);
        self.labels.push(u8::from(class_label != 0));
    }

    /// Event handler for a double click at `(x, y)` in data coordinates.
    ///
    /// Returns the class recorded, or `None` when the button is ignored.
    pub fn on_double_click(&mut self, button: MouseButton, x: f64, y: f64) -> Option<u8> {
        let class_label = match button {
            MouseButton::Primary => 0,
            MouseButton::Secondary => 1,
            MouseButton::Middle => return None,
        };
        self.record(x, y, class_label);
        log::debug!("Recorded point ({:.5}, {:.5}) as class {}", x, y, class_label);
        Some(class_label)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.labels.clear();
    }

    /// Copy the collected points into a `[n, 2]` / `[n, 1]` dataset.
    ///
    /// # Errors
    ///
    /// `DatasetError::Empty` when nothing has been recorded.
    pub fn snapshot(&self) -> Result<Dataset, DatasetError> {
        let n = self.points.len();
        let samples = Array2::from_shape_fn((n, 2), |(row, col)| self.points[row][col]);
        let labels = Array2::from_shape_fn((n, 1), |(row, _)| f64::from(self.labels[row]));
        Dataset::new(samples, labels)
    }
}
