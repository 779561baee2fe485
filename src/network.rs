//! Feedforward network: construction, forward pass and backpropagation.
//!
//! Data flows `samples -> layer 1 -> ... -> layer L -> prediction`; the
//! backward pass walks the same chain in reverse, computing one delta per
//! layer and a gradient-descent step for its weights and bias.
//!
//! A training step is atomic. Shapes are validated and the prediction is
//! checked for NaN/Inf before anything is touched, and every layer's new
//! parameters are staged and checked before any of them is committed.

use ndarray::Array2;
use rand::Rng;

use crate::error::NetworkError;
use crate::layers::DenseLayer;
use crate::utils::{Activation, ActivationFunction, LossFunction};

/// One record of the forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    /// Weighted sum `z`; `None` for the input entry.
    pub pre_activation: Option<Array2<f64>>,
    /// Activation output `a`; for the input entry this is the batch itself.
    pub activation: Array2<f64>,
}

/// Per-layer `(z, a)` pairs recorded by [`Network::forward`].
///
/// Entry 0 is `(None, input_batch)`, so `entries()[i].activation` is always
/// the matrix fed into layer `i`. A trace belongs to exactly one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The batch that was fed into the first layer.
    pub fn input(&self) -> &Array2<f64> {
        &self.entries[0].activation
    }

    /// The output of the last layer.
    pub fn prediction(&self) -> &Array2<f64> {
        &self.entries[self.entries.len() - 1].activation
    }

    pub fn into_prediction(mut self) -> Array2<f64> {
        // forward always pushes the input entry, so pop cannot fail
        self.entries
            .pop()
            .map(|entry| entry.activation)
            .unwrap_or_else(|| Array2::zeros((0, 0)))
    }
}

/// The two modes of a training step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// Forward pass, then backward pass with parameter updates.
    Train,
    /// Forward pass only; the trace is discarded.
    Infer,
}

/// Ordered chain of dense layers.
///
/// The number and shapes of layers are fixed at construction; only the
/// parameter values change during training.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<DenseLayer>,
}

/// Build one randomly initialized layer per consecutive width pair.
///
/// # Errors
///
/// `InvalidTopology` when `topology` has fewer than two entries or contains
/// a zero width.
///
/// # Example
///
/// ```
/// use rust_feedforward_nn::network::build_network;
/// use rust_feedforward_nn::utils::{rng_from_seed, Activation};
///
/// let mut rng = rng_from_seed(Some(1));
/// let network = build_network(&[2, 4, 8, 1], Activation::Sigmoid, &mut rng).unwrap();
/// assert_eq!(network.len(), 3);
/// ```
pub fn build_network<R: Rng + ?Sized>(
    topology: &[usize],
    activation: Activation,
    rng: &mut R,
) -> Result<Network, NetworkError> {
    if topology.len() < 2 {
        return Err(NetworkError::InvalidTopology {
            topology: topology.to_vec(),
            reason: "at least an input and an output width are required".to_string(),
        });
    }
    if topology.contains(&0) {
        return Err(NetworkError::InvalidTopology {
            topology: topology.to_vec(),
            reason: "layer widths must be positive".to_string(),
        });
    }

    let layers: Vec<DenseLayer> = topology
        .windows(2)
        .map(|pair| DenseLayer::new(pair[0], pair[1], activation, &mut *rng))
        .collect();
    let network = Network { layers };

    log::debug!(
        "Built network {:?} with {} activation ({} parameters)",
        topology,
        activation.name(),
        network.parameter_count()
    );
    Ok(network)
}

impl Network {
    /// Assemble a network from explicit layers.
    ///
    /// # Errors
    ///
    /// `InvalidTopology` for an empty list, `ShapeMismatch` when a layer's
    /// input width differs from the previous layer's output width.
    pub fn from_layers(layers: Vec<DenseLayer>) -> Result<Self, NetworkError> {
        if layers.is_empty() {
            return Err(NetworkError::InvalidTopology {
                topology: Vec::new(),
                reason: "a network needs at least one layer".to_string(),
            });
        }
        for pair in layers.windows(2) {
            if pair[0].output_size() != pair[1].input_size() {
                return Err(NetworkError::ShapeMismatch {
                    context: "layer chain",
                    expected: (pair[0].output_size(), pair[1].output_size()),
                    actual: pair[1].weights().dim(),
                });
            }
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Expected number of columns of an input batch.
    pub fn input_size(&self) -> usize {
        self.layers[0].input_size()
    }

    /// Number of columns of a prediction.
    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].output_size()
    }

    /// Layer widths, input first.
    pub fn topology(&self) -> Vec<usize> {
        std::iter::once(self.input_size())
            .chain(self.layers.iter().map(DenseLayer::output_size))
            .collect()
    }

    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(DenseLayer::parameter_count).sum()
    }

    fn check_input(&self, input: &Array2<f64>) -> Result<(), NetworkError> {
        if input.ncols() != self.input_size() {
            return Err(NetworkError::ShapeMismatch {
                context: "input batch",
                expected: (input.nrows(), self.input_size()),
                actual: input.dim(),
            });
        }
        Ok(())
    }

    fn check_target(&self, prediction: &Array2<f64>, target: &Array2<f64>) -> Result<(), NetworkError> {
        if target.dim() != prediction.dim() {
            return Err(NetworkError::ShapeMismatch {
                context: "label batch",
                expected: prediction.dim(),
                actual: target.dim(),
            });
        }
        Ok(())
    }

    /// Propagate `input` through every layer in order.
    ///
    /// Returns the full trace; `trace.prediction()` is the network output.
    /// Does not modify the network.
    pub fn forward(&self, input: &Array2<f64>) -> Result<Trace, NetworkError> {
        self.check_input(input)?;

        let mut entries = Vec::with_capacity(self.layers.len() + 1);
        entries.push(TraceEntry {
            pre_activation: None,
            activation: input.to_owned(),
        });
        for layer in &self.layers {
            let (z, a) = layer.forward(&entries[entries.len() - 1].activation);
            entries.push(TraceEntry {
                pre_activation: Some(z),
                activation: a,
            });
        }
        Ok(Trace { entries })
    }

    /// Backpropagate the loss of `trace` against `target` and update every layer.
    ///
    /// Layers are processed from the output back to the input. The output
    /// delta is `loss'(a, y) ⊙ f'(a)`; an interior delta is
    /// `(delta_next · W_next^T) ⊙ f'(a)` where `W_next` is the next layer's
    /// weights as they were *before* that layer's own update. Each layer then
    /// steps its bias by the batch mean of its delta and its weights by the
    /// batch sum `input^T · delta`, both scaled by `learning_rate`.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the trace does not belong to this network or the
    /// target shape differs from the prediction; `NonFiniteValue` if any new
    /// parameter is NaN or infinite. On error no layer is modified.
    pub fn backward<L: LossFunction + ?Sized>(
        &mut self,
        trace: &Trace,
        target: &Array2<f64>,
        loss: &L,
        learning_rate: f64,
    ) -> Result<(), NetworkError> {
        if trace.len() != self.layers.len() + 1 {
            return Err(NetworkError::ShapeMismatch {
                context: "trace length",
                expected: (self.layers.len() + 1, 1),
                actual: (trace.len(), 1),
            });
        }
        self.check_input(trace.input())?;
        self.check_target(trace.prediction(), target)?;

        let entries = trace.entries();
        let mut staged = Vec::with_capacity(self.layers.len());
        let mut delta = Array2::<f64>::zeros((0, 0));
        let mut upstream_weights: Option<Array2<f64>> = None;

        let batch = trace.input().nrows();
        for (index, layer) in self.layers.iter().enumerate().rev() {
            let layer_input = &entries[index].activation;
            let output = &entries[index + 1].activation;
            for (actual, expected) in [
                (layer_input.dim(), (batch, layer.input_size())),
                (output.dim(), (batch, layer.output_size())),
            ] {
                if actual != expected {
                    return Err(NetworkError::ShapeMismatch {
                        context: "trace",
                        expected,
                        actual,
                    });
                }
            }
            let local_slope = layer.activation().apply_derivative(output);

            delta = match upstream_weights.take() {
                None => loss.gradient(output, target) * &local_slope,
                Some(weights) => delta.dot(&weights.t()) * &local_slope,
            };

            // Snapshot before this layer's own update.
            upstream_weights = Some(layer.weights().clone());

            let (weights, bias) = layer.descend(layer_input, &delta, learning_rate);
            if !all_finite(&weights) || !all_finite(&bias) {
                return Err(NetworkError::NonFiniteValue {
                    location: format!("updated parameters of layer {}", index),
                });
            }
            staged.push((index, weights, bias));
        }

        for (index, weights, bias) in staged {
            self.layers[index].set_parameters(weights, bias);
        }
        Ok(())
    }

    /// Run one step in `mode` and return the prediction for `input`.
    ///
    /// In [`StepMode::Train`] the prediction is the one computed before the
    /// update. In [`StepMode::Infer`] `target` is ignored and the network is
    /// left untouched, so repeated calls return identical predictions.
    pub fn train_step<L: LossFunction + ?Sized>(
        &mut self,
        input: &Array2<f64>,
        target: &Array2<f64>,
        loss: &L,
        learning_rate: f64,
        mode: StepMode,
    ) -> Result<Array2<f64>, NetworkError> {
        let trace = self.forward(input)?;
        if !all_finite(trace.prediction()) {
            return Err(NetworkError::NonFiniteValue {
                location: "prediction".to_string(),
            });
        }

        if mode == StepMode::Train {
            self.backward(&trace, target, loss, learning_rate)?;
        }
        Ok(trace.into_prediction())
    }

    /// Inference-only forward pass.
    pub fn predict(&self, input: &Array2<f64>) -> Result<Array2<f64>, NetworkError> {
        Ok(self.forward(input)?.into_prediction())
    }
}

fn all_finite(values: &Array2<f64>) -> bool {
    values.iter().all(|v| v.is_finite())
}
