// Gradient checking: compare the parameter steps taken by the backward pass
// with central finite differences of E = 0.5 * sum((prediction - target)^2).
//
// With learning rate 1 the weight step equals dE/dW (batch sum) and the bias
// step equals dE/db divided by the batch size (batch mean).

use approx::assert_relative_eq;
use ndarray::{array, Array2};
use rust_feedforward_nn::layers::DenseLayer;
use rust_feedforward_nn::network::{build_network, Network, StepMode};
use rust_feedforward_nn::utils::{rng_from_seed, Activation, Loss};

const EPS: f64 = 1e-6;

fn half_sse(network: &Network, input: &Array2<f64>, target: &Array2<f64>) -> f64 {
    let prediction = network.predict(input).unwrap();
    0.5 * (&prediction - target).mapv(|d| d * d).sum()
}

fn with_layer(network: &Network, index: usize, weights: Array2<f64>, bias: Array2<f64>) -> Network {
    let mut layers = network.layers().to_vec();
    let activation = layers[index].activation();
    layers[index] = DenseLayer::from_parameters(weights, bias, activation).unwrap();
    Network::from_layers(layers).unwrap()
}

fn numeric_weight_gradient(
    network: &Network,
    index: usize,
    row: usize,
    col: usize,
    input: &Array2<f64>,
    target: &Array2<f64>,
) -> f64 {
    let layer = &network.layers()[index];
    let mut plus = layer.weights().clone();
    plus[[row, col]] += EPS;
    let mut minus = layer.weights().clone();
    minus[[row, col]] -= EPS;

    let e_plus = half_sse(&with_layer(network, index, plus, layer.bias().clone()), input, target);
    let e_minus = half_sse(&with_layer(network, index, minus, layer.bias().clone()), input, target);
    (e_plus - e_minus) / (2.0 * EPS)
}

fn numeric_bias_gradient(
    network: &Network,
    index: usize,
    col: usize,
    input: &Array2<f64>,
    target: &Array2<f64>,
) -> f64 {
    let layer = &network.layers()[index];
    let mut plus = layer.bias().clone();
    plus[[0, col]] += EPS;
    let mut minus = layer.bias().clone();
    minus[[0, col]] -= EPS;

    let e_plus = half_sse(&with_layer(network, index, layer.weights().clone(), plus), input, target);
    let e_minus = half_sse(&with_layer(network, index, layer.weights().clone(), minus), input, target);
    (e_plus - e_minus) / (2.0 * EPS)
}

fn check_network(topology: &[usize], activation: Activation, seed: u64) {
    let mut rng = rng_from_seed(Some(seed));
    let original = build_network(topology, activation, &mut rng).unwrap();
    let input = array![[0.3, -0.7], [1.1, 0.4], [-0.9, -0.2], [0.05, 0.6]];
    let target = array![[1.0], [0.0], [1.0], [0.0]];
    let batch = input.nrows() as f64;

    let mut trained = original.clone();
    trained
        .train_step(&input, &target, &Loss::MeanSquaredError, 1.0, StepMode::Train)
        .unwrap();

    for (index, (before, after)) in original.layers().iter().zip(trained.layers()).enumerate() {
        let (rows, cols) = before.weights().dim();
        for row in 0..rows {
            for col in 0..cols {
                let analytic = before.weights()[[row, col]] - after.weights()[[row, col]];
                let numeric = numeric_weight_gradient(&original, index, row, col, &input, &target);
                assert_relative_eq!(analytic, numeric, epsilon = 1e-6, max_relative = 1e-4);
            }
        }
        for col in 0..cols {
            let analytic = before.bias()[[0, col]] - after.bias()[[0, col]];
            let numeric = numeric_bias_gradient(&original, index, col, &input, &target) / batch;
            assert_relative_eq!(analytic, numeric, epsilon = 1e-6, max_relative = 1e-4);
        }
    }
}

mod gradient_check_tests {
    use super::*;

    #[test]
    fn test_sigmoid_two_layers() {
        check_network(&[2, 3, 1], Activation::Sigmoid, 101);
    }

    #[test]
    fn test_sigmoid_default_topology() {
        check_network(&[2, 4, 8, 1], Activation::Sigmoid, 102);
    }

    #[test]
    fn test_tanh_three_layers() {
        check_network(&[2, 5, 3, 1], Activation::Tanh, 103);
    }

    #[test]
    fn test_identity_single_layer() {
        check_network(&[2, 1], Activation::Identity, 104);
    }
}
