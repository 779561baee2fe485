// Tests for forward propagation: trace layout, output dimensions and basic correctness.

use approx::assert_relative_eq;
use ndarray::{array, Array2};
use rust_feedforward_nn::layers::DenseLayer;
use rust_feedforward_nn::network::{build_network, Network};
use rust_feedforward_nn::utils::{rng_from_seed, sigmoid, Activation};
use rust_feedforward_nn::NetworkError;

fn identity_network(width: usize, depth: usize) -> Network {
    let layers = (0..depth)
        .map(|_| {
            DenseLayer::from_parameters(Array2::eye(width), Array2::zeros((1, width)), Activation::Identity)
                .unwrap()
        })
        .collect();
    Network::from_layers(layers).unwrap()
}

// ============================================================================
// Identity Tests
// ============================================================================

mod identity_tests {
    use super::*;

    #[test]
    fn test_single_identity_layer_reproduces_input() {
        let network = identity_network(2, 1);
        let input = array![[0.3, -1.2], [4.5, 0.0], [-2.25, 7.75]];
        let trace = network.forward(&input).unwrap();

        for (out, inp) in trace.prediction().iter().zip(input.iter()) {
            assert_relative_eq!(*out, *inp, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_stacked_identity_layers_reproduce_input() {
        let network = identity_network(3, 4);
        let input = array![[1.0, 2.0, 3.0]];
        let prediction = network.predict(&input).unwrap();
        assert_eq!(prediction, input);
    }
}

// ============================================================================
// Trace Tests
// ============================================================================

mod trace_tests {
    use super::*;

    #[test]
    fn test_trace_has_one_entry_per_layer_plus_input() {
        let mut rng = rng_from_seed(Some(1));
        let network = build_network(&[2, 4, 8, 1], Activation::Sigmoid, &mut rng).unwrap();
        let input = Array2::from_shape_fn((5, 2), |(i, j)| (i as f64) - (j as f64));
        let trace = network.forward(&input).unwrap();

        assert_eq!(trace.len(), 4);
        assert!(trace.entries()[0].pre_activation.is_none());
        assert_eq!(trace.entries()[0].activation, input);

        let widths: Vec<usize> = trace.entries().iter().map(|e| e.activation.ncols()).collect();
        assert_eq!(widths, vec![2, 4, 8, 1]);
        for entry in &trace.entries()[1..] {
            assert_eq!(entry.activation.nrows(), 5);
            assert_eq!(entry.pre_activation.as_ref().unwrap().dim(), entry.activation.dim());
        }
    }

    #[test]
    fn test_trace_links_layers() {
        let mut rng = rng_from_seed(Some(2));
        let network = build_network(&[2, 3, 1], Activation::Tanh, &mut rng).unwrap();
        let input = array![[0.5, -0.5], [1.0, 2.0]];
        let trace = network.forward(&input).unwrap();

        for (index, layer) in network.layers().iter().enumerate() {
            let fed = &trace.entries()[index].activation;
            let expected_z = fed.dot(layer.weights()) + layer.bias();
            let entry = &trace.entries()[index + 1];
            assert_eq!(entry.pre_activation.as_ref().unwrap(), &expected_z);
            assert_eq!(entry.activation, expected_z.mapv(f64::tanh));
        }
    }

    #[test]
    fn test_sigmoid_layer_known_values() {
        let layer = DenseLayer::from_parameters(
            array![[1.0], [-1.0]],
            array![[0.5]],
            Activation::Sigmoid,
        )
        .unwrap();
        let network = Network::from_layers(vec![layer]).unwrap();
        let prediction = network.predict(&array![[2.0, 1.0], [0.0, 0.5]]).unwrap();

        assert_relative_eq!(prediction[[0, 0]], sigmoid(1.5), epsilon = 1e-12);
        assert_relative_eq!(prediction[[1, 0]], sigmoid(0.0), epsilon = 1e-12);
    }
}

// ============================================================================
// Purity and Error Tests
// ============================================================================

mod purity_tests {
    use super::*;

    #[test]
    fn test_forward_does_not_modify_network_or_input() {
        let mut rng = rng_from_seed(Some(3));
        let network = build_network(&[2, 4, 1], Activation::Sigmoid, &mut rng).unwrap();
        let before = network.clone();
        let input = array![[1.0, 1.0], [-1.0, 0.5]];
        let input_copy = input.clone();

        let _ = network.forward(&input).unwrap();

        assert_eq!(network, before);
        assert_eq!(input, input_copy);
    }

    #[test]
    fn test_forward_rejects_wrong_column_count() {
        let mut rng = rng_from_seed(Some(4));
        let network = build_network(&[2, 4, 1], Activation::Sigmoid, &mut rng).unwrap();
        let err = network.forward(&Array2::zeros((3, 5))).unwrap_err();
        assert_eq!(
            err,
            NetworkError::ShapeMismatch {
                context: "input batch",
                expected: (3, 2),
                actual: (3, 5),
            }
        );
    }
}
