// Tests for click-collected datasets feeding the training step.

use rust_feedforward_nn::collector::{MouseButton, PointCollector};
use rust_feedforward_nn::network::{build_network, StepMode};
use rust_feedforward_nn::utils::{rng_from_seed, Activation, Loss};

mod collector_tests {
    use super::*;

    #[test]
    fn test_clicked_points_have_training_shapes() {
        let mut collector = PointCollector::new();
        for i in 0..6 {
            let offset = i as f64 * 0.1;
            collector.on_double_click(MouseButton::Primary, -5.0 + offset, -5.0);
            collector.on_double_click(MouseButton::Secondary, 5.0 - offset, 5.0);
        }
        collector.on_double_click(MouseButton::Middle, 0.0, 0.0);

        let dataset = collector.snapshot().unwrap();
        assert_eq!(dataset.samples().dim(), (12, 2));
        assert_eq!(dataset.labels().dim(), (12, 1));
        assert_eq!(dataset.class_counts(), (6, 6));

        let mut rng = rng_from_seed(Some(12));
        let mut network = build_network(&[2, 4, 1], Activation::Sigmoid, &mut rng).unwrap();
        let prediction = network
            .train_step(
                dataset.samples(),
                dataset.labels(),
                &Loss::MeanSquaredError,
                0.05,
                StepMode::Train,
            )
            .unwrap();
        assert_eq!(prediction.dim(), (12, 1));
    }

    #[test]
    fn test_clear_resets_buffers() {
        let mut collector = PointCollector::new();
        collector.record(1.0, 1.0, 1);
        collector.clear();
        assert!(collector.is_empty());
        assert!(collector.snapshot().is_err());
    }
}
