use std::process;

use rust_feedforward_nn::config::{load_config, TrainingConfig};
use rust_feedforward_nn::trainer::run;
use rust_feedforward_nn::visualization::{LogObserver, LossHistoryWriter, TrainingObserver};
use rust_feedforward_nn::ConfigError;

// Binary classifier over 2-D points (concentric circles by default).
// Usage: blob_classifier [config.json]

// Read the config path from argv; defaults apply only when no path is given.
fn config_from_args(args: &[String]) -> Result<TrainingConfig, ConfigError> {
    match args.get(1) {
        Some(path) => {
            let config = load_config(path)?;
            log::info!("Loaded configuration from {}", path);
            Ok(config)
        }
        None => Ok(TrainingConfig::default()),
    }
}

// Checkpoint consumers: log lines always, a loss CSV when configured.
fn build_observers(config: &TrainingConfig) -> Vec<Box<dyn TrainingObserver>> {
    let mut observers: Vec<Box<dyn TrainingObserver>> = vec![Box::new(LogObserver)];
    if let Some(path) = &config.loss_history_path {
        match LossHistoryWriter::create(path) {
            Ok(writer) => observers.push(Box::new(writer)),
            Err(err) => log::warn!("Could not open {} for writing loss history: {}", path.display(), err),
        }
    }
    observers
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = match config_from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid configuration: {}", err);
            process::exit(1);
        }
    };
    let mut observers = build_observers(&config);

    match run(&config, &mut observers) {
        Ok((network, dataset, report)) => {
            let (class0, class1) = dataset.class_counts();
            log::info!(
                "Topology {:?}, {} parameters, {} samples ({} / {})",
                network.topology(),
                network.parameter_count(),
                dataset.len(),
                class0,
                class1
            );
            log::info!(
                "Initial loss {:.6}, final loss {:.6}, accuracy {:.2}%",
                report.initial_loss,
                report.final_loss,
                report.accuracy * 100.0
            );
        }
        Err(err) => {
            log::error!("Training failed: {}", err);
            process::exit(1);
        }
    }
}
