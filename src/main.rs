//! Trains a network on an IDX (MNIST-format) dataset.
//!
//! Usage:
//!   cargo run --release -- run.json
//!
//! `run.json` is a `RunConfig`: network topology and seed, training
//! hyperparameters, checkpoint location and the four IDX file paths.

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ferrite_mlp::{data::load_idx_pair, train, RunConfig};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: ferrite-mlp <run-config.json>")?;
    let config = RunConfig::load_json(&path)
        .with_context(|| format!("failed to read run config '{path}'"))?;

    let level: Level = config
        .log_level
        .parse()
        .with_context(|| format!("unknown log level '{}'", config.log_level))?;
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data = &config.data;
    let train_set = load_idx_pair(&data.train_images, &data.train_labels, data.num_classes)
        .context("failed to load training set")?;
    let test_set = load_idx_pair(&data.test_images, &data.test_labels, data.num_classes)
        .context("failed to load test set")?;
    info!(train = train_set.len(), test = test_set.len(), "loaded dataset");

    let mut network = config.network.build()?;
    info!(sizes = ?network.sizes(), "allocated network");

    let report = train(&mut network, &train_set, &test_set, &config.training)?;
    if let Some(last) = report.last() {
        info!(
            accuracy = last.test_accuracy,
            checkpoint = %report.final_checkpoint.display(),
            "finished"
        );
    }
    Ok(())
}
