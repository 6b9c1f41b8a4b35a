use std::time::Instant;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::checkpoint::codec::save;
use crate::data::dataset::Dataset;
use crate::error::{NnError, NnResult};
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::{EpochStats, TrainReport};
use crate::train::gradients::GradientBuffers;
use crate::train::tester::test;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs.
///
/// After every epoch the network is scored on `test_set` and checkpointed to
/// `config.checkpoint_dir`; one more checkpoint is written when training
/// ends. Any error aborts the run immediately, leaving the network in the
/// state of the last completed update.
pub fn train(
    network: &mut Network,
    train_set: &Dataset,
    test_set: &Dataset,
    config: &TrainConfig,
) -> NnResult<TrainReport> {
    config.validate()?;
    if train_set.is_empty() {
        return Err(NnError::InvalidDataset("training set is empty".to_owned()));
    }
    check_widths(network, train_set, "train")?;
    check_widths(network, test_set, "test")?;

    let sgd = Sgd::new(config.learning_rate);
    let mut grads = GradientBuffers::new(network)?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut order: Vec<usize> = (0..train_set.len()).collect();
    let mut epochs = Vec::with_capacity(config.epochs);

    info!(
        sizes = ?network.sizes(),
        examples = train_set.len(),
        epochs = config.epochs,
        batch_size = config.batch_size,
        learning_rate = config.learning_rate,
        "starting training"
    );

    for epoch in 1..=config.epochs {
        if config.shuffle {
            order.shuffle(&mut rng);
        }
        let t_start = Instant::now();

        let outcome = train_epoch(network, train_set, &order, &sgd, config.batch_size, &mut grads)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let report = test(network, test_set)?;
        let checkpoint = save(network, &config.checkpoint_dir, &config.checkpoint_hint)?;

        info!(
            epoch,
            total = config.epochs,
            train_loss = outcome.mean_loss,
            accuracy = report.accuracy,
            matches = report.matches,
            tested = report.total,
            elapsed_ms,
            checkpoint = %checkpoint.display(),
            "epoch complete"
        );

        epochs.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss: outcome.mean_loss,
            test_accuracy: report.accuracy,
            test_loss: report.mean_loss,
            flushes: outcome.flushes,
            elapsed_ms,
            checkpoint,
        });
    }

    let final_checkpoint = save(network, &config.checkpoint_dir, &config.checkpoint_hint)?;
    info!(checkpoint = %final_checkpoint.display(), "training complete");

    Ok(TrainReport { epochs, final_checkpoint })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn check_widths(network: &Network, dataset: &Dataset, op: &'static str) -> NnResult<()> {
    if dataset.feature_dim() != network.input_len() {
        return Err(NnError::ShapeMismatch {
            op,
            expected: (network.input_len(), 1),
            found: (dataset.feature_dim(), 1),
        });
    }
    if dataset.num_classes() != network.output_len() {
        return Err(NnError::ShapeMismatch {
            op,
            expected: (network.output_len(), 1),
            found: (dataset.num_classes(), 1),
        });
    }
    Ok(())
}
