use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Per-epoch training statistics returned by `train`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mean MSE over the training examples, measured before each example's
    /// update is applied.
    pub train_loss: f32,
    pub test_accuracy: f32,
    pub test_loss: f32,
    /// Number of weight updates applied during the epoch.
    pub flushes: usize,
    /// Wall-clock duration of the epoch in milliseconds.
    pub elapsed_ms: u64,
    /// Checkpoint written at the end of the epoch.
    pub checkpoint: PathBuf,
}

/// Outcome of a complete training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    pub epochs: Vec<EpochStats>,
    pub final_checkpoint: PathBuf,
}

impl TrainReport {
    pub fn last(&self) -> Option<&EpochStats> {
        self.epochs.last()
    }
}
