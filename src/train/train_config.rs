use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NnError, NnResult};

fn default_hint() -> String {
    "net".to_owned()
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Hyperparameters and checkpoint policy for a `train` run.
///
/// # Fields
/// - `epochs`          : full passes over the training set
/// - `batch_size`      : examples per gradient flush (see `train_epoch` for
///                       the boundary rule)
/// - `learning_rate`   : step size; each flush subtracts
///                       `learning_rate / batch_size` times the summed gradient
/// - `checkpoint_hint` : label appended to the topology in checkpoint names
/// - `checkpoint_dir`  : where checkpoints are written, created if missing
/// - `shuffle`         : reshuffle example order every epoch; off keeps the
///                       dataset order, which makes runs reproducible
/// - `seed`            : seeds the shuffle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f32,
    #[serde(default = "default_hint")]
    pub checkpoint_hint: String,
    #[serde(default = "default_dir")]
    pub checkpoint_dir: PathBuf,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub seed: u64,
}

impl TrainConfig {
    pub fn new(epochs: usize, batch_size: usize, learning_rate: f32) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate,
            checkpoint_hint: default_hint(),
            checkpoint_dir: default_dir(),
            shuffle: false,
            seed: 0,
        }
    }

    pub fn with_checkpoints(mut self, dir: impl AsRef<Path>, hint: &str) -> Self {
        self.checkpoint_dir = dir.as_ref().to_path_buf();
        self.checkpoint_hint = hint.to_owned();
        self
    }

    pub fn validate(&self) -> NnResult<()> {
        if self.batch_size == 0 {
            return Err(NnError::InvalidConfig("batch_size must be at least 1".to_owned()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NnError::InvalidConfig(format!(
                "learning_rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}
