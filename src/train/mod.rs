pub mod epoch_stats;
pub mod gradients;
pub mod loop_fn;
pub mod tester;
pub mod train_config;
pub mod trainer;

pub use epoch_stats::{EpochStats, TrainReport};
pub use gradients::GradientBuffers;
pub use loop_fn::train;
pub use tester::{argmax, test, TestReport};
pub use train_config::TrainConfig;
pub use trainer::{flush_count, is_batch_boundary, train_epoch, EpochOutcome};
