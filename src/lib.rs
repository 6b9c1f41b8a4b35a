pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod checkpoint;
pub mod data;
pub mod config;

// Convenience re-exports
pub use error::{NnError, NnResult};
pub use math::{Matrix, Vector};
pub use activation::{dsigmoid, sigmoid};
pub use layers::dense::Layer;
pub use network::{Network, NetworkSpec};
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use train::{train, test, TestReport, TrainConfig, TrainReport};
pub use data::Dataset;
pub use config::RunConfig;
