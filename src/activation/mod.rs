pub mod activation;

pub use activation::{dsigmoid, dsigmoid_vec, sigmoid, sigmoid_vec};
