use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::NnResult;
use crate::network::network::Network;

/// Serializable description of a network's topology and initialisation.
///
/// `layer_sizes` lists unit counts from the input layer to the output layer.
/// Weights and biases are drawn from a `ChaCha8Rng` seeded with `seed`, so the
/// same spec always builds the same starting network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub layer_sizes: Vec<usize>,
    #[serde(default)]
    pub seed: u64,
}

impl NetworkSpec {
    pub fn new(layer_sizes: Vec<usize>, seed: u64) -> NetworkSpec {
        NetworkSpec { layer_sizes, seed }
    }

    pub fn build(&self) -> NnResult<Network> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        Network::new(&self.layer_sizes, &mut rng)
    }
}
