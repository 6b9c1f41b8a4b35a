use crate::{
    error::{NnError, NnResult},
    math::{matrix::Matrix, ops, vector::Vector},
    network::network::Network,
};

/// Per-layer gradient sums for the batch in progress. Entry `k` belongs to
/// `network.layers[k + 1]`; the input layer has no parameters to train.
#[derive(Debug, Clone)]
pub struct GradientBuffers {
    weights: Vec<Matrix>,
    biases: Vec<Vector>,
}

impl GradientBuffers {
    pub fn new(network: &Network) -> NnResult<GradientBuffers> {
        let trainable = network.layers.len().saturating_sub(1);
        let mut weights = Vec::with_capacity(trainable);
        let mut biases = Vec::with_capacity(trainable);
        for layer in network.layers.iter().skip(1) {
            weights.push(Matrix::zeros(layer.weights.rows(), layer.weights.cols())?);
            biases.push(Vector::zeros(layer.biases.len())?);
        }
        Ok(GradientBuffers { weights, biases })
    }

    /// Adds the current example's gradients, read from the errors left by the
    /// last backward pass: `ΔW_i += δ_i ⊗ a_{i-1}`, `Δb_i += δ_i`.
    pub fn accumulate(&mut self, network: &Network) -> NnResult<()> {
        self.check_layers("accumulate", network)?;
        for (k, pair) in network.layers.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            ops::outer_product_accumulate(&mut self.weights[k], &current.error, &previous.activated_outputs)?;
            ops::add_in_place(&mut self.biases[k], &current.error)?;
        }
        Ok(())
    }

    /// Fails unless there is one buffer pair per trainable layer of `network`.
    pub fn check_layers(&self, op: &'static str, network: &Network) -> NnResult<()> {
        let trainable = network.layers.len().saturating_sub(1);
        if trainable != self.weights.len() {
            return Err(NnError::shape(op, (self.weights.len(), 1), (trainable, 1)));
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.weights.iter_mut().for_each(|w| w.fill(0.0));
        self.biases.iter_mut().for_each(|b| b.fill(0.0));
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Vector] {
        &self.biases
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&mut Matrix, &mut Vector)> {
        self.weights.iter_mut().zip(self.biases.iter_mut())
    }
}
