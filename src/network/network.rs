use rand::Rng;

use crate::{
    activation::activation::dsigmoid_vec,
    error::{NnError, NnResult},
    layers::dense::Layer,
    math::{ops, vector::Vector},
};

/// Ordered stack of sigmoid layers; `layers[0]` is the input layer.
#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
}

fn check_topology(sizes: &[usize]) -> NnResult<()> {
    if sizes.len() < 2 {
        return Err(NnError::InvalidTopology(format!(
            "a network needs at least 2 layers, got {}",
            sizes.len()
        )));
    }
    if let Some(i) = sizes.iter().position(|&s| s == 0) {
        return Err(NnError::InvalidTopology(format!("layer {i} has zero units")));
    }
    Ok(())
}

impl Network {
    /// Builds a network from layer sizes, input first, with weights and
    /// biases drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(sizes: &[usize], rng: &mut R) -> NnResult<Network> {
        check_topology(sizes)?;
        let layers = sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| Layer::new(size, previous_length(sizes, i), &mut *rng))
            .collect::<NnResult<Vec<_>>>()?;
        Ok(Network { layers })
    }

    /// Same topology as [`Network::new`] with every parameter set to zero.
    pub fn zeroed(sizes: &[usize]) -> NnResult<Network> {
        check_topology(sizes)?;
        let layers = sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| Layer::zeroed(size, previous_length(sizes, i)))
            .collect::<NnResult<Vec<_>>>()?;
        Ok(Network { layers })
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.layers.iter().map(|l| l.length).collect()
    }

    pub fn input_len(&self) -> usize {
        self.layers.first().map_or(0, |l| l.length)
    }

    pub fn output_len(&self) -> usize {
        self.layers.last().map_or(0, |l| l.length)
    }

    /// Copies a sample into the input layer's activations.
    pub fn set_input(&mut self, sample: &[f32]) -> NnResult<()> {
        match self.layers.first_mut() {
            Some(input) => input.activated_outputs.copy_from(sample),
            None => Err(NnError::InvalidTopology("network has no layers".to_owned())),
        }
    }

    /// Activations of the last layer after the most recent forward pass.
    pub fn output(&self) -> &[f32] {
        match self.layers.last() {
            Some(last) => last.activated_outputs.as_slice(),
            None => &[],
        }
    }

    /// Feeds every layer from its predecessor, in order, then applies the
    /// sigmoid.
    pub fn forward_pass(&mut self) -> NnResult<()> {
        for i in 1..self.layers.len() {
            let (head, tail) = self.layers.split_at_mut(i);
            let current = &mut tail[0];
            current.feed_forward(&head[i - 1])?;
            current.activate()?;
        }
        Ok(())
    }

    /// Injects `input`, runs the forward pass and returns the output activations.
    pub fn predict(&mut self, input: &[f32]) -> NnResult<&[f32]> {
        self.set_input(input)?;
        self.forward_pass()?;
        Ok(self.output())
    }

    /// Fills every non-input layer's `error` against `expected`, last layer
    /// first. Weights are left untouched.
    pub fn backward_pass(&mut self, expected: &Vector) -> NnResult<()> {
        let n = self.layers.len();
        if n < 2 {
            return Ok(());
        }

        // Output layer: (a - y) ⊙ σ'(z)
        {
            let last = &mut self.layers[n - 1];
            let mut derivative = Vector::zeros(last.length)?;
            dsigmoid_vec(&mut derivative, &last.weighted_outputs)?;
            ops::subtract(&mut last.error, &last.activated_outputs, expected)?;
            ops::hadamard_in_place(&mut last.error, &derivative)?;
        }

        // Hidden layers: (W_{i+1}ᵀ · δ_{i+1}) ⊙ σ'(z_i)
        for i in (1..n - 1).rev() {
            let (head, tail) = self.layers.split_at_mut(i + 1);
            let current = &mut head[i];
            let next = &tail[0];

            let next_weights_t = next.weights.transpose()?;
            ops::multiply(&mut current.error, &next_weights_t, &next.error)?;

            let mut derivative = Vector::zeros(current.length)?;
            dsigmoid_vec(&mut derivative, &current.weighted_outputs)?;
            ops::hadamard_in_place(&mut current.error, &derivative)?;
        }
        Ok(())
    }
}

fn previous_length(sizes: &[usize], i: usize) -> usize {
    if i == 0 { 0 } else { sizes[i - 1] }
}
