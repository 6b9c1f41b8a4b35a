use rand::Rng;

use crate::{
    activation::activation::sigmoid_vec,
    error::NnResult,
    math::{matrix::Matrix, ops, vector::Vector},
};

/// One fully connected sigmoid layer.
///
/// `weights` is `length × previous_length`. For the input layer
/// `previous_length` is zero, so its weights are empty and its biases unused;
/// its `activated_outputs` hold the injected sample.
#[derive(Debug, Clone)]
pub struct Layer {
    pub length: usize,
    pub weights: Matrix,
    pub biases: Vector,
    pub weighted_outputs: Vector, // z = W·a_prev + b
    pub activated_outputs: Vector,
    pub error: Vector,
}

impl Layer {
    /// Weights and biases drawn uniformly from `[-1, 1)`.
    pub fn new<R: Rng + ?Sized>(length: usize, previous_length: usize, rng: &mut R) -> NnResult<Layer> {
        let weights = Matrix::random(length, previous_length, rng)?;
        let biases = Vector::random(length, rng)?;
        Layer::with_parameters(weights, biases)
    }

    /// All-zero weights and biases.
    pub fn zeroed(length: usize, previous_length: usize) -> NnResult<Layer> {
        Layer::with_parameters(Matrix::zeros(length, previous_length)?, Vector::zeros(length)?)
    }

    fn with_parameters(weights: Matrix, biases: Vector) -> NnResult<Layer> {
        let length = biases.len();
        Ok(Layer {
            length,
            weights,
            biases,
            weighted_outputs: Vector::zeros(length)?,
            activated_outputs: Vector::zeros(length)?,
            error: Vector::zeros(length)?,
        })
    }

    /// `weighted_outputs = weights · previous.activated_outputs + biases`.
    pub fn feed_forward(&mut self, previous: &Layer) -> NnResult<()> {
        ops::multiply(&mut self.weighted_outputs, &self.weights, &previous.activated_outputs)?;
        ops::add_in_place(&mut self.weighted_outputs, &self.biases)
    }

    /// `activated_outputs = sigmoid(weighted_outputs)`.
    pub fn activate(&mut self) -> NnResult<()> {
        sigmoid_vec(&mut self.activated_outputs, &self.weighted_outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NnError;

    #[test]
    fn feed_forward_computes_affine_map() {
        let mut input = Layer::zeroed(2, 0).unwrap();
        input.activated_outputs = Vector::from_vec(vec![1.0, 2.0]);

        let mut layer = Layer::zeroed(2, 2).unwrap();
        layer.weights = Matrix::from_rows(&[vec![1.0, 1.0], vec![0.0, -1.0]]).unwrap();
        layer.biases = Vector::from_vec(vec![0.5, 0.0]);

        layer.feed_forward(&input).unwrap();
        assert_eq!(layer.weighted_outputs.as_slice(), &[3.5, -2.0]);

        // Repeated passes overwrite rather than accumulate.
        layer.feed_forward(&input).unwrap();
        assert_eq!(layer.weighted_outputs.as_slice(), &[3.5, -2.0]);
    }

    #[test]
    fn feed_forward_rejects_wrong_previous_width() {
        let previous = Layer::zeroed(3, 0).unwrap();
        let mut layer = Layer::zeroed(2, 2).unwrap();
        assert!(matches!(
            layer.feed_forward(&previous),
            Err(NnError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn input_layer_has_empty_weights() {
        let layer = Layer::zeroed(4, 0).unwrap();
        assert_eq!(layer.weights.shape(), (4, 0));
        assert_eq!(layer.biases.len(), 4);
    }
}
