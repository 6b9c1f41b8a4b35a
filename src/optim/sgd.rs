use tracing::debug;

use crate::{
    error::NnResult,
    math::ops,
    network::network::Network,
    train::gradients::GradientBuffers,
};

/// Plain mini-batch gradient descent.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f32,
}

impl Sgd {
    pub fn new(learning_rate: f32) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one batch update: every accumulated gradient is scaled by
    /// `learning_rate / batch_size` and subtracted from the live parameters.
    /// The buffers are zeroed afterwards, ready for the next batch.
    pub fn step(&self, network: &mut Network, grads: &mut GradientBuffers, batch_size: usize) -> NnResult<()> {
        grads.check_layers("step", network)?;
        let scale = self.learning_rate / batch_size as f32;
        debug!(scale, "applying batch update");

        for (layer, (w_grad, b_grad)) in network.layers.iter_mut().skip(1).zip(grads.iter_mut()) {
            ops::scale_matrix_in_place(w_grad, scale);
            ops::subtract_matrix_in_place(&mut layer.weights, w_grad)?;
            ops::scale_in_place(b_grad, scale);
            ops::subtract_in_place(&mut layer.biases, b_grad)?;
        }

        grads.reset();
        Ok(())
    }
}
