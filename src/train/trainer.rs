use tracing::debug;

use crate::{
    data::dataset::Dataset,
    error::NnResult,
    loss::mse::MseLoss,
    math::vector::Vector,
    network::network::Network,
    optim::sgd::Sgd,
    train::gradients::GradientBuffers,
};

/// Whether position `j` of an `n`-example epoch closes a batch.
///
/// Position 0 always flushes on its own, so the first batch holds a single
/// example and later batches hold positions `kB-B+1 ..= kB`. The final
/// position always flushes whatever is left.
pub fn is_batch_boundary(j: usize, n: usize, batch_size: usize) -> bool {
    j % batch_size == 0 || j + 1 == n
}

/// Number of weight updates one epoch of `n` examples performs.
pub fn flush_count(n: usize, batch_size: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let last = n - 1;
    last / batch_size + 1 + usize::from(last % batch_size != 0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochOutcome {
    pub mean_loss: f32,
    pub flushes: usize,
}

/// One pass of mini-batch gradient descent over `dataset`, visiting
/// examples in `order`.
///
/// For every example: inject its features, run the forward and backward
/// passes against its label, and add its gradients to `grads`. At each batch
/// boundary `sgd` applies the sums scaled by `learning_rate / batch_size`,
/// whatever the number of examples actually accumulated.
pub fn train_epoch(
    network: &mut Network,
    dataset: &Dataset,
    order: &[usize],
    sgd: &Sgd,
    batch_size: usize,
    grads: &mut GradientBuffers,
) -> NnResult<EpochOutcome> {
    let n = order.len();
    let mut target = Vector::zeros(network.output_len())?;
    let mut total_loss = 0.0;
    let mut flushes = 0;

    for (j, &idx) in order.iter().enumerate() {
        network.set_input(dataset.features(idx))?;
        target.copy_from(dataset.label(idx))?;

        network.forward_pass()?;
        total_loss += MseLoss::loss(network.output(), target.as_slice());
        network.backward_pass(&target)?;

        grads.accumulate(network)?;

        if is_batch_boundary(j, n, batch_size) {
            sgd.step(network, grads, batch_size)?;
            flushes += 1;
            debug!(position = j, flushes, "batch flushed");
        }
    }

    let mean_loss = if n == 0 { 0.0 } else { total_loss / n as f32 };
    Ok(EpochOutcome { mean_loss, flushes })
}
