use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{data::dataset::Dataset, error::NnResult, loss::mse::MseLoss, network::network::Network};

/// Classification result over a held-out set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    pub matches: usize,
    pub total: usize,
    /// `matches / total`, or 0 for an empty set.
    pub accuracy: f32,
    /// Mean MSE of the output activations against the labels.
    pub mean_loss: f32,
}

/// Index of the largest value; ties go to the lowest index.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Runs the forward pass over every example and counts how often the label
/// holds a 1 at the predicted index.
pub fn test(network: &mut Network, dataset: &Dataset) -> NnResult<TestReport> {
    let total = dataset.len();
    if total == 0 {
        warn!("evaluating on an empty dataset");
        return Ok(TestReport { matches: 0, total: 0, accuracy: 0.0, mean_loss: 0.0 });
    }

    let mut matches = 0;
    let mut loss = 0.0;
    for j in 0..total {
        let label = dataset.label(j);
        let output = network.predict(dataset.features(j))?;
        loss += MseLoss::loss(output, label);
        if let Some(predicted) = argmax(output) {
            if label.get(predicted) == Some(&1.0) {
                matches += 1;
            }
        }
    }

    Ok(TestReport {
        matches,
        total,
        accuracy: matches as f32 / total as f32,
        mean_loss: loss / total as f32,
    })
}
