use crate::{data::dataset::Dataset, error::Result, network::network::Network};

/// Losses observed during one pass over the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochLoss {
    /// Loss of the final sample.
    pub last: f64,
    pub mean: f64,
}

/// One online pass: for every sample in order, forward, loss, backward and
/// update. Each loss is measured before that sample's update.
pub fn train_epoch(network: &mut Network, data: &Dataset) -> Result<EpochLoss> {
    let mut total_loss = 0.0;
    let mut last = 0.0;

    for (sample, (x, y)) in data.iter().enumerate() {
        let y_hat = network.forward_prop(&x)?;
        last = Network::cross_entropy_loss(y_hat, y);
        tracing::debug!(sample, y_hat, y, loss = last, "trained sample");
        if !last.is_finite() {
            tracing::warn!(y_hat, y, "non-finite sample loss");
        }
        total_loss += last;
        network.back_prop(y_hat, y)?;
    }

    Ok(EpochLoss {
        last,
        mean: total_loss / data.len() as f64,
    })
}
