use crate::{data::dataset::Dataset, error::Result, network::network::Network};

/// Held-out performance of a network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub mean_loss: f64,
    /// Fraction of samples where `y_hat >= 0.5` matches the label.
    pub accuracy: f64,
}

/// Scores `data` with forward passes only; parameters are not touched.
pub fn evaluate(network: &mut Network, data: &Dataset) -> Result<Evaluation> {
    let mut total_loss = 0.0;
    let mut correct = 0usize;

    for (x, y) in data.iter() {
        let y_hat = network.forward_prop(&x)?;
        total_loss += Network::cross_entropy_loss(y_hat, y);
        let predicted = if y_hat >= 0.5 { 1.0 } else { 0.0 };
        if predicted == y {
            correct += 1;
        }
    }

    let n = data.len() as f64;
    Ok(Evaluation {
        mean_loss: total_loss / n,
        accuracy: correct as f64 / n,
    })
}
