use std::time::Instant;

use crate::data::dataset::Dataset;
use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::evaluate::evaluate;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

/// Trains `network` for `config.epochs` online epochs and returns the stats of
/// every completed epoch.
///
/// # Arguments
/// - `network`    — modified in place; its learning rate must equal `config.learning_rate`
/// - `train`      — samples visited in their stored order every epoch
/// - `validation` — optional held-out set scored after each epoch
/// - `config`     — epoch count and optional progress channel
///
/// # Early termination
/// The loop stops after the current epoch if the `progress_tx` receiver has
/// been dropped.
pub fn train_loop(
    network: &mut Network,
    train: &Dataset,
    validation: Option<&Dataset>,
    config: &TrainConfig,
) -> Result<Vec<EpochStats>> {
    config.validate()?;
    if config.learning_rate != network.learning_rate() {
        return Err(Error::Config(format!(
            "learning_rate {} does not match the network's fixed rate {}",
            config.learning_rate,
            network.learning_rate()
        )));
    }
    if train.n_features() != network.n_features() {
        return Err(Error::ShapeMismatch {
            what: "training features",
            expected: (network.n_features(), 1),
            actual: (train.n_features(), 1),
        });
    }

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let epoch_loss = train_epoch(network, train)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let (val_loss, val_accuracy) = match validation {
            Some(data) => {
                let eval = evaluate(network, data)?;
                (Some(eval.mean_loss), Some(eval.accuracy))
            }
            None => (None, None),
        };

        tracing::info!(
            mean_loss = epoch_loss.mean,
            val_loss = ?val_loss,
            elapsed_ms,
            "Epoch = {}, loss = {}",
            epoch,
            epoch_loss.last
        );

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            loss: epoch_loss.last,
            mean_loss: epoch_loss.mean,
            val_loss,
            val_accuracy,
            elapsed_ms,
        };
        history.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                tracing::debug!(epoch, "progress receiver dropped, stopping");
                break;
            }
        }
    }

    Ok(history)
}
