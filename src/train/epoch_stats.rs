use serde::{Deserialize, Serialize};

/// Per-epoch training statistics emitted by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Loss of the last sample processed in this epoch. This is the value the
    /// driver reports and plots.
    pub loss: f64,
    /// Mean per-sample loss over the epoch, measured as training went.
    pub mean_loss: f64,
    /// Mean loss on the held-out set, if one was given.
    pub val_loss: Option<f64>,
    /// Held-out accuracy at a 0.5 threshold, if a held-out set was given.
    pub val_accuracy: Option<f64>,
    /// Wall-clock duration of the training pass in milliseconds.
    pub elapsed_ms: u64,
}
